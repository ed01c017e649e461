use super::ContextStack;

#[derive(Debug, PartialEq)]
struct Accent(&'static str);

#[test]
fn nearest_provider_wins_until_released() {
    let mut stack = ContextStack::new();
    let outer = stack.provide(Accent("outer"));
    let inner = stack.provide(Accent("inner"));

    assert_eq!(stack.get::<Accent>().as_deref(), Some(&Accent("inner")));

    stack.release(&[inner]);
    assert_eq!(stack.get::<Accent>().as_deref(), Some(&Accent("outer")));

    stack.release(&[outer]);
    assert!(stack.get::<Accent>().is_none());
}

#[test]
fn release_only_touches_recorded_types() {
    let mut stack = ContextStack::new();
    stack.provide(7u32);
    let accent = stack.provide(Accent("card"));

    stack.release(&[accent]);

    assert_eq!(stack.get::<u32>().as_deref(), Some(&7));
    assert!(stack.get::<Accent>().is_none());
}
