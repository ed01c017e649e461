use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::events::{EventBus, FrameworkEvent};
use crate::runtime::{AppMessage, Dispatcher};

#[test]
fn render_and_shutdown_requests_reach_the_loop_in_order() {
    let (tx, mut rx) = mpsc::channel(4);
    let dispatcher = Dispatcher::new(tx, EventBus::new(2));

    dispatcher.request_render();
    dispatcher.shutdown();

    assert!(matches!(rx.try_recv(), Ok(AppMessage::RequestRender)));
    assert!(matches!(rx.try_recv(), Ok(AppMessage::Shutdown)));
    assert!(rx.try_recv().is_err());
}

#[test]
fn requests_beyond_capacity_are_dropped() {
    let (tx, mut rx) = mpsc::channel(1);
    let dispatcher = Dispatcher::new(tx, EventBus::new(2));

    dispatcher.request_render();
    dispatcher.shutdown();

    assert!(matches!(rx.try_recv(), Ok(AppMessage::RequestRender)));
    assert!(rx.try_recv().is_err());
}

#[test]
fn key_events_published_on_the_bus_reach_listeners() {
    let (tx, _rx) = mpsc::channel(1);
    let bus = EventBus::new(2);
    let dispatcher = Dispatcher::new(tx, bus.clone());
    let mut listener = dispatcher.events().subscribe();

    bus.publish(FrameworkEvent::Key(KeyEvent::new(
        KeyCode::Char('e'),
        KeyModifiers::NONE,
    )));

    match listener.try_recv().expect("event delivered") {
        FrameworkEvent::Key(key) => assert_eq!(key.code, KeyCode::Char('e')),
        other => panic!("unexpected event: {other:?}"),
    }
}
