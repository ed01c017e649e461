use crossterm::event::KeyCode;

use crate::events::pressed_key;
use crate::hooks::{Scope, StateHandle};
use crate::runtime::{AccordionItemNode, AccordionNode, Color, Element};

use super::container::{
    ContainerFocus, ContainerProps, pending_sections, section_child, use_visible_sections,
};

/// Every visible section as an accordion item. One item is open at a time,
/// the first one initially.
pub fn section_accordion(scope: &mut Scope, props: &ContainerProps) -> Element {
    let (wire, sections) = use_visible_sections(scope, props);
    let (selected, selected_handle) = scope.use_state(|| 0usize);
    let (open, open_handle) = scope.use_state(|| Some(0usize));
    let focus = ContainerFocus::from_scope(scope);
    let focused = focus.focused;
    let count = match &*sections {
        Some(Ok(list)) => list.len(),
        _ => 0,
    };

    scope.use_event_listener((focused, count), move |event| {
        if count == 0 || !focus.accepts_keys() {
            return true;
        }
        if let Some(key) = pressed_key(event) {
            handle_accordion_key(key.code, count, &selected_handle, &open_handle);
        }
        true
    });

    let list = match &*sections {
        Some(Ok(list)) => list,
        Some(Err(err)) => return pending_sections(&wire, Some(err)),
        None => return pending_sections(&wire, None),
    };
    if list.is_empty() {
        return Element::Empty;
    }
    let selected = selected.min(list.len() - 1);
    let items = list
        .iter()
        .enumerate()
        .map(|(index, summary)| {
            if open == Some(index) {
                AccordionItemNode::open(
                    summary.name.clone(),
                    section_child(props, summary, focused && index == selected),
                )
            } else {
                AccordionItemNode::closed(summary.name.clone())
            }
        })
        .collect();
    let mut node = AccordionNode::new(items, selected);
    if focused {
        node = node.accent(Color::Cyan);
    }
    Element::accordion(node)
}

fn handle_accordion_key(
    code: KeyCode,
    count: usize,
    selected: &StateHandle<usize>,
    open: &StateHandle<Option<usize>>,
) {
    match code {
        KeyCode::Up => selected.update(|index| *index = index.checked_sub(1).unwrap_or(count - 1)),
        KeyCode::Down => selected.update(|index| *index = (*index + 1) % count),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let target = selected.with(|index| (*index).min(count - 1));
            open.update(|current| {
                *current = if *current == Some(target) {
                    None
                } else {
                    Some(target)
                }
            });
        }
        _ => {}
    }
}
