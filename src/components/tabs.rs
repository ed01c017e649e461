use crossterm::event::KeyCode;

use crate::events::{FrameworkEvent, pressed_key};
use crate::hooks::Scope;
use crate::runtime::{Color, Element, TabNode, TabsNode};

use super::container::{
    ContainerFocus, ContainerProps, pending_sections, section_child, use_visible_sections,
};

/// Every visible section as a tab; only the active tab's section is mounted.
pub fn section_tabs(scope: &mut Scope, props: &ContainerProps) -> Element {
    let (wire, sections) = use_visible_sections(scope, props);
    let (active, active_handle) = scope.use_state(|| 0usize);
    let focus = ContainerFocus::from_scope(scope);
    let focused = focus.focused;
    let count = match &*sections {
        Some(Ok(list)) => list.len(),
        _ => 0,
    };

    scope.use_event_listener((focused, count), move |event: &FrameworkEvent| {
        if count == 0 || !focus.accepts_keys() {
            return true;
        }
        match pressed_key(event).map(|key| key.code) {
            Some(KeyCode::Left) => {
                active_handle.update(|index| *index = index.checked_sub(1).unwrap_or(count - 1))
            }
            Some(KeyCode::Right) => active_handle.update(|index| *index = (*index + 1) % count),
            _ => {}
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
    let active = active.min(list.len() - 1);
    let tabs = list
        .iter()
        .enumerate()
        .map(|(index, summary)| TabNode {
            label: summary.name.clone(),
            content: if index == active {
                section_child(props, summary, focused)
            } else {
                Element::Empty
            },
        })
        .collect();
    let title = wire
        .data
        .as_deref()
        .and_then(|graph| graph.object_infos.get(&props.object_api_name))
        .and_then(|object| object.label.clone())
        .unwrap_or_else(|| props.object_api_name.clone());
    let mut node = TabsNode::new(tabs, active).title(title);
    if focused {
        node = node.accent(Color::Cyan);
    }
    Element::tabs(node)
}
