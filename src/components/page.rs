use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyCode;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::events::{FrameworkEvent, pressed_key};
use crate::hooks::Scope;
use crate::layout::section_is_displayable;
use crate::metadata::MetadataGraph;
use crate::platform::RecordUiRequest;
use crate::runtime::{Color, ComponentElement, Element};

use super::accordion::section_accordion;
use super::container::ContainerProps;
use super::focus::{
    CONTAINER_REGION, PageFocus, TOAST_TTL, TimedToast, Toasts, expire_toasts, toast_stack,
};
use super::object_icon::{IconSize, ObjectIconProps, object_icon};
use super::section_card::{CardProps, section_card};
use super::tabs::section_tabs;

/// Container that lays out the record's visible sections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageMode {
    #[default]
    Accordion,
    Tabs,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized page mode `{0}`, expected Accordion or Tabs")]
pub struct ParsePageModeError(String);

impl PageMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PageMode::Accordion => "Accordion",
            PageMode::Tabs => "Tabs",
        }
    }
}

impl FromStr for PageMode {
    type Err = ParsePageModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "accordion" => Ok(PageMode::Accordion),
            "tabs" => Ok(PageMode::Tabs),
            _ => Err(ParsePageModeError(value.to_string())),
        }
    }
}

impl fmt::Display for PageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageProps {
    pub record_id: String,
    pub object_api_name: String,
    pub mode: PageMode,
    pub icon_size: IconSize,
    pub outer_class: String,
    pub cards: Vec<CardProps>,
}

impl PageProps {
    /// Focusable regions in key order: cards first, then the container. Once
    /// metadata is known, cards that will not render are left out.
    pub fn regions(&self, graph: Option<&MetadataGraph>) -> Vec<String> {
        self.cards
            .iter()
            .filter(|card| {
                graph.is_none_or(|graph| {
                    section_is_displayable(
                        graph,
                        &card.record_id,
                        &card.object_api_name,
                        &card.section_name,
                    )
                })
            })
            .map(CardProps::region)
            .chain(std::iter::once(CONTAINER_REGION.to_string()))
            .collect()
    }
}

/// Page root: record header, configured cards, the section container and the
/// toast overlay. Owns region focus and the toast queue.
pub fn record_page(scope: &mut Scope, props: &PageProps) -> Element {
    let wire = scope.use_record_ui(RecordUiRequest::new(props.record_id.clone()));
    let regions = props.regions(wire.data.as_deref());
    let (focus_index, focus_handle) = scope.use_state(|| 0usize);
    let (toasts, toasts_handle) = scope.use_state(Vec::<TimedToast>::new);
    let editing: Arc<Mutex<Option<String>>> = scope.use_memo((), || Mutex::new(None));

    let focused_region = regions[focus_index.min(regions.len() - 1)].clone();
    scope.provide_context(PageFocus::new(focused_region.clone(), editing.clone()));
    scope.provide_context(Toasts::new(toasts_handle.clone()));

    {
        let dispatcher = scope.dispatcher().clone();
        let count = regions.len();
        let has_toasts = !toasts.is_empty();
        scope.use_event_listener((count, has_toasts), move |event: &FrameworkEvent| {
            if let FrameworkEvent::Tick = event {
                if has_toasts {
                    toasts_handle.update_if(|queue| expire_toasts(queue, Instant::now(), TOAST_TTL));
                }
                return true;
            }
            let Some(key) = pressed_key(event) else {
                return true;
            };
            if editing.lock().is_some() {
                return true;
            }
            match key.code {
                KeyCode::Char('q') if key.modifiers.is_empty() => {
                    debug!("quit requested");
                    dispatcher.shutdown();
                    false
                }
                KeyCode::Tab => {
                    focus_handle.update(|index| *index = (*index + 1) % count);
                    true
                }
                KeyCode::BackTab => {
                    focus_handle.update(|index| *index = index.checked_sub(1).unwrap_or(count - 1));
                    true
                }
                _ => true,
            }
        });
    }

    let header = ComponentElement::with_props(
        "ObjectIcon",
        ObjectIconProps {
            record_id: props.record_id.clone(),
            object_api_name: props.object_api_name.clone(),
            size: props.icon_size,
            label: Some(format!("{} · {}", props.object_api_name, props.record_id)),
        },
        object_icon,
    );

    let mut body: Vec<Element> = vec![header.into()];
    for card in &props.cards {
        body.push(
            ComponentElement::with_props("SectionCard", card.clone(), section_card)
                .key(card.region())
                .into(),
        );
    }
    let container = ContainerProps {
        record_id: props.record_id.clone(),
        object_api_name: props.object_api_name.clone(),
        outer_class: props.outer_class.clone(),
    };
    body.push(match props.mode {
        PageMode::Accordion => {
            ComponentElement::with_props("SectionAccordion", container, section_accordion).into()
        }
        PageMode::Tabs => ComponentElement::with_props("SectionTabs", container, section_tabs).into(),
    });
    body.push(Element::colored_text(
        format!("focus: {focused_region} · Tab next region · q quit"),
        Color::DarkGray,
    ));

    Element::layered(vec![Element::vstack(body), Element::toasts(toast_stack(&toasts))])
}
