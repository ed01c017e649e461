use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hooks::Scope;
use crate::layout::{SectionRequest, section_is_displayable};
use crate::platform::RecordUiRequest;
use crate::runtime::{ComponentElement, Element};

use super::focus::{PageFocus, card_region};
use super::object_icon::{IconSize, ObjectIconProps, object_icon, parse_hex_color};
use super::section::{SectionProps, section};

/// How much of the card header to draw. Left unset, the card shows the
/// section title without the icon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderMode {
    Full,
    #[default]
    #[serde(rename = "No Icon")]
    NoIcon,
    Hidden,
}

impl HeaderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            HeaderMode::Full => "Full",
            HeaderMode::NoIcon => "No Icon",
            HeaderMode::Hidden => "Hidden",
        }
    }

    /// The title is drawn unless hidden, and only for a named section.
    pub fn shows_title(self, section_name: &str) -> bool {
        self != HeaderMode::Hidden && !section_name.is_empty()
    }

    pub fn shows_icon(self) -> bool {
        self == HeaderMode::Full
    }
}

impl fmt::Display for HeaderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardProps {
    pub record_id: String,
    pub object_api_name: String,
    pub section_name: String,
    #[serde(default)]
    pub header_mode: HeaderMode,
    #[serde(default)]
    pub icon_size: IconSize,
    #[serde(default)]
    pub outer_class: String,
}

impl CardProps {
    pub fn new(
        record_id: impl Into<String>,
        object_api_name: impl Into<String>,
        section_name: impl Into<String>,
    ) -> Self {
        Self {
            record_id: record_id.into(),
            object_api_name: object_api_name.into(),
            section_name: section_name.into(),
            header_mode: HeaderMode::default(),
            icon_size: IconSize::default(),
            outer_class: String::new(),
        }
    }

    pub fn region(&self) -> String {
        card_region(&self.section_name)
    }
}

/// A single named section under its own header. Renders nothing unless the
/// section exists in the full view layout and holds a field.
pub fn section_card(scope: &mut Scope, props: &CardProps) -> Element {
    let wire = scope.use_record_ui(RecordUiRequest::new(props.record_id.clone()));
    let Some(graph) = wire.data.as_deref() else {
        return Element::Empty;
    };
    if !section_is_displayable(
        graph,
        &props.record_id,
        &props.object_api_name,
        &props.section_name,
    ) {
        return Element::Empty;
    }

    let region = props.region();
    let focused = scope
        .use_context::<PageFocus>()
        .is_some_and(|focus| focus.is_focused(&region));
    let accent = graph
        .object_infos
        .get(&props.object_api_name)
        .and_then(|object| object.theme_info.as_ref())
        .and_then(|theme| theme.color.as_deref())
        .and_then(parse_hex_color);

    let mut children = Vec::new();
    if props.header_mode.shows_title(&props.section_name) {
        let header = if props.header_mode.shows_icon() {
            ComponentElement::with_props(
                "ObjectIcon",
                ObjectIconProps {
                    record_id: props.record_id.clone(),
                    object_api_name: props.object_api_name.clone(),
                    size: props.icon_size,
                    label: Some(props.section_name.clone()),
                },
                object_icon,
            )
            .into()
        } else {
            Element::strong_text(props.section_name.clone(), accent)
        };
        children.push(header);
    }

    let request = SectionRequest::new(
        props.record_id.clone(),
        props.object_api_name.clone(),
        props.section_name.clone(),
    );
    children.push(
        ComponentElement::with_props(
            "Section",
            SectionProps::new(request, region)
                .outer_class(props.outer_class.clone())
                .focused(focused)
                .show_title(false),
            section,
        )
        .key(props.section_name.clone())
        .into(),
    );
    Element::vstack(children)
}
