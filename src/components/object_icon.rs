use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hooks::Scope;
use crate::metadata::MetadataGraph;
use crate::platform::RecordUiRequest;
use crate::runtime::{Color, Element, IconNode};

/// Badge size. Anything other than the recognized names is `Small`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IconSize {
    XSmall,
    #[default]
    Small,
    Medium,
    Large,
}

impl IconSize {
    pub fn as_str(self) -> &'static str {
        match self {
            IconSize::XSmall => "x-small",
            IconSize::Small => "small",
            IconSize::Medium => "medium",
            IconSize::Large => "large",
        }
    }

    /// Badge width in terminal cells.
    pub fn width(self) -> u16 {
        match self {
            IconSize::XSmall => 2,
            IconSize::Small => 4,
            IconSize::Medium => 6,
            IconSize::Large => 8,
        }
    }
}

impl From<&str> for IconSize {
    fn from(value: &str) -> Self {
        match value {
            "x-small" => IconSize::XSmall,
            "medium" => IconSize::Medium,
            "large" => IconSize::Large,
            _ => IconSize::Small,
        }
    }
}

impl From<String> for IconSize {
    fn from(value: String) -> Self {
        IconSize::from(value.as_str())
    }
}

impl From<IconSize> for String {
    fn from(value: IconSize) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectIconProps {
    pub record_id: String,
    pub object_api_name: String,
    pub size: IconSize,
    pub label: Option<String>,
}

pub fn object_icon(scope: &mut Scope, props: &ObjectIconProps) -> Element {
    let wire = scope.use_record_ui(RecordUiRequest::new(props.record_id.clone()));
    let mut node = icon_node(wire.data.as_deref(), &props.object_api_name, props.size);
    node.label = props.label.clone();
    Element::icon(node)
}

/// Badge for the object: initials from the theme icon, or from the object
/// name while no theme is known, on the theme color.
pub fn icon_node(graph: Option<&MetadataGraph>, object_api_name: &str, size: IconSize) -> IconNode {
    let theme = graph
        .and_then(|graph| graph.object_infos.get(object_api_name))
        .and_then(|object| object.theme_info.as_ref());
    let source = theme
        .and_then(|theme| theme.icon_url.as_deref())
        .and_then(icon_name)
        .unwrap_or(object_api_name);
    IconNode {
        glyph: initials(source, size),
        background: theme
            .and_then(|theme| theme.color.as_deref())
            .and_then(parse_hex_color),
        width: size.width(),
        label: None,
    }
}

/// `.../standard/account_120.png` -> `account`
fn icon_name(url: &str) -> Option<&str> {
    let file = url.rsplit('/').next()?;
    let stem = file.split('.').next()?;
    let name = stem.split('_').next()?;
    (!name.is_empty()).then_some(name)
}

fn initials(source: &str, size: IconSize) -> String {
    let letters = if size == IconSize::XSmall { 1 } else { 2 };
    source
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .take(letters)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Theme colors come as six hex digits, with or without a leading `#`.
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
