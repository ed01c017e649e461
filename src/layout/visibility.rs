use serde::Serialize;

use crate::metadata::{LayoutMode, LayoutType, MetadataGraph, Section};

use super::error::LayoutError;
use super::extract::find_section;

/// Entry of a section list; `id` is the 1-based position in the layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    pub id: usize,
    pub name: String,
}

/// Whether any component anywhere in the section is a field. Standard
/// sections such as custom links hold none and are never offered.
pub fn section_has_fields(section: &Section) -> bool {
    section
        .layout_rows
        .iter()
        .flat_map(|row| row.layout_items.iter())
        .flat_map(|item| item.layout_components.iter())
        .any(|component| component.is_field())
}

pub fn visible_sections(
    graph: &MetadataGraph,
    record_id: &str,
    object_api_name: &str,
    layout_type: LayoutType,
    mode: LayoutMode,
) -> Result<Vec<SectionSummary>, LayoutError> {
    let sections = graph.record_sections(record_id, object_api_name, layout_type, mode)?;
    Ok(sections
        .iter()
        .enumerate()
        .filter(|(_, section)| section_has_fields(section))
        .map(|(index, section)| SectionSummary {
            id: index + 1,
            name: section.heading().to_string(),
        })
        .collect())
}

/// Card check against the full view layout: the first section with this
/// heading exists and holds at least one field.
pub fn section_is_displayable(
    graph: &MetadataGraph,
    record_id: &str,
    object_api_name: &str,
    section_name: &str,
) -> bool {
    if section_name.is_empty() {
        return false;
    }
    graph
        .record_sections(record_id, object_api_name, LayoutType::Full, LayoutMode::View)
        .ok()
        .and_then(|sections| find_section(sections, section_name))
        .map(section_has_fields)
        .unwrap_or(false)
}
