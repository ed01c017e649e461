use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::metadata::{LayoutMode, LayoutType, MetadataGraph, Section};

use super::classify::{FieldContext, classify};
use super::error::LayoutError;
use super::model::{Row, SectionView};

/// Which section of which record to extract.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    pub record_id: String,
    pub object_api_name: String,
    pub section_name: String,
    #[serde(default)]
    pub layout_type: LayoutType,
    #[serde(default)]
    pub mode: LayoutMode,
}

impl SectionRequest {
    pub fn new(
        record_id: impl Into<String>,
        object_api_name: impl Into<String>,
        section_name: impl Into<String>,
    ) -> Self {
        Self {
            record_id: record_id.into(),
            object_api_name: object_api_name.into(),
            section_name: section_name.into(),
            layout_type: LayoutType::default(),
            mode: LayoutMode::default(),
        }
    }

    pub fn layout_type(mut self, layout_type: LayoutType) -> Self {
        self.layout_type = layout_type;
        self
    }

    pub fn mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Builds the view-model of the first section whose heading equals the
/// requested name. Later sections with the same heading are never read.
pub fn extract_section(
    graph: &MetadataGraph,
    request: &SectionRequest,
) -> Result<SectionView, LayoutError> {
    let record_type_id = graph.record_type_id(&request.record_id)?;
    let sections = graph.sections(
        &request.object_api_name,
        record_type_id,
        request.layout_type,
        request.mode,
    )?;
    let object = graph.object_info(&request.object_api_name)?;

    let Some(section) = find_section(sections, &request.section_name) else {
        debug!(
            section = %request.section_name,
            object = %request.object_api_name,
            "section not present in layout"
        );
        return Ok(SectionView::empty());
    };

    let context = FieldContext {
        object,
        record_type_name: object.record_type_name(record_type_id),
    };
    Ok(build_section_view(section, &context))
}

pub fn find_section<'a>(sections: &'a [Section], name: &str) -> Option<&'a Section> {
    sections
        .iter()
        .find(|section| section.heading.as_deref() == Some(name))
}

/// Walks rows, items and first components. Items without components produce
/// no column; columns whose metadata cannot be resolved are logged and
/// dropped.
pub fn build_section_view(section: &Section, context: &FieldContext<'_>) -> SectionView {
    if section.layout_rows.is_empty() {
        return SectionView::empty();
    }

    let mut editable = 0;
    let mut rows = Vec::with_capacity(section.layout_rows.len());
    for layout_row in &section.layout_rows {
        let mut row = Row::default();
        for item in &layout_row.layout_items {
            let Some(component) = item.first_component() else {
                continue;
            };
            match classify(item, component, context) {
                Ok(column) => {
                    if column.editable {
                        editable += 1;
                    }
                    row.columns.push(column);
                }
                Err(err) => warn!(
                    section = section.heading(),
                    error = %err,
                    "skipping column with unresolved metadata"
                ),
            }
        }
        rows.push(row);
    }

    SectionView {
        title: section.heading.clone(),
        editable,
        rows,
    }
}
