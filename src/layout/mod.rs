//! Turns page-layout metadata into section view-models.

mod classify;
mod error;
mod extract;
mod model;
mod visibility;
#[cfg(test)]
mod tests;

pub use classify::{FieldContext, classify, field_access};
pub use error::LayoutError;
pub use extract::{SectionRequest, build_section_view, extract_section, find_section};
pub use model::{Column, FieldAccess, Row, SectionView};
pub use visibility::{SectionSummary, section_has_fields, section_is_displayable, visible_sections};
