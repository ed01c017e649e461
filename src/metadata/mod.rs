//! Serde model of the record-UI metadata response and typed lookups into it.

mod error;
mod graph;
mod keys;

pub use error::MetadataError;
pub use graph::{
    ComponentType, DataType, FieldDefinition, Layout, LayoutComponent, LayoutIndex, LayoutItem,
    LayoutRow, MetadataGraph, ObjectInfo, Record, RecordField, RecordTypeInfo, Section, ThemeInfo,
};
pub use keys::{LayoutMode, LayoutType, MASTER_RECORD_TYPE_ID, ParseKeyError};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::MetadataGraph;

    pub(crate) const RECORD_UI_JSON: &str = include_str!("tests/record_ui.json");
    pub(crate) const ACCOUNT_ID: &str = "001A000001";
    pub(crate) const MASTER_ACCOUNT_ID: &str = "001A000002";

    pub(crate) fn record_ui() -> MetadataGraph {
        MetadataGraph::from_json(RECORD_UI_JSON).expect("fixture parses")
    }
}
