use thiserror::Error;

use super::keys::{LayoutMode, LayoutType};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("record `{record_id}` is not part of the metadata response")]
    UnknownRecord { record_id: String },
    #[error("no object info for `{object_api_name}`")]
    UnknownObject { object_api_name: String },
    #[error("no {layout_type}/{mode} layout for `{object_api_name}` record type `{record_type_id}`")]
    MissingLayout {
        object_api_name: String,
        record_type_id: String,
        layout_type: LayoutType,
        mode: LayoutMode,
    },
    #[error("field `{field}` is not described on `{object_api_name}`")]
    MissingField {
        object_api_name: String,
        field: String,
    },
    #[error("compound field `{field}` points at undescribed parent `{parent}`")]
    MissingCompoundParent { field: String, parent: String },
}
