use thiserror::Error;

use crate::metadata::MetadataError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error("field component in item `{label}` has no api name")]
    UnnamedField { label: String },
}
