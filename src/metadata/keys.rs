use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record type id the platform assigns to records of objects without record types.
pub const MASTER_RECORD_TYPE_ID: &str = "012000000000000AAA";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutType {
    #[default]
    Full,
    Compact,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutMode {
    #[default]
    View,
    Edit,
    Create,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized {kind} `{value}`")]
pub struct ParseKeyError {
    kind: &'static str,
    value: String,
}

impl LayoutType {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutType::Full => "Full",
            LayoutType::Compact => "Compact",
        }
    }
}

impl LayoutMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::View => "View",
            LayoutMode::Edit => "Edit",
            LayoutMode::Create => "Create",
        }
    }
}

impl FromStr for LayoutType {
    type Err = ParseKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(LayoutType::Full),
            "compact" => Ok(LayoutType::Compact),
            _ => Err(ParseKeyError {
                kind: "layout type",
                value: value.to_string(),
            }),
        }
    }
}

impl FromStr for LayoutMode {
    type Err = ParseKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "view" => Ok(LayoutMode::View),
            "edit" => Ok(LayoutMode::Edit),
            "create" => Ok(LayoutMode::Create),
            _ => Err(ParseKeyError {
                kind: "layout mode",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
