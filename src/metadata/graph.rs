use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::MetadataError;
use super::keys::{LayoutMode, LayoutType, MASTER_RECORD_TYPE_ID};

/// `layouts[objectApiName][recordTypeId][layoutType][mode]`
pub type LayoutIndex = HashMap<String, HashMap<String, HashMap<String, HashMap<String, Layout>>>>;

/// Record-UI response for one or more records: the records themselves, the
/// layouts that apply to them and the describe data of their objects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataGraph {
    #[serde(default)]
    pub records: HashMap<String, Record>,
    #[serde(default)]
    pub layouts: LayoutIndex,
    #[serde(default)]
    pub object_infos: HashMap<String, ObjectInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub api_name: Option<String>,
    #[serde(default)]
    pub record_type_id: Option<String>,
    #[serde(default)]
    pub fields: HashMap<String, RecordField>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordField {
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub display_value: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub collapsible: bool,
    #[serde(default)]
    pub columns: Option<u16>,
    #[serde(default)]
    pub use_heading: bool,
    #[serde(default)]
    pub layout_rows: Vec<LayoutRow>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRow {
    #[serde(default)]
    pub layout_items: Vec<LayoutItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutItem {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub editable_for_update: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub layout_components: Vec<LayoutComponent>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutComponent {
    pub component_type: ComponentType,
    #[serde(default)]
    pub api_name: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentType {
    Field,
    EmptySpace,
    Canvas,
    CustomLink,
    ReportChart,
    VisualforcePage,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    #[serde(default)]
    pub api_name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub fields: HashMap<String, FieldDefinition>,
    #[serde(default)]
    pub record_type_infos: HashMap<String, RecordTypeInfo>,
    #[serde(default)]
    pub theme_info: Option<ThemeInfo>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub api_name: String,
    #[serde(default)]
    pub label: String,
    pub data_type: DataType,
    #[serde(default)]
    pub compound_field_name: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub updateable: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Address,
    Base64,
    Boolean,
    ComboBox,
    Currency,
    Date,
    DateTime,
    Double,
    Email,
    EncryptedString,
    Int,
    Location,
    Long,
    MultiPicklist,
    Percent,
    Phone,
    Picklist,
    Reference,
    String,
    TextArea,
    Time,
    Url,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordTypeInfo {
    #[serde(default)]
    pub record_type_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub master: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeInfo {
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl MetadataGraph {
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    pub fn record(&self, record_id: &str) -> Result<&Record, MetadataError> {
        self.records
            .get(record_id)
            .ok_or_else(|| MetadataError::UnknownRecord {
                record_id: record_id.to_string(),
            })
    }

    /// Record type whose layout applies to the record; records without one use
    /// the master record type.
    pub fn record_type_id(&self, record_id: &str) -> Result<&str, MetadataError> {
        let record = self.record(record_id)?;
        Ok(record
            .record_type_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(MASTER_RECORD_TYPE_ID))
    }

    pub fn object_info(&self, object_api_name: &str) -> Result<&ObjectInfo, MetadataError> {
        self.object_infos
            .get(object_api_name)
            .ok_or_else(|| MetadataError::UnknownObject {
                object_api_name: object_api_name.to_string(),
            })
    }

    pub fn sections(
        &self,
        object_api_name: &str,
        record_type_id: &str,
        layout_type: LayoutType,
        mode: LayoutMode,
    ) -> Result<&[Section], MetadataError> {
        self.layouts
            .get(object_api_name)
            .and_then(|by_type| by_type.get(record_type_id))
            .and_then(|by_layout| by_layout.get(layout_type.as_str()))
            .and_then(|by_mode| by_mode.get(mode.as_str()))
            .map(|layout| layout.sections.as_slice())
            .ok_or_else(|| MetadataError::MissingLayout {
                object_api_name: object_api_name.to_string(),
                record_type_id: record_type_id.to_string(),
                layout_type,
                mode,
            })
    }

    /// Sections of the layout that applies to `record_id`.
    pub fn record_sections(
        &self,
        record_id: &str,
        object_api_name: &str,
        layout_type: LayoutType,
        mode: LayoutMode,
    ) -> Result<&[Section], MetadataError> {
        let record_type_id = self.record_type_id(record_id)?;
        self.sections(object_api_name, record_type_id, layout_type, mode)
    }
}

impl Record {
    /// Display text of a field value, empty when the record has no value.
    pub fn display_text(&self, field: &str) -> String {
        self.fields
            .get(field)
            .map(RecordField::display_text)
            .unwrap_or_default()
    }

    /// Text a form field starts from: the raw value for scalars, the display
    /// text otherwise.
    pub fn edit_text(&self, field: &str) -> String {
        self.fields
            .get(field)
            .map(RecordField::edit_text)
            .unwrap_or_default()
    }
}

impl RecordField {
    pub fn edit_text(&self) -> String {
        match &self.value {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            _ => self.display_text(),
        }
    }

    pub fn display_text(&self) -> String {
        if let Some(display) = self.display_value.as_deref() {
            return display.to_string();
        }
        match &self.value {
            Value::Null => String::new(),
            Value::String(text) => text.clone(),
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => number.to_string(),
            // Lookups carry the related record; its Name is what the platform shows.
            Value::Object(map) => map
                .get("fields")
                .and_then(|fields| fields.get("Name"))
                .and_then(|name| name.get("value"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            Value::Array(_) => String::new(),
        }
    }
}

impl Section {
    pub fn heading(&self) -> &str {
        self.heading.as_deref().unwrap_or_default()
    }
}

impl LayoutItem {
    /// Item label when the layout sets a non-empty one.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.is_empty())
    }

    /// Only the first component is read; the rest exist for compound fields.
    pub fn first_component(&self) -> Option<&LayoutComponent> {
        self.layout_components.first()
    }
}

impl LayoutComponent {
    pub fn is_field(&self) -> bool {
        self.component_type == ComponentType::Field
    }
}

impl ObjectInfo {
    pub fn field(&self, api_name: &str) -> Result<&FieldDefinition, MetadataError> {
        self.fields
            .get(api_name)
            .ok_or_else(|| MetadataError::MissingField {
                object_api_name: self.api_name.clone(),
                field: api_name.to_string(),
            })
    }

    pub fn record_type_name(&self, record_type_id: &str) -> Option<&str> {
        self.record_type_infos
            .get(record_type_id)
            .and_then(|info| info.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

impl DataType {
    /// Types the platform's read-only widget cannot show reliably; they are
    /// rendered disabled instead.
    pub fn renders_disabled(self) -> bool {
        matches!(
            self,
            DataType::Picklist | DataType::Reference | DataType::TextArea | DataType::MultiPicklist
        )
    }
}
