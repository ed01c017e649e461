use crate::metadata::{FieldDefinition, LayoutComponent, LayoutItem, MetadataError, ObjectInfo};

use super::error::LayoutError;
use super::model::{Column, FieldAccess};

const RECORD_TYPE_FIELD: &str = "RecordTypeId";

/// Describe data a column is resolved against.
#[derive(Clone, Copy, Debug)]
pub struct FieldContext<'a> {
    pub object: &'a ObjectInfo,
    /// Name of the record's record type, when the object describes one.
    pub record_type_name: Option<&'a str>,
}

/// The created/last-modified pairs are shown as a user lookup with its
/// timestamp underneath, whichever of the four fields the layout names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuditField {
    Created,
    LastModified,
}

impl AuditField {
    fn from_api_name(api_name: &str) -> Option<Self> {
        match api_name {
            "CreatedById" | "CreatedDate" => Some(AuditField::Created),
            "LastModifiedById" | "LastModifiedDate" => Some(AuditField::LastModified),
            _ => None,
        }
    }

    fn lookup(self) -> &'static str {
        match self {
            AuditField::Created => "CreatedById",
            AuditField::LastModified => "LastModifiedById",
        }
    }

    fn label(self) -> &'static str {
        match self {
            AuditField::Created => "Created By",
            AuditField::LastModified => "Last Modified By",
        }
    }

    fn date(self) -> &'static str {
        match self {
            AuditField::Created => "CreatedDate",
            AuditField::LastModified => "LastModifiedDate",
        }
    }
}

/// Turns the first component of a layout item into a column.
///
/// Field components resolve in order: compound field (shown as its parent),
/// audit field, record type (shown as literal text), plain field. Anything
/// that is not a field becomes a placeholder.
pub fn classify(
    item: &LayoutItem,
    component: &LayoutComponent,
    context: &FieldContext<'_>,
) -> Result<Column, LayoutError> {
    if !component.is_field() {
        return Ok(Column::placeholder());
    }

    let api_name = component
        .api_name
        .as_deref()
        .ok_or_else(|| LayoutError::UnnamedField {
            label: item.label().unwrap_or_default().to_string(),
        })?;
    let definition = context.object.field(api_name)?;

    let column = if let Some(parent_name) = definition.compound_field_name.as_deref() {
        let parent = compound_parent(context.object, definition, parent_name)?;
        Column::field(Some(&parent.api_name), Some(&parent.label))
    } else if let Some(audit) = AuditField::from_api_name(api_name) {
        Column::field(Some(audit.lookup()), Some(audit.label())).with_date(audit.date())
    } else if let Some(name) = record_type_literal(api_name, context) {
        let label = item.label().unwrap_or(definition.label.as_str());
        // Literal columns are never editable, whatever the layout says.
        return Ok(Column::field(None, Some(label))
            .with_value(name)
            .with_access(FieldAccess::ReadOnly));
    } else {
        let label = item.label().unwrap_or(definition.label.as_str());
        Column::field(Some(&definition.api_name), Some(label))
    };

    Ok(column.with_access(field_access(item, definition)))
}

pub fn field_access(item: &LayoutItem, definition: &FieldDefinition) -> FieldAccess {
    if item.editable_for_update {
        FieldAccess::Editable {
            required: item.required,
        }
    } else if definition.data_type.renders_disabled() {
        FieldAccess::Disabled
    } else {
        FieldAccess::ReadOnly
    }
}

fn compound_parent<'a>(
    object: &'a ObjectInfo,
    definition: &FieldDefinition,
    parent_name: &str,
) -> Result<&'a FieldDefinition, MetadataError> {
    object
        .fields
        .get(parent_name)
        .ok_or_else(|| MetadataError::MissingCompoundParent {
            field: definition.api_name.clone(),
            parent: parent_name.to_string(),
        })
}

fn record_type_literal<'a>(api_name: &str, context: &FieldContext<'a>) -> Option<&'a str> {
    if api_name == RECORD_TYPE_FIELD {
        context.record_type_name
    } else {
        None
    }
}
