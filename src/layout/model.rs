use serde::Serialize;

/// How a field column may be interacted with. A field column carries exactly
/// one of these; placeholders carry none.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldAccess {
    Editable { required: bool },
    ReadOnly,
    Disabled,
}

/// One cell of a section row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub is_field: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_label: Option<String>,
    /// Timestamp shown under the user lookup of an audit column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_date: Option<String>,
    /// Literal text shown instead of a field widget.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_value: Option<String>,
    pub editable: bool,
    pub read_only: bool,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl Column {
    /// Empty cell that keeps the position of a non-field component.
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub(crate) fn field(name: Option<&str>, label: Option<&str>) -> Self {
        Self {
            is_field: true,
            field_name: name.map(str::to_string),
            field_label: label.map(str::to_string),
            ..Self::default()
        }
    }

    pub(crate) fn with_date(mut self, date: &str) -> Self {
        self.field_date = Some(date.to_string());
        self
    }

    pub(crate) fn with_value(mut self, value: &str) -> Self {
        self.field_value = Some(value.to_string());
        self
    }

    pub(crate) fn with_access(mut self, access: FieldAccess) -> Self {
        self.editable = false;
        self.read_only = false;
        self.disabled = false;
        self.required = None;
        match access {
            FieldAccess::Editable { required } => {
                self.editable = true;
                self.required = Some(required);
            }
            FieldAccess::ReadOnly => self.read_only = true,
            FieldAccess::Disabled => self.disabled = true,
        }
        self
    }

    pub fn access(&self) -> Option<FieldAccess> {
        if !self.is_field {
            return None;
        }
        if self.editable {
            Some(FieldAccess::Editable {
                required: self.required.unwrap_or(false),
            })
        } else if self.disabled {
            Some(FieldAccess::Disabled)
        } else {
            Some(FieldAccess::ReadOnly)
        }
    }

    pub fn label(&self) -> &str {
        self.field_label.as_deref().unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    pub columns: Vec<Column>,
}

/// Render-ready form of one layout section.
///
/// `title` is `None` when the section should not be shown at all: the heading
/// was not found, or the section had no rows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub title: Option<String>,
    pub editable: usize,
    pub rows: Vec<Row>,
}

impl SectionView {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_displayed(&self) -> bool {
        self.title.is_some()
    }

    pub fn can_edit(&self) -> bool {
        self.editable > 0
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.rows.iter().flat_map(|row| row.columns.iter())
    }

    /// Editable columns in reading order; this is the field focus order of the form.
    pub fn editable_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns().filter(|column| column.editable)
    }

    /// Widest row; the form grid uses this many columns.
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.columns.len())
            .max()
            .unwrap_or(0)
    }
}
