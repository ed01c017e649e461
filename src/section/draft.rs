use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::layout::SectionView;
use crate::metadata::Record;

/// Pending value of one editable column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDraft {
    pub field_name: String,
    pub label: String,
    pub required: bool,
    pub value: String,
    /// Cursor position in characters.
    pub cursor: usize,
    original: String,
}

impl FieldDraft {
    pub fn new(
        field_name: impl Into<String>,
        label: impl Into<String>,
        required: bool,
        initial: impl Into<String>,
    ) -> Self {
        let value = initial.into();
        let cursor = value.chars().count();
        Self {
            field_name: field_name.into(),
            label: label.into(),
            required,
            original: value.clone(),
            value,
            cursor,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.value != self.original
    }

    pub fn insert(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.len();
    }

    /// Text before the cursor, used to place the terminal caret.
    pub fn before_cursor(&self) -> &str {
        &self.value[..self.byte_offset(self.cursor)]
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map(|(index, _)| index)
            .unwrap_or(self.value.len())
    }
}

/// Drafts for every editable column of a section, with the focused one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub fields: Vec<FieldDraft>,
    pub focus: usize,
}

impl FormDraft {
    /// Seeds one draft per editable column from the record's current values.
    pub fn from_view(view: &SectionView, record: Option<&Record>) -> Self {
        let fields = view
            .editable_columns()
            .filter_map(|column| {
                let name = column.field_name.as_deref()?;
                let initial = record.map(|record| record.edit_text(name)).unwrap_or_default();
                Some(FieldDraft::new(
                    name,
                    column.label(),
                    column.required.unwrap_or(false),
                    initial,
                ))
            })
            .collect();
        Self { fields, focus: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn focused(&self) -> Option<&FieldDraft> {
        self.fields.get(self.focus)
    }

    pub fn focused_mut(&mut self) -> Option<&mut FieldDraft> {
        self.fields.get_mut(self.focus)
    }

    pub fn draft(&self, field_name: &str) -> Option<&FieldDraft> {
        self.fields.iter().find(|draft| draft.field_name == field_name)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Changed values, in form order.
    pub fn changes(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter(|draft| draft.is_dirty())
            .map(|draft| (draft.field_name.clone(), draft.value.clone()))
            .collect()
    }

    /// Applies an editing key to the form. Returns `false` for keys the form
    /// does not handle so the caller can act on them.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            KeyCode::Left => self.edit(FieldDraft::move_left),
            KeyCode::Right => self.edit(FieldDraft::move_right),
            KeyCode::Home => self.edit(FieldDraft::home),
            KeyCode::End => self.edit(FieldDraft::end),
            KeyCode::Backspace => self.edit(FieldDraft::backspace),
            KeyCode::Delete => self.edit(FieldDraft::delete),
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.edit(|draft| draft.insert(ch))
            }
            _ => return false,
        }
        true
    }

    fn edit(&mut self, apply: impl FnOnce(&mut FieldDraft)) {
        if let Some(draft) = self.focused_mut() {
            apply(draft);
        }
    }
}
