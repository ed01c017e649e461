use std::fmt;

/// Error shown above a section form: a top-level message plus granular
/// per-field messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PanelError {
    pub message: Option<String>,
    pub details: Vec<String>,
}

impl PanelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            details: Vec::new(),
        }
    }

    pub fn from_error(error: &dyn fmt::Display) -> Self {
        Self::new(error.to_string())
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.message.as_deref().map(str::is_empty).unwrap_or(true) && self.details.is_empty()
    }

    /// Details as they appear in the panel, one bullet per message.
    pub fn detail_lines(&self) -> Vec<String> {
        self.details
            .iter()
            .map(|detail| format!("- {detail}"))
            .collect()
    }
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = &self.message {
            f.write_str(message)?;
        }
        for line in self.detail_lines() {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}
