//! Edit-mode state of a section and the form drafts it edits.

mod draft;
mod errors;
mod state;
#[cfg(test)]
mod tests;

pub use draft::{FieldDraft, FormDraft};
pub use errors::PanelError;
pub use state::{EditMode, SectionAction, SectionState};
