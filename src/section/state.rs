use serde::Serialize;

use super::errors::PanelError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum EditMode {
    #[default]
    View,
    Edit,
}

/// Interaction state of one section instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionState {
    pub display_spinner: bool,
    pub mode: EditMode,
    pub error: Option<PanelError>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectionAction {
    ToggleEdit { editable: usize },
    EnterEdit { editable: usize },
    Cancel,
    SubmitStarted,
    SubmitSucceeded,
    SubmitFailed(PanelError),
    LoadStarted,
    LoadSucceeded,
    LoadFailed(PanelError),
}

impl SectionState {
    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Edit
    }

    /// Flips between view and edit. Entering edit needs at least one editable
    /// column and drops a pending refresh spinner; leaving it is always
    /// allowed. Returns whether the mode changed.
    pub fn toggle_edit_mode(&mut self, editable: usize) -> bool {
        let next = match self.mode {
            EditMode::View if editable == 0 => return false,
            EditMode::View => EditMode::Edit,
            EditMode::Edit => EditMode::View,
        };
        self.error = None;
        if next == EditMode::Edit {
            self.display_spinner = false;
        }
        self.mode = next;
        true
    }

    /// View->Edit only. Already editing, or nothing editable, is a no-op.
    pub fn enter_edit_mode(&mut self, editable: usize) -> bool {
        if self.mode == EditMode::Edit {
            return false;
        }
        self.toggle_edit_mode(editable)
    }

    pub fn cancel(&mut self) -> bool {
        if self.mode != EditMode::Edit {
            return false;
        }
        self.error = None;
        self.mode = EditMode::View;
        true
    }

    /// Marks a submission in flight. Refused while one is already pending or
    /// outside edit mode.
    pub fn begin_submit(&mut self) -> bool {
        if self.display_spinner || self.mode != EditMode::Edit {
            return false;
        }
        self.error = None;
        self.display_spinner = true;
        true
    }

    pub fn submit_succeeded(&mut self) {
        self.mode = EditMode::View;
        self.error = None;
        self.display_spinner = false;
    }

    pub fn submit_failed(&mut self, error: PanelError) {
        self.error = Some(error);
        self.display_spinner = false;
    }

    // In edit mode the spinner and the error belong to the submission, so
    // metadata responses leave them alone.

    pub fn begin_load(&mut self) {
        if self.mode == EditMode::View {
            self.display_spinner = true;
        }
    }

    pub fn load_succeeded(&mut self) {
        if self.mode == EditMode::View {
            self.error = None;
            self.display_spinner = false;
        }
    }

    pub fn load_failed(&mut self, error: PanelError) {
        match self.mode {
            EditMode::View => {
                self.error = Some(error);
                self.display_spinner = false;
            }
            EditMode::Edit => {
                self.error.get_or_insert(error);
            }
        }
    }

    /// Reducer form of the transitions, for `Scope::use_reducer`.
    pub fn reduce(&mut self, action: SectionAction) {
        match action {
            SectionAction::ToggleEdit { editable } => {
                self.toggle_edit_mode(editable);
            }
            SectionAction::EnterEdit { editable } => {
                self.enter_edit_mode(editable);
            }
            SectionAction::Cancel => {
                self.cancel();
            }
            SectionAction::SubmitStarted => {
                self.begin_submit();
            }
            SectionAction::SubmitSucceeded => self.submit_succeeded(),
            SectionAction::SubmitFailed(error) => self.submit_failed(error),
            SectionAction::LoadStarted => self.begin_load(),
            SectionAction::LoadSucceeded => self.load_succeeded(),
            SectionAction::LoadFailed(error) => self.load_failed(error),
        }
    }
}
