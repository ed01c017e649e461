use crate::section::{EditMode, PanelError, SectionAction, SectionState};

#[test]
fn view_to_edit_is_rejected_without_editable_columns() {
    let mut state = SectionState::default();
    assert!(!state.toggle_edit_mode(0));
    assert_eq!(state.mode, EditMode::View);
}

#[test]
fn toggling_clears_the_held_error() {
    let mut state = SectionState {
        error: Some(PanelError::new("stale")),
        ..SectionState::default()
    };
    assert!(state.toggle_edit_mode(3));
    assert_eq!(state.mode, EditMode::Edit);
    assert!(state.error.is_none());

    state.error = Some(PanelError::new("validation"));
    assert!(state.toggle_edit_mode(0));
    assert_eq!(state.mode, EditMode::View);
    assert!(state.error.is_none());
}

#[test]
fn cancel_only_leaves_edit_mode() {
    let mut state = SectionState::default();
    assert!(!state.cancel());

    state.toggle_edit_mode(1);
    state.error = Some(PanelError::new("invalid"));
    assert!(state.cancel());
    assert_eq!(state, SectionState::default());
}

#[test]
fn failed_submission_stays_in_edit_with_error() {
    let mut state = SectionState::default();
    state.toggle_edit_mode(1);
    state.begin_submit();
    assert!(state.display_spinner);

    let error = PanelError::new("An error occurred").detail("Phone is invalid");
    state.submit_failed(error.clone());

    assert!(state.is_editing());
    assert!(!state.display_spinner);
    assert_eq!(state.error, Some(error));
}

#[test]
fn successful_submission_returns_to_view() {
    let mut state = SectionState::default();
    state.toggle_edit_mode(2);
    state.submit_failed(PanelError::new("first attempt"));
    state.begin_submit();
    assert!(state.error.is_none());

    state.submit_succeeded();

    assert_eq!(state.mode, EditMode::View);
    assert!(!state.display_spinner);
    assert!(state.error.is_none());
}

#[test]
fn load_failure_records_error_and_stops_spinner() {
    let mut state = SectionState::default();
    state.begin_load();
    assert!(state.display_spinner);
    state.load_failed(PanelError::new("metadata unavailable"));
    assert!(!state.display_spinner);
    assert!(state.error.is_some());

    state.begin_load();
    state.load_succeeded();
    assert!(state.error.is_none());
}

#[test]
fn reducer_applies_actions_in_order() {
    let mut state = SectionState::default();
    for action in [
        SectionAction::LoadStarted,
        SectionAction::LoadSucceeded,
        SectionAction::ToggleEdit { editable: 0 },
    ] {
        state.reduce(action);
    }
    assert_eq!(state.mode, EditMode::View);

    state.reduce(SectionAction::ToggleEdit { editable: 1 });
    state.reduce(SectionAction::SubmitStarted);
    state.reduce(SectionAction::SubmitFailed(PanelError::new("nope")));
    assert!(state.is_editing());
    state.reduce(SectionAction::Cancel);
    assert_eq!(state, SectionState::default());
}

#[test]
fn entering_edit_twice_stays_in_edit() {
    let mut state = SectionState::default();
    state.reduce(SectionAction::EnterEdit { editable: 2 });
    state.reduce(SectionAction::EnterEdit { editable: 2 });
    assert!(state.is_editing());

    let mut locked = SectionState::default();
    assert!(!locked.enter_edit_mode(0));
    assert_eq!(locked.mode, EditMode::View);
}

#[test]
fn second_submission_is_refused_while_busy() {
    let mut state = SectionState::default();
    assert!(!state.begin_submit());

    state.toggle_edit_mode(1);
    assert!(state.begin_submit());
    assert!(!state.begin_submit());

    state.submit_failed(PanelError::new("rejected"));
    assert!(state.begin_submit());
}

#[test]
fn metadata_refresh_keeps_the_submission_error_in_edit() {
    let error = PanelError::new("Record was not saved").detail("Name is too long");
    let mut state = SectionState::default();
    state.toggle_edit_mode(1);
    state.begin_submit();
    state.submit_failed(error.clone());

    state.reduce(SectionAction::LoadStarted);
    assert!(!state.display_spinner);
    state.reduce(SectionAction::LoadSucceeded);
    state.reduce(SectionAction::LoadFailed(PanelError::new("metadata unavailable")));

    assert!(state.is_editing());
    assert_eq!(state.error, Some(error));
}

#[test]
fn metadata_refresh_leaves_a_pending_save_busy() {
    let mut state = SectionState::default();
    state.toggle_edit_mode(1);
    state.begin_submit();

    state.load_succeeded();
    assert!(state.display_spinner);
}

#[test]
fn entering_edit_drops_a_refresh_spinner() {
    let mut state = SectionState::default();
    state.begin_load();
    assert!(state.enter_edit_mode(1));
    assert!(!state.display_spinner);
}
