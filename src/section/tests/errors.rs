use crate::section::PanelError;

#[test]
fn details_render_as_bullets() {
    let error = PanelError::new("An error occurred while trying to update the record.")
        .detail("You cannot change the phone number for this account")
        .detail("Name is required");

    assert_eq!(
        error.detail_lines(),
        vec![
            "- You cannot change the phone number for this account".to_string(),
            "- Name is required".to_string(),
        ]
    );
    assert_eq!(
        error.to_string(),
        "An error occurred while trying to update the record.\n- You cannot change the phone number for this account\n- Name is required"
    );
}

#[test]
fn empty_panel_error_has_nothing_to_show() {
    assert!(PanelError::default().is_empty());
    assert!(PanelError::new("").is_empty());
    assert!(!PanelError::default().detail("field").is_empty());
}

#[test]
fn from_error_uses_display_text() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "record-ui.json missing");
    let error = PanelError::from_error(&io);
    assert_eq!(error.message.as_deref(), Some("record-ui.json missing"));
    assert!(error.details.is_empty());
}
