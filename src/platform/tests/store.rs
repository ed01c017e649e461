use std::io::Write;

use tempfile::NamedTempFile;

use crate::metadata::MetadataGraph;
use crate::metadata::fixtures::{ACCOUNT_ID, RECORD_UI_JSON, record_ui};
use crate::platform::{
    FieldError, FileRecordStore, RecordSubmitter, SubmissionError, SubmitRequest, UPDATE_FAILED,
    validate,
};
use crate::section::PanelError;

fn fixture_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(RECORD_UI_JSON.as_bytes()).expect("write fixture");
    file
}

fn request(values: &[(&str, &str)]) -> SubmitRequest {
    SubmitRequest {
        record_id: ACCOUNT_ID.to_string(),
        object_api_name: "Account".to_string(),
        values: values
            .iter()
            .map(|(field, value)| (field.to_string(), value.to_string()))
            .collect(),
    }
}

#[tokio::test]
async fn successful_save_writes_values_back() {
    let file = fixture_file();
    let store = FileRecordStore::new(file.path());

    store
        .submit(request(&[("Phone", "555-0199"), ("AnnualRevenue", "2000000")]))
        .await
        .expect("save succeeds");

    let contents = std::fs::read_to_string(file.path()).expect("read back");
    let graph = MetadataGraph::from_json(&contents).expect("still valid");
    let record = graph.record(ACCOUNT_ID).expect("record");
    assert_eq!(record.display_text("Phone"), "555-0199");
    assert_eq!(record.display_text("AnnualRevenue"), "2000000.0");
    assert_eq!(record.display_text("Name"), "Acme Corporation");
}

#[tokio::test]
async fn invalid_values_leave_the_document_untouched() {
    let file = fixture_file();
    let store = FileRecordStore::new(file.path());

    let err = store
        .submit(request(&[("Name", "  "), ("AnnualRevenue", "lots")]))
        .await
        .unwrap_err();

    assert_eq!(err.message, UPDATE_FAILED);
    assert_eq!(
        err.field_errors,
        vec![
            FieldError {
                field: "Name".into(),
                message: "Account Name: Complete this field.".into(),
            },
            FieldError {
                field: "AnnualRevenue".into(),
                message: "Annual Revenue: Enter a valid number.".into(),
            },
        ]
    );
    let contents = std::fs::read_to_string(file.path()).expect("read back");
    assert_eq!(contents, RECORD_UI_JSON);
}

#[test]
fn validation_reports_unknown_fields_and_records() {
    let graph = record_ui();

    let err = validate(&graph, &request(&[("Legacy__c", "x")])).unwrap_err();
    assert_eq!(err.field_errors.len(), 1);
    assert_eq!(err.field_errors[0].field, "Legacy__c");

    let mut missing = request(&[("Phone", "1")]);
    missing.record_id = "001MISSING".into();
    let err = validate(&graph, &missing).unwrap_err();
    assert!(err.field_errors.is_empty());
    assert!(err.message.contains("001MISSING"));
}

#[test]
fn optional_blank_values_clear_the_field() {
    let graph = record_ui();
    let updates = validate(&graph, &request(&[("Phone", "")])).expect("valid");
    assert_eq!(updates, vec![("Phone".to_string(), serde_json::Value::Null)]);
}

#[test]
fn submission_error_converts_to_panel_error() {
    let error = SubmissionError {
        message: UPDATE_FAILED.into(),
        field_errors: vec![FieldError {
            field: "Phone".into(),
            message: "You cannot change the phone number for this account".into(),
        }],
    };

    let panel = PanelError::from(&error);

    assert_eq!(panel.message.as_deref(), Some(UPDATE_FAILED));
    assert_eq!(
        panel.detail_lines(),
        vec!["- You cannot change the phone number for this account".to_string()]
    );
}

#[tokio::test]
async fn empty_submission_does_not_rewrite_the_document() {
    let file = fixture_file();
    let store = FileRecordStore::new(file.path());

    store.submit(request(&[])).await.expect("nothing to save");

    let contents = std::fs::read_to_string(file.path()).expect("read back");
    assert_eq!(contents, RECORD_UI_JSON);
}
