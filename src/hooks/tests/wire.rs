use std::time::Duration;

use super::Harness;
use crate::metadata::fixtures::{ACCOUNT_ID, record_ui};
use crate::platform::RecordUiRequest;
use crate::platform::testing::StaticProvider;

#[tokio::test]
async fn record_ui_loads_then_settles() {
    let mut harness = Harness::new(StaticProvider::new(record_ui()));
    let request = RecordUiRequest::new(ACCOUNT_ID);

    let first = harness.render(|scope| scope.use_record_ui(request.clone()));
    assert!(!first.is_settled());
    assert!(first.data.is_none());

    harness.next_render().await;
    let loading = harness.render(|scope| scope.use_record_ui(request.clone()));
    if loading.loading {
        harness.next_render().await;
    }
    let settled = harness.render(|scope| scope.use_record_ui(request.clone()));

    assert!(settled.is_settled());
    assert_eq!(settled.version, 1);
    assert!(settled.error.is_none());
    assert!(settled.data.expect("graph").records.contains_key(ACCOUNT_ID));
    assert_eq!(harness.provider.requests().len(), 1);
}

#[tokio::test]
async fn unknown_record_reports_an_error() {
    let mut harness = Harness::new(StaticProvider::new(record_ui()));
    let request = RecordUiRequest::new("001MISSING");

    harness.render(|scope| scope.use_record_ui(request.clone()));
    let mut ui = harness.render(|scope| scope.use_record_ui(request.clone()));
    while !ui.is_settled() {
        harness.next_render().await;
        ui = harness.render(|scope| scope.use_record_ui(request.clone()));
    }

    assert!(ui.data.is_none());
    let error = ui.error.expect("error reported");
    assert!(error.to_string().contains("001MISSING"));
}

#[tokio::test]
async fn revision_bump_refetches_and_drops_the_slow_response() {
    let provider = StaticProvider::new(record_ui());
    provider.queue_latency(Duration::from_millis(200));
    let mut harness = Harness::new(provider);
    let request = RecordUiRequest::new(ACCOUNT_ID);

    harness.render(|scope| scope.use_record_ui(request.clone()));
    harness.platform.bump_revision();
    let mut ui = harness.render(|scope| scope.use_record_ui(request.clone()));
    while !ui.is_settled() {
        harness.next_render().await;
        ui = harness.render(|scope| scope.use_record_ui(request.clone()));
    }

    assert_eq!(harness.provider.requests().len(), 2);
    assert_eq!(ui.version, 1);

    tokio::time::sleep(Duration::from_millis(250)).await;
    let later = harness.render(|scope| scope.use_record_ui(request.clone()));
    assert_eq!(later.version, 1);
}
