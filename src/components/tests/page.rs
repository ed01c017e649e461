use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::components::{CardProps, HeaderMode, PageMode, PageProps, SUCCESS_TOAST, record_page};
use crate::events::FrameworkEvent;
use crate::metadata::fixtures::{ACCOUNT_ID, record_ui};
use crate::platform::testing::{RecordingSubmitter, StaticProvider};
use crate::platform::{FieldError, Platform, SubmissionError};
use crate::renderer::Renderer;
use crate::runtime::testing::ScriptedDriver;
use crate::runtime::{App, AppMessage, ComponentElement};

const STEP: Duration = Duration::from_millis(40);
const SETTLE: Duration = Duration::from_millis(120);

fn key(code: KeyCode) -> AppMessage {
    AppMessage::ExternalEvent(FrameworkEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

fn tick() -> AppMessage {
    AppMessage::ExternalEvent(FrameworkEvent::Tick)
}

fn page(mode: PageMode, cards: Vec<CardProps>) -> ComponentElement {
    let props = PageProps {
        record_id: ACCOUNT_ID.to_string(),
        object_api_name: "Account".to_string(),
        mode,
        cards,
        ..PageProps::default()
    };
    ComponentElement::with_props("RecordPage", props, record_page)
}

async fn run_page(
    root: ComponentElement,
    submitter: RecordingSubmitter,
    script: Vec<AppMessage>,
) -> Vec<String> {
    let batches = script.into_iter().map(|message| vec![message]).collect();
    run_batches(root, submitter, batches, SETTLE).await.0
}

/// Runs the page over batches of messages. Returns the final screen and how
/// long the loop ran before it stopped.
async fn run_batches(
    root: ComponentElement,
    submitter: RecordingSubmitter,
    batches: Vec<Vec<AppMessage>>,
    settle: Duration,
) -> (Vec<String>, Duration) {
    let platform = Platform::new(StaticProvider::new(record_ui()), submitter);
    let app = App::new("page-test", root, platform)
        .with_driver(ScriptedDriver::batched(batches).paced(STEP, settle));
    let started = Instant::now();
    let renderer = app
        .run_with(Renderer::headless(110, 60).expect("renderer"))
        .await
        .expect("runtime exits cleanly");
    (renderer.lines(), started.elapsed())
}

fn contains(lines: &[String], needle: &str) -> bool {
    lines.iter().any(|line| line.contains(needle))
}

#[tokio::test]
async fn accordion_opens_the_first_visible_section() {
    let lines = run_page(
        page(PageMode::Accordion, Vec::new()),
        RecordingSubmitter::default(),
        vec![tick(), tick()],
    )
    .await;

    assert!(contains(&lines, "▾ Account Information"), "{lines:#?}");
    assert!(contains(&lines, "▸ Address Information"));
    assert!(contains(&lines, "▸ System Information"));
    assert!(contains(&lines, "Acme Corporation"));
    assert!(!contains(&lines, "Custom Links"));
    assert!(!contains(&lines, "Empty Section"));
}

#[tokio::test]
async fn accordion_keys_move_the_open_item() {
    let lines = run_page(
        page(PageMode::Accordion, Vec::new()),
        RecordingSubmitter::default(),
        vec![tick(), key(KeyCode::Down), key(KeyCode::Enter)],
    )
    .await;

    assert!(contains(&lines, "▸ Account Information"), "{lines:#?}");
    assert!(contains(&lines, "▾ Address Information"));
    assert!(contains(&lines, "1 Main St, Springfield"));
}

#[tokio::test]
async fn tabs_mount_only_the_active_section() {
    let lines = run_page(
        page(PageMode::Tabs, Vec::new()),
        RecordingSubmitter::default(),
        vec![tick(), key(KeyCode::Right)],
    )
    .await;

    assert!(contains(&lines, "Account Information"), "{lines:#?}");
    assert!(contains(&lines, "1 Main St, Springfield"));
    assert!(!contains(&lines, "Acme Corporation"));
}

#[tokio::test]
async fn card_shows_a_single_section_under_its_header() {
    let mut card = CardProps::new(ACCOUNT_ID, "Account", "System Information");
    card.header_mode = HeaderMode::NoIcon;
    let missing = CardProps::new(ACCOUNT_ID, "Account", "Custom Links");
    let lines = run_page(
        page(PageMode::Accordion, vec![card, missing]),
        RecordingSubmitter::default(),
        vec![tick(), tick()],
    )
    .await;

    assert!(contains(&lines, "System Information"), "{lines:#?}");
    assert!(contains(&lines, "Dana Admin"));
    assert!(!contains(&lines, "Custom Links"));
    assert!(contains(&lines, "focus: card:System Information"));
}

#[tokio::test]
async fn saving_an_edit_submits_changes_and_shows_a_toast() {
    let submitter = RecordingSubmitter::default();
    let lines = run_page(
        page(PageMode::Accordion, Vec::new()),
        submitter.clone(),
        vec![
            tick(),
            key(KeyCode::Char('e')),
            key(KeyCode::Char('!')),
            key(KeyCode::Enter),
            tick(),
        ],
    )
    .await;

    let submitted = submitter.submitted();
    assert_eq!(submitted.len(), 1, "{lines:#?}");
    assert_eq!(submitted[0].record_id, ACCOUNT_ID);
    assert_eq!(
        submitted[0].values,
        vec![("Name".to_string(), "Acme Corporation!".to_string())]
    );
    assert!(contains(&lines, SUCCESS_TOAST));
    assert!(contains(&lines, "e edit"));
}

#[tokio::test]
async fn rejected_save_keeps_the_form_open_with_errors() {
    let submitter = RecordingSubmitter::default();
    submitter.fail_with(SubmissionError {
        message: "Record was not saved".to_string(),
        field_errors: vec![FieldError {
            field: "Name".to_string(),
            message: "Account Name is too long".to_string(),
        }],
    });
    let lines = run_page(
        page(PageMode::Accordion, Vec::new()),
        submitter.clone(),
        vec![tick(), key(KeyCode::Char('e')), key(KeyCode::Enter), tick()],
    )
    .await;

    assert_eq!(submitter.submitted().len(), 1);
    assert!(contains(&lines, "Record was not saved"), "{lines:#?}");
    assert!(contains(&lines, "- Account Name is too long"));
    assert!(contains(&lines, "Esc cancel"));
    assert!(!contains(&lines, SUCCESS_TOAST));
}

#[tokio::test]
async fn repeated_edit_key_keeps_the_form_open() {
    let (lines, _) = run_batches(
        page(PageMode::Accordion, Vec::new()),
        RecordingSubmitter::default(),
        vec![
            vec![tick()],
            vec![key(KeyCode::Char('e')), key(KeyCode::Char('e'))],
            vec![tick()],
        ],
        SETTLE,
    )
    .await;

    assert!(contains(&lines, "Esc cancel"), "{lines:#?}");
    assert!(!contains(&lines, "e edit"));
}

#[tokio::test]
async fn quit_still_works_after_repeated_edit_and_cancel() {
    let (lines, elapsed) = run_batches(
        page(PageMode::Accordion, Vec::new()),
        RecordingSubmitter::default(),
        vec![
            vec![tick()],
            vec![key(KeyCode::Char('e')), key(KeyCode::Char('e'))],
            vec![key(KeyCode::Esc)],
            vec![key(KeyCode::Char('q'))],
        ],
        Duration::from_secs(3),
    )
    .await;

    assert!(elapsed < Duration::from_secs(2), "quit ignored, ran {elapsed:?}");
    assert!(contains(&lines, "e edit"), "{lines:#?}");
}

#[tokio::test]
async fn repeated_save_key_submits_once() {
    let submitter = RecordingSubmitter::default();
    let lines = run_batches(
        page(PageMode::Accordion, Vec::new()),
        submitter.clone(),
        vec![
            vec![tick()],
            vec![key(KeyCode::Char('e'))],
            vec![key(KeyCode::Char('!'))],
            vec![key(KeyCode::Enter), key(KeyCode::Enter)],
            vec![tick()],
        ],
        SETTLE,
    )
    .await
    .0;

    assert_eq!(submitter.submitted().len(), 1, "{lines:#?}");
    assert!(contains(&lines, SUCCESS_TOAST));
}
