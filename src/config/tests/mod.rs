use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::tempdir;

use crate::components::{HeaderMode, IconSize, PageMode};
use crate::config::{Overrides, PageConfig};

const SAMPLE: &str = r#"
metadata = "data/record-ui.json"
record_id = "001A000001"
object_api_name = "Account"
mode = "Tabs"
icon_size = "large"
outer_class = "p-1"

[[cards]]
section_name = "Address Information"
header_mode = "No Icon"

[[cards]]
section_name = "System Information"
icon_size = "gigantic"
outer_class = "borderless"

[runtime]
tick_rate_ms = 100
simulated_latency_ms = 300
"#;

#[test]
fn parses_every_section_of_the_file() {
    let config = PageConfig::from_toml(SAMPLE).expect("config parses");

    assert_eq!(config.record_id, "001A000001");
    assert_eq!(config.mode, PageMode::Tabs);
    assert_eq!(config.icon_size, IconSize::Large);
    assert_eq!(config.cards.len(), 2);
    assert_eq!(config.cards[0].header_mode, HeaderMode::NoIcon);
    assert_eq!(config.cards[1].header_mode, HeaderMode::NoIcon);
    assert_eq!(config.cards[1].icon_size, Some(IconSize::Small));
    assert_eq!(config.runtime.tick_rate_ms, 100);
    assert!(config.runtime.watch_metadata);
    assert_eq!(config.simulated_latency(), Duration::from_millis(300));
}

#[test]
fn empty_file_uses_defaults() {
    let config = PageConfig::from_toml("").expect("empty config parses");
    assert_eq!(config, PageConfig::default());
    assert_eq!(config.metadata, PathBuf::from("record-ui.json"));
    assert_eq!(config.mode, PageMode::Accordion);
    assert_eq!(config.app_config().tick_rate, Duration::from_millis(250));
}

#[test]
fn unknown_mode_is_rejected() {
    assert!(PageConfig::from_toml("mode = \"Grid\"").is_err());
}

#[test]
fn cards_inherit_page_values() {
    let config = PageConfig::from_toml(SAMPLE).expect("config parses");
    let props = config.page_props();

    assert_eq!(props.cards[0].record_id, "001A000001");
    assert_eq!(props.cards[0].object_api_name, "Account");
    assert_eq!(props.cards[0].icon_size, IconSize::Large);
    assert_eq!(props.cards[0].outer_class, "p-1");
    assert_eq!(props.cards[1].outer_class, "borderless");
    assert_eq!(props.cards[1].icon_size, IconSize::Small);
}

#[test]
fn overrides_replace_file_values() {
    let mut config = PageConfig::from_toml(SAMPLE).expect("config parses");
    config.apply(Overrides {
        record_id: Some("001A000002".into()),
        mode: Some(PageMode::Accordion),
        ..Overrides::default()
    });

    assert_eq!(config.record_id, "001A000002");
    assert_eq!(config.object_api_name, "Account");
    assert_eq!(config.mode, PageMode::Accordion);
}

#[test]
fn validation_requires_a_record_and_object() {
    let mut config = PageConfig::default();
    assert!(config.validate().is_err());
    config.record_id = "001A000001".into();
    assert!(config.validate().is_err());
    config.object_api_name = "Account".into();
    assert!(config.validate().is_ok());
    config.runtime.tick_rate_ms = 0;
    assert!(config.validate().is_err());
}

#[test]
fn loading_resolves_metadata_next_to_the_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("page.toml");
    fs::write(&path, SAMPLE).expect("write config");

    let config = PageConfig::load(&path).expect("config loads");
    assert_eq!(config.metadata, dir.path().join("data/record-ui.json"));

    let resolved = PageConfig::resolve(Some(&path)).expect("explicit path resolves");
    assert_eq!(resolved, config);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let err = PageConfig::resolve(Some(&dir.path().join("absent.toml")))
        .expect_err("missing file fails");
    assert!(format!("{err:#}").contains("read config"));
}
