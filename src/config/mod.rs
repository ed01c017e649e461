//! Page configuration: a TOML file, located the usual ways, with command
//! line overrides applied on top.

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::components::{CardProps, HeaderMode, IconSize, PageMode, PageProps};
use crate::runtime::AppConfig;

pub const LOCAL_CONFIG: &str = "pagelayout.toml";
const DEFAULT_METADATA: &str = "record-ui.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Record-UI document. Relative paths are read from the config file's
    /// directory.
    pub metadata: PathBuf,
    pub record_id: String,
    pub object_api_name: String,
    pub mode: PageMode,
    pub icon_size: IconSize,
    pub outer_class: String,
    pub cards: Vec<CardConfig>,
    pub runtime: RuntimeConfig,
}

/// A card for one named section. Unset fields inherit the page's values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardConfig {
    pub section_name: String,
    #[serde(default)]
    pub header_mode: HeaderMode,
    #[serde(default)]
    pub icon_size: Option<IconSize>,
    #[serde(default)]
    pub outer_class: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub tick_rate_ms: u64,
    pub watch_metadata: bool,
    /// Delay added to every metadata read, to make loading states visible.
    pub simulated_latency_ms: u64,
}

/// Values given on the command line; each one replaces the file's.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub record_id: Option<String>,
    pub object_api_name: Option<String>,
    pub metadata: Option<PathBuf>,
    pub mode: Option<PageMode>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            metadata: PathBuf::from(DEFAULT_METADATA),
            record_id: String::new(),
            object_api_name: String::new(),
            mode: PageMode::default(),
            icon_size: IconSize::default(),
            outer_class: String::new(),
            cards: Vec::new(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            watch_metadata: true,
            simulated_latency_ms: 0,
        }
    }
}

impl PageConfig {
    /// Config file to read: the explicit path, else `./pagelayout.toml`, else
    /// `<config dir>/pagelayout/config.toml`, whichever exists first.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("pagelayout").join("config.toml"))
            .filter(|path| path.exists())
    }

    /// Loads the located file, or defaults when there is none.
    pub fn resolve(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match Self::locate(explicit) {
            Some(path) => Self::load(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        if config.metadata.is_relative() {
            if let Some(dir) = path.parent() {
                config.metadata = dir.join(&config.metadata);
            }
        }
        debug!(path = %path.display(), metadata = %config.metadata.display(), "config loaded");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(record_id) = overrides.record_id {
            self.record_id = record_id;
        }
        if let Some(object_api_name) = overrides.object_api_name {
            self.object_api_name = object_api_name;
        }
        if let Some(metadata) = overrides.metadata {
            self.metadata = metadata;
        }
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
    }

    /// Fails when the page has nothing to show.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.record_id.trim().is_empty() {
            bail!("no record id configured; set `record_id` or pass --record");
        }
        if self.object_api_name.trim().is_empty() {
            bail!("no object configured; set `object_api_name` or pass --object");
        }
        if self.runtime.tick_rate_ms == 0 {
            bail!("`runtime.tick_rate_ms` must be positive");
        }
        Ok(())
    }

    pub fn page_props(&self) -> PageProps {
        PageProps {
            record_id: self.record_id.clone(),
            object_api_name: self.object_api_name.clone(),
            mode: self.mode,
            icon_size: self.icon_size,
            outer_class: self.outer_class.clone(),
            cards: self.cards.iter().map(|card| self.card_props(card)).collect(),
        }
    }

    fn card_props(&self, card: &CardConfig) -> CardProps {
        let mut props = CardProps::new(
            self.record_id.clone(),
            self.object_api_name.clone(),
            card.section_name.clone(),
        );
        props.header_mode = card.header_mode;
        props.icon_size = card.icon_size.unwrap_or(self.icon_size);
        props.outer_class = card
            .outer_class
            .clone()
            .unwrap_or_else(|| self.outer_class.clone());
        props
    }

    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            tick_rate: Duration::from_millis(self.runtime.tick_rate_ms),
        }
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.runtime.simulated_latency_ms)
    }
}
