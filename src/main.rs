use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pagelayout::layout::{SectionRequest, extract_section, visible_sections};
use pagelayout::metadata::{LayoutMode, LayoutType, MetadataGraph};
use pagelayout::platform::{FileMetadataProvider, MetadataProvider, RecordUiRequest};
use pagelayout::{App, ComponentElement, Overrides, PageConfig, PageMode, Platform, record_page};

const APP_NAME: &str = "pagelayout";
const DEFAULT_LOG_FILTER: &str = "info,pagelayout=debug";

#[derive(Parser)]
#[command(name = "pagelayout", version, about = "Record pages from page-layout metadata")]
struct Cli {
    /// Config file; defaults to ./pagelayout.toml, then the user config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Record-UI JSON document.
    #[arg(long, global = true)]
    metadata: Option<PathBuf>,
    #[arg(long, global = true)]
    record: Option<String>,
    #[arg(long, global = true)]
    object: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive record page.
    Run {
        /// Accordion or Tabs.
        #[arg(long)]
        mode: Option<PageMode>,
    },
    /// Print one section's view-model as JSON.
    Inspect {
        #[arg(long)]
        section: String,
        #[arg(long, default_value = "Full")]
        layout_type: LayoutType,
        #[arg(long, default_value = "View")]
        mode: LayoutMode,
    },
    /// List the sections that hold fields.
    Sections {
        #[arg(long, default_value = "Full")]
        layout_type: LayoutType,
        #[arg(long, default_value = "View")]
        mode: LayoutMode,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging()?;

    let mut config = PageConfig::resolve(cli.config.as_deref())?;
    config.apply(Overrides {
        record_id: cli.record,
        object_api_name: cli.object,
        metadata: cli.metadata,
        mode: match &cli.command {
            Some(Command::Run { mode }) => *mode,
            _ => None,
        },
    });
    config.validate()?;

    match cli.command.unwrap_or(Command::Run { mode: None }) {
        Command::Run { .. } => run(config, log_path).await,
        Command::Inspect {
            section,
            layout_type,
            mode,
        } => {
            let graph = fetch(&config, layout_type, mode).await?;
            let request = SectionRequest::new(
                config.record_id.clone(),
                config.object_api_name.clone(),
                section,
            )
            .layout_type(layout_type)
            .mode(mode);
            let view = extract_section(&graph, &request)?;
            println!("{}", serde_json::to_string_pretty(&view)?);
            Ok(())
        }
        Command::Sections { layout_type, mode } => {
            let graph = fetch(&config, layout_type, mode).await?;
            let sections = visible_sections(
                &graph,
                &config.record_id,
                &config.object_api_name,
                layout_type,
                mode,
            )?;
            for section in sections {
                println!("{:>3}  {}", section.id, section.name);
            }
            Ok(())
        }
    }
}

async fn run(config: PageConfig, log_path: PathBuf) -> anyhow::Result<()> {
    info!(
        record = %config.record_id,
        object = %config.object_api_name,
        mode = %config.mode,
        metadata = %config.metadata.display(),
        log = %log_path.display(),
        "opening record page"
    );
    let platform = Platform::file_backed(&config.metadata, config.simulated_latency());
    let root = ComponentElement::with_props("RecordPage", config.page_props(), record_page);
    let mut app = App::new(APP_NAME, root, platform).with_config(config.app_config());
    if config.runtime.watch_metadata {
        app = app.watch_metadata(&config.metadata);
    }
    app.run().await
}

async fn fetch(
    config: &PageConfig,
    layout_type: LayoutType,
    mode: LayoutMode,
) -> anyhow::Result<std::sync::Arc<MetadataGraph>> {
    let provider = FileMetadataProvider::new(&config.metadata);
    let request = RecordUiRequest::new(config.record_id.clone())
        .layout_type(layout_type)
        .mode(mode);
    provider
        .fetch(request)
        .await
        .with_context(|| format!("load metadata for record {}", config.record_id))
}

/// Logs go to a file; the terminal belongs to the page.
fn init_logging() -> anyhow::Result<PathBuf> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_NAME);
    fs::create_dir_all(&dir).with_context(|| format!("create log dir {}", dir.display()))?;
    let path = dir.join("pagelayout.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Ok(path)
}
