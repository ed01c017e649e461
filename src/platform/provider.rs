use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use thiserror::Error;
use tokio::fs;
use tokio::time::sleep;
use tracing::debug;

use crate::metadata::{LayoutMode, LayoutType, MetadataGraph};

/// Parameters of one record-UI fetch.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordUiRequest {
    pub record_id: String,
    pub layout_type: LayoutType,
    pub mode: LayoutMode,
}

impl RecordUiRequest {
    pub fn new(record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            layout_type: LayoutType::Full,
            mode: LayoutMode::View,
        }
    }

    pub fn layout_type(mut self, layout_type: LayoutType) -> Self {
        self.layout_type = layout_type;
        self
    }

    pub fn mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("read metadata from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse metadata in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("The requested resource does not exist: record `{record_id}`")]
    UnknownRecord { record_id: String },
}

/// Source of record-UI metadata.
pub trait MetadataProvider: Send + Sync {
    fn fetch(
        &self,
        request: RecordUiRequest,
    ) -> BoxFuture<'static, Result<Arc<MetadataGraph>, ProviderError>>;
}

/// Reads a record-UI document from disk on every fetch.
#[derive(Clone, Debug)]
pub struct FileMetadataProvider {
    path: PathBuf,
    latency: Duration,
}

impl FileMetadataProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            latency: Duration::ZERO,
        }
    }

    /// Delays every response, which makes the loading spinner observable.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetadataProvider for FileMetadataProvider {
    fn fetch(
        &self,
        request: RecordUiRequest,
    ) -> BoxFuture<'static, Result<Arc<MetadataGraph>, ProviderError>> {
        let path = self.path.clone();
        let latency = self.latency;
        async move {
            if !latency.is_zero() {
                sleep(latency).await;
            }
            let graph = load_graph(&path).await?;
            if graph.records.get(&request.record_id).is_none() {
                return Err(ProviderError::UnknownRecord {
                    record_id: request.record_id,
                });
            }
            debug!(
                record = %request.record_id,
                layout_type = %request.layout_type,
                mode = %request.mode,
                "record ui loaded"
            );
            Ok(Arc::new(graph))
        }
        .boxed()
    }
}

pub(crate) async fn load_graph(path: &Path) -> Result<MetadataGraph, ProviderError> {
    let contents = fs::read_to_string(path)
        .await
        .map_err(|source| ProviderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    MetadataGraph::from_json(&contents).map_err(|source| ProviderError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
