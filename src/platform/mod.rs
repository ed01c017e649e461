//! Collaborators the page talks to: where metadata comes from and where
//! edited records go.

mod provider;
mod store;
#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub use provider::{FileMetadataProvider, MetadataProvider, ProviderError, RecordUiRequest};
pub use store::{
    FieldError, FileRecordStore, RecordSubmitter, SubmissionError, SubmitRequest, UPDATE_FAILED,
    validate,
};

/// Provider and submitter shared by every component, plus a revision counter
/// that invalidates fetched metadata.
#[derive(Clone)]
pub struct Platform {
    provider: Arc<dyn MetadataProvider>,
    submitter: Arc<dyn RecordSubmitter>,
    revision: Arc<AtomicU64>,
}

impl Platform {
    pub fn new<P, S>(provider: P, submitter: S) -> Self
    where
        P: MetadataProvider + 'static,
        S: RecordSubmitter + 'static,
    {
        Self {
            provider: Arc::new(provider),
            submitter: Arc::new(submitter),
            revision: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Provider and store over the same record-UI document.
    pub fn file_backed(path: impl Into<PathBuf>, latency: Duration) -> Self {
        let path = path.into();
        Self::new(
            FileMetadataProvider::new(path.clone()).with_latency(latency),
            FileRecordStore::new(path),
        )
    }

    pub fn provider(&self) -> Arc<dyn MetadataProvider> {
        self.provider.clone()
    }

    pub fn submitter(&self) -> Arc<dyn RecordSubmitter> {
        self.submitter.clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Marks fetched metadata stale; returns the new revision.
    pub fn bump_revision(&self) -> u64 {
        self.revision.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// In-memory collaborators for component and hook tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::time::Duration;

    use futures::FutureExt;
    use futures::future::BoxFuture;
    use parking_lot::Mutex;
    use tokio::time::sleep;

    use crate::metadata::MetadataGraph;

    use super::{
        MetadataProvider, ProviderError, RecordSubmitter, RecordUiRequest, SubmissionError,
        SubmitRequest,
    };

    /// Serves one graph, optionally delaying each response by the next queued
    /// latency.
    #[derive(Clone, Default)]
    pub(crate) struct StaticProvider {
        graph: Arc<Mutex<Option<Arc<MetadataGraph>>>>,
        latencies: Arc<Mutex<VecDeque<Duration>>>,
        requests: Arc<Mutex<Vec<RecordUiRequest>>>,
    }

    impl StaticProvider {
        pub(crate) fn new(graph: MetadataGraph) -> Self {
            let provider = Self::default();
            provider.replace(graph);
            provider
        }

        pub(crate) fn replace(&self, graph: MetadataGraph) {
            *self.graph.lock() = Some(Arc::new(graph));
        }

        pub(crate) fn queue_latency(&self, latency: Duration) {
            self.latencies.lock().push_back(latency);
        }

        pub(crate) fn requests(&self) -> Vec<RecordUiRequest> {
            self.requests.lock().clone()
        }
    }

    impl MetadataProvider for StaticProvider {
        fn fetch(
            &self,
            request: RecordUiRequest,
        ) -> BoxFuture<'static, Result<Arc<MetadataGraph>, ProviderError>> {
            self.requests.lock().push(request.clone());
            let latency = self.latencies.lock().pop_front();
            let graph = self.graph.lock().clone();
            async move {
                if let Some(latency) = latency {
                    sleep(latency).await;
                }
                match graph {
                    Some(graph) if graph.records.contains_key(&request.record_id) => Ok(graph),
                    _ => Err(ProviderError::UnknownRecord {
                        record_id: request.record_id,
                    }),
                }
            }
            .boxed()
        }
    }

    /// Records submissions and answers with a scripted outcome.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingSubmitter {
        submitted: Arc<Mutex<Vec<SubmitRequest>>>,
        failure: Arc<Mutex<Option<SubmissionError>>>,
    }

    impl RecordingSubmitter {
        pub(crate) fn fail_with(&self, error: SubmissionError) {
            *self.failure.lock() = Some(error);
        }

        pub(crate) fn submitted(&self) -> Vec<SubmitRequest> {
            self.submitted.lock().clone()
        }
    }

    impl RecordSubmitter for RecordingSubmitter {
        fn submit(&self, request: SubmitRequest) -> BoxFuture<'static, Result<(), SubmissionError>> {
            self.submitted.lock().push(request);
            let outcome = match self.failure.lock().clone() {
                Some(error) => Err(error),
                None => Ok(()),
            };
            async move { outcome }.boxed()
        }
    }
}
