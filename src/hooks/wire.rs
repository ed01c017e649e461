use std::sync::Arc;

use tracing::{trace, warn};

use crate::metadata::MetadataGraph;
use crate::platform::{ProviderError, RecordUiRequest};

use super::scope::Scope;

/// Latest record-UI response seen by a component.
#[derive(Clone, Debug, Default)]
pub struct RecordUi {
    pub loading: bool,
    pub data: Option<Arc<MetadataGraph>>,
    pub error: Option<Arc<ProviderError>>,
    /// Bumped on every settled fetch; derived values key their memos on it.
    pub version: u64,
}

impl RecordUi {
    pub fn is_settled(&self) -> bool {
        !self.loading && (self.data.is_some() || self.error.is_some())
    }
}

impl Scope<'_> {
    /// Fetches record-UI metadata for `request` and refetches whenever the
    /// request or the platform revision changes. A response that arrives
    /// after a newer fetch started is dropped.
    pub fn use_record_ui(&mut self, request: RecordUiRequest) -> RecordUi {
        let (state, handle) = self.use_state(RecordUi::default);
        let generation = self.use_ref(|| 0u64);
        let revision = self.platform().revision();
        let provider = self.platform().provider();
        let component = self.component_id().clone();

        self.use_effect((request.clone(), revision), move |_| {
            let ticket = generation.with_mut(|current| {
                *current += 1;
                *current
            });
            handle.update(|ui| ui.loading = true);
            let fetch = provider.fetch(request);
            let task = tokio::spawn(async move {
                let outcome = fetch.await;
                if generation.with(|current| *current) != ticket {
                    trace!(component = %component, ticket, "stale record ui response dropped");
                    return;
                }
                handle.update(|ui| {
                    ui.loading = false;
                    ui.version += 1;
                    match outcome {
                        Ok(graph) => {
                            ui.data = Some(graph);
                            ui.error = None;
                        }
                        Err(err) => {
                            warn!(component = %component, error = %err, "record ui fetch failed");
                            ui.data = None;
                            ui.error = Some(Arc::new(err));
                        }
                    }
                });
            });
            let abort = task.abort_handle();
            Some(Box::new(move || abort.abort()))
        });

        state
    }
}
