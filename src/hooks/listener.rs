use tokio::sync::broadcast::error::RecvError;

use crate::events::FrameworkEvent;

use super::scope::Scope;

impl Scope<'_> {
    /// Subscribes `handler` to framework events. The subscription is renewed
    /// whenever `deps` change, so the handler may capture render-time values.
    /// Returning `false` ends the subscription.
    pub fn use_event_listener<D, F>(&mut self, deps: D, handler: F)
    where
        D: PartialEq + Clone + Send + Sync + 'static,
        F: Fn(&FrameworkEvent) -> bool + Send + Sync + 'static,
    {
        self.use_effect(deps, move |dispatcher| {
            let mut events = dispatcher.events().subscribe();
            let handle = tokio::spawn(async move {
                loop {
                    match events.recv().await {
                        Ok(event) => {
                            if !handler(&event) {
                                break;
                            }
                        }
                        Err(RecvError::Lagged(_)) => continue,
                        Err(RecvError::Closed) => break,
                    }
                }
            });
            Some(Box::new(move || handle.abort()))
        });
    }
}
