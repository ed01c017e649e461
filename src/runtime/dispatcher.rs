use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::trace;

use crate::events::{EventBus, FrameworkEvent};

#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<AppMessage>,
    event_bus: EventBus,
}

impl Dispatcher {
    pub(crate) fn new(tx: mpsc::Sender<AppMessage>, event_bus: EventBus) -> Self {
        Self { tx, event_bus }
    }

    pub fn request_render(&self) {
        self.send(AppMessage::RequestRender, "render request");
    }

    /// Asks the runtime loop to stop after the current message.
    pub fn shutdown(&self) {
        self.send(AppMessage::Shutdown, "shutdown request");
    }

    pub fn events(&self) -> EventBus {
        self.event_bus.clone()
    }

    fn send(&self, message: AppMessage, what: &'static str) {
        match self.tx.try_send(message) {
            Ok(_) => trace!(what, "message queued"),
            Err(TrySendError::Full(_)) => trace!(what, "message dropped because channel is full"),
            Err(TrySendError::Closed(_)) => trace!(what, "message dropped because channel closed"),
        }
    }
}

#[derive(Clone, Debug)]
pub enum AppMessage {
    RequestRender,
    ExternalEvent(FrameworkEvent),
    Shutdown,
    /// The watched metadata document changed on disk.
    MetadataChanged,
}
