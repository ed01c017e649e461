use std::sync::Arc;

use tokio::sync::mpsc;

use crate::context::ContextStack;
use crate::events::EventBus;
use crate::hooks::{HookRegistry, Scope};
use crate::platform::Platform;
use crate::platform::testing::{RecordingSubmitter, StaticProvider};
use crate::runtime::{AppMessage, ComponentId, Dispatcher};

mod registry;
mod wire;

/// Renders one component repeatedly the way the runtime does: hooks keep
/// their slots between renders and effects run after each render.
pub(super) struct Harness {
    pub(super) registry: HookRegistry,
    pub(super) id: ComponentId,
    pub(super) dispatcher: Dispatcher,
    pub(super) rx: mpsc::Receiver<AppMessage>,
    pub(super) context: ContextStack,
    pub(super) platform: Arc<Platform>,
    pub(super) provider: StaticProvider,
}

impl Harness {
    pub(super) fn new(provider: StaticProvider) -> Self {
        let (tx, rx) = mpsc::channel(64);
        let platform = Platform::new(provider.clone(), RecordingSubmitter::default());
        Self {
            registry: HookRegistry::new(),
            id: ComponentId::new(&[0], "Harness", None),
            dispatcher: Dispatcher::new(tx, EventBus::new(8)),
            rx,
            context: ContextStack::new(),
            platform: Arc::new(platform),
            provider,
        }
    }

    pub(super) fn render<R>(&mut self, render: impl FnOnce(&mut Scope) -> R) -> R {
        let slots = self.registry.slots_for(&self.id);
        let mut scope = Scope::new(
            self.id.clone(),
            slots,
            self.dispatcher.clone(),
            &mut self.context,
            self.platform.clone(),
        );
        let output = render(&mut scope);
        let effects = scope.take_effects();
        let provided = scope.take_provided();
        drop(scope);
        self.context.release(&provided);

        for effect in effects {
            effect.apply(&self.registry, &self.dispatcher);
        }
        output
    }

    /// Waits for the next render request a hook queued.
    pub(super) async fn next_render(&mut self) {
        loop {
            match self.rx.recv().await {
                Some(AppMessage::RequestRender) => return,
                Some(_) => continue,
                None => panic!("dispatcher channel closed"),
            }
        }
    }
}
