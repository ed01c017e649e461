use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::runtime::{ComponentId, Dispatcher};

pub(crate) type Erased = dyn Any + Send + Sync;
pub type Cleanup = Box<dyn FnOnce() + Send + Sync>;
pub(crate) type SharedSlots = Arc<Mutex<HookSlots>>;

/// Hook slots of every mounted component, keyed by component id.
#[derive(Default)]
pub struct HookRegistry {
    components: Mutex<HashMap<ComponentId, SharedSlots>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn slots_for(&self, id: &ComponentId) -> SharedSlots {
        self.components
            .lock()
            .entry(id.clone())
            .or_default()
            .clone()
    }

    /// Forgets components missing from `live` and runs their effect
    /// cleanups. Cleanups run with no registry lock held.
    pub fn prune(&self, live: &HashSet<ComponentId>) {
        let unmounted: Vec<SharedSlots> = {
            let mut components = self.components.lock();
            let gone: Vec<ComponentId> = components
                .keys()
                .filter(|id| !live.contains(*id))
                .cloned()
                .collect();
            gone.iter().filter_map(|id| components.remove(id)).collect()
        };
        for slots in unmounted {
            let cleanups = slots.lock().unmount();
            cleanups.into_iter().for_each(|cleanup| cleanup());
        }
    }

    /// Runs `f` on the effect at `index` of component `id`, creating the slot
    /// on first use.
    pub fn with_effect<R>(
        &self,
        id: &ComponentId,
        index: usize,
        f: impl FnOnce(&mut EffectSlot) -> R,
    ) -> R {
        let slots = self.slots_for(id);
        let mut slots = slots.lock();
        f(slots.effect(index))
    }
}

/// One component's hooks in call order.
#[derive(Default)]
pub(crate) struct HookSlots {
    slots: Vec<Slot>,
}

impl HookSlots {
    pub(crate) fn at(&mut self, index: usize) -> &mut Slot {
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || Slot::Vacant);
        }
        &mut self.slots[index]
    }

    fn effect(&mut self, index: usize) -> &mut EffectSlot {
        let slot = self.at(index);
        if matches!(slot, Slot::Vacant) {
            *slot = Slot::Effect(EffectSlot::default());
        }
        match slot {
            Slot::Effect(effect) => effect,
            _ => panic!("hook order mismatch: slot {index} is not an effect"),
        }
    }

    fn unmount(&mut self) -> Vec<Cleanup> {
        self.slots
            .drain(..)
            .filter_map(|slot| match slot {
                Slot::Effect(mut effect) => effect.cleanup.take(),
                _ => None,
            })
            .collect()
    }
}

pub(crate) enum Slot {
    Vacant,
    /// `use_state` and `use_ref`: an `Arc<Mutex<T>>`.
    Cell(Box<Erased>),
    /// `use_reducer`: the state cell and the latest reducer.
    Reducer(Box<Erased>),
    Memo(MemoSlot),
    Effect(EffectSlot),
}

pub(crate) struct MemoSlot {
    deps: Box<Erased>,
    value: Box<Erased>,
}

impl MemoSlot {
    pub(crate) fn new<D, T>(deps: D, value: Arc<T>) -> Self
    where
        D: Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        Self {
            deps: Box::new(deps),
            value: Box::new(value),
        }
    }

    /// Cached value, recomputed when `deps` differ from the stored ones.
    /// `None` means the slot holds another type.
    pub(crate) fn get_or_recompute<T, D>(
        &mut self,
        deps: D,
        compute: impl FnOnce() -> T,
    ) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
        D: PartialEq + Send + Sync + 'static,
    {
        let unchanged = self
            .deps
            .downcast_ref::<D>()
            .is_some_and(|stored| stored == &deps);
        if unchanged {
            return self.value.downcast_ref::<Arc<T>>().cloned();
        }
        let value = Arc::new(compute());
        self.deps = Box::new(deps);
        self.value = Box::new(value.clone());
        Some(value)
    }
}

#[derive(Default)]
pub struct EffectSlot {
    deps: Option<Box<Erased>>,
    cleanup: Option<Cleanup>,
}

impl EffectSlot {
    /// True until the effect has run once with deps equal to `deps`.
    pub(crate) fn is_stale<D>(&self, deps: &D) -> bool
    where
        D: PartialEq + 'static,
    {
        !self
            .deps
            .as_ref()
            .and_then(|stored| stored.downcast_ref::<D>())
            .is_some_and(|stored| stored == deps)
    }

    pub(crate) fn take_cleanup(&mut self) -> Option<Cleanup> {
        self.cleanup.take()
    }

    pub(crate) fn record(&mut self, deps: Box<Erased>, cleanup: Option<Cleanup>) {
        self.deps = Some(deps);
        self.cleanup = cleanup;
    }
}

/// An effect queued during render, run once the frame is drawn.
pub struct PendingEffect {
    pub component_id: ComponentId,
    pub slot: usize,
    pub deps: Box<Erased>,
    pub run: Box<dyn FnOnce(Dispatcher) -> Option<Cleanup> + Send + Sync>,
}

impl PendingEffect {
    /// Runs the previous cleanup, then the effect, and stores the new deps and
    /// cleanup in `registry`.
    pub fn apply(self, registry: &HookRegistry, dispatcher: &Dispatcher) {
        let previous = registry.with_effect(&self.component_id, self.slot, EffectSlot::take_cleanup);
        if let Some(cleanup) = previous {
            cleanup();
        }
        let cleanup = (self.run)(dispatcher.clone());
        registry.with_effect(&self.component_id, self.slot, |effect| {
            effect.record(self.deps, cleanup)
        });
    }
}
