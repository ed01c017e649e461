use std::any::TypeId;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::context::ContextStack;
use crate::platform::Platform;
use crate::runtime::{ComponentId, Dispatcher};

use super::handles::{ReducerDispatch, ReducerFn, RefHandle, StateHandle};
use super::registry::{Cleanup, EffectSlot, MemoSlot, PendingEffect, SharedSlots, Slot};

/// Per-render handle a component uses to reach its hooks, the context
/// provided by its ancestors and the shared platform.
pub struct Scope<'a> {
    component_id: ComponentId,
    slots: SharedSlots,
    dispatcher: Dispatcher,
    hook_cursor: usize,
    context: &'a mut ContextStack,
    provided: Vec<TypeId>,
    pending_effects: Vec<PendingEffect>,
    platform: Arc<Platform>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(
        component_id: ComponentId,
        slots: SharedSlots,
        dispatcher: Dispatcher,
        context: &'a mut ContextStack,
        platform: Arc<Platform>,
    ) -> Self {
        Self {
            component_id,
            slots,
            dispatcher,
            hook_cursor: 0,
            context,
            provided: Vec::new(),
            pending_effects: Vec::new(),
            platform,
        }
    }

    pub fn use_state<T, F>(&mut self, init: F) -> (T, StateHandle<T>)
    where
        T: Clone + Send + 'static,
        F: FnOnce() -> T,
    {
        let shared = self.cell(init, "use_state");
        let value = shared.lock().clone();
        let handle = StateHandle::new(shared, self.dispatcher.clone());
        (value, handle)
    }

    pub fn use_effect<D, F>(&mut self, deps: D, effect: F)
    where
        D: PartialEq + Clone + Send + Sync + 'static,
        F: FnOnce(Dispatcher) -> Option<Cleanup> + Send + Sync + 'static,
    {
        let index = self.next_index();
        let stale = {
            let mut slots = self.slots.lock();
            let slot = slots.at(index);
            match slot {
                Slot::Vacant => {
                    *slot = Slot::Effect(EffectSlot::default());
                    true
                }
                Slot::Effect(effect) => effect.is_stale(&deps),
                _ => panic!("use_effect hook order mismatch"),
            }
        };
        if stale {
            self.pending_effects.push(PendingEffect {
                component_id: self.component_id.clone(),
                slot: index,
                deps: Box::new(deps),
                run: Box::new(effect),
            });
        }
    }

    /// Makes `value` visible to this component's subtree.
    pub fn provide_context<T>(&mut self, value: T)
    where
        T: Send + Sync + 'static,
    {
        let type_id = self.context.provide(value);
        self.provided.push(type_id);
    }

    pub fn use_context<T>(&self) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        self.context.get::<T>()
    }

    pub fn use_memo<T, D, F>(&mut self, deps: D, compute: F) -> Arc<T>
    where
        T: Send + Sync + 'static,
        D: PartialEq + Clone + Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let index = self.next_index();
        let mut slots = self.slots.lock();
        let slot = slots.at(index);
        match slot {
            Slot::Vacant => {
                let value = Arc::new(compute());
                *slot = Slot::Memo(MemoSlot::new(deps, value.clone()));
                value
            }
            Slot::Memo(memo) => memo
                .get_or_recompute(deps, compute)
                .expect("use_memo hook order mismatch"),
            _ => panic!("use_memo hook order mismatch"),
        }
    }

    pub fn use_reducer<S, A, Init, R>(
        &mut self,
        init: Init,
        reducer: R,
    ) -> (S, ReducerDispatch<S, A>)
    where
        S: Clone + Send + 'static,
        A: Send + 'static,
        Init: FnOnce() -> S,
        R: Fn(&mut S, A) + Send + Sync + 'static,
    {
        let index = self.next_index();
        let (shared, driver) = {
            let mut slots = self.slots.lock();
            let slot = slots.at(index);
            match slot {
                Slot::Vacant => {
                    let state = Arc::new(Mutex::new(init()));
                    let reducer = into_reducer_arc(reducer);
                    *slot = Slot::Reducer(Box::new(ReducerEntry::new(
                        state.clone(),
                        reducer.clone(),
                    )));
                    (state, reducer)
                }
                Slot::Reducer(entry) => {
                    let entry = entry
                        .downcast_mut::<ReducerEntry<S, A>>()
                        .expect("use_reducer hook order mismatch");
                    let reducer = into_reducer_arc(reducer);
                    entry.update_reducer(reducer.clone());
                    (entry.state.clone(), entry.reducer.clone())
                }
                _ => panic!("use_reducer hook order mismatch"),
            }
        };
        let value = shared.lock().clone();
        let handle = ReducerDispatch::new(shared, driver, self.dispatcher.clone());
        (value, handle)
    }

    pub fn use_ref<T, Init>(&mut self, init: Init) -> RefHandle<T>
    where
        T: Send + 'static,
        Init: FnOnce() -> T,
    {
        let shared = self.cell(init, "use_ref");
        RefHandle::new(shared)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn platform(&self) -> &Arc<Platform> {
        &self.platform
    }

    pub fn component_id(&self) -> &ComponentId {
        &self.component_id
    }

    pub(crate) fn take_effects(&mut self) -> Vec<PendingEffect> {
        std::mem::take(&mut self.pending_effects)
    }

    /// Context types this component pushed; released after its subtree renders.
    pub(crate) fn take_provided(&mut self) -> Vec<TypeId> {
        std::mem::take(&mut self.provided)
    }

    /// Shared cell behind `use_state` and `use_ref`.
    fn cell<T, Init>(&mut self, init: Init, hook: &str) -> Arc<Mutex<T>>
    where
        T: Send + 'static,
        Init: FnOnce() -> T,
    {
        let index = self.next_index();
        let mut slots = self.slots.lock();
        let slot = slots.at(index);
        match slot {
            Slot::Vacant => {
                let cell = Arc::new(Mutex::new(init()));
                *slot = Slot::Cell(Box::new(cell.clone()));
                cell
            }
            Slot::Cell(cell) => match cell.downcast_ref::<Arc<Mutex<T>>>() {
                Some(cell) => cell.clone(),
                None => panic!("{hook} hook order mismatch"),
            },
            _ => panic!("{hook} hook order mismatch"),
        }
    }

    fn next_index(&mut self) -> usize {
        let current = self.hook_cursor;
        self.hook_cursor += 1;
        current
    }
}

struct ReducerEntry<S: Send + 'static, A: Send + 'static> {
    state: Arc<Mutex<S>>,
    reducer: Arc<ReducerFn<S, A>>,
}

impl<S: Send + 'static, A: Send + 'static> ReducerEntry<S, A> {
    fn new(state: Arc<Mutex<S>>, reducer: Arc<ReducerFn<S, A>>) -> Self {
        Self { state, reducer }
    }

    fn update_reducer(&mut self, reducer: Arc<ReducerFn<S, A>>) {
        self.reducer = reducer;
    }
}

fn into_reducer_arc<S, A, R>(reducer: R) -> Arc<ReducerFn<S, A>>
where
    S: Send + 'static,
    A: Send + 'static,
    R: Fn(&mut S, A) + Send + Sync + 'static,
{
    Arc::new(move |state: &mut S, action: A| reducer(state, action))
}
