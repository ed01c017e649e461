mod handles;
mod listener;
mod registry;
mod scope;
#[cfg(test)]
mod tests;
mod wire;

pub use handles::{ReducerDispatch, RefHandle, StateHandle};
pub use registry::{Cleanup, EffectSlot, HookRegistry, PendingEffect};
pub use scope::Scope;
pub use wire::RecordUi;
