use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(test)]
mod tests;

type AnyArc = Arc<dyn Any + Send + Sync>;

/// Values provided by components, visible to everything rendered below the
/// provider. The runtime releases a component's values once its subtree has
/// been rendered.
#[derive(Default, Debug)]
pub struct ContextStack {
    layers: HashMap<TypeId, Vec<AnyArc>>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self {
            layers: HashMap::new(),
        }
    }

    pub fn provide<T>(&mut self, value: T) -> TypeId
    where
        T: Send + Sync + 'static,
    {
        self.provide_shared(Arc::new(value))
    }

    pub fn provide_shared<T>(&mut self, value: Arc<T>) -> TypeId
    where
        T: Send + Sync + 'static,
    {
        let type_id = TypeId::of::<T>();
        self.layers.entry(type_id).or_default().push(value);
        type_id
    }

    pub fn get<T>(&self) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        self.layers
            .get(&TypeId::of::<T>())
            .and_then(|entries| entries.last())
            .and_then(|arc| arc.clone().downcast::<T>().ok())
    }

    /// Pops the values recorded by `provide`, newest first.
    pub fn release(&mut self, provided: &[TypeId]) {
        for type_id in provided.iter().rev() {
            if let Some(stack) = self.layers.get_mut(type_id) {
                stack.pop();
                if stack.is_empty() {
                    self.layers.remove(type_id);
                }
            }
        }
    }
}
