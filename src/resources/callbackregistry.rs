//! Registry of durable callback ids.
//!
//! Maps stable string ids to live [`ActionCallback`]s so that a suspended
//! action can be written to a save file as its id and reconnected after a
//! reload. Owners register their callback when they suspend (the verb
//! sequencer registers `verb:<id>`); savers look the id up with
//! [`CallbackRegistry::find_id`].

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::resources::callbackqueue::{ActionCallback, PendingCallback};

#[derive(Resource, Default, Debug)]
pub struct CallbackRegistry {
    map: FxHashMap<String, ActionCallback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the callback stored under `id`.
    pub fn register(&mut self, id: impl Into<String>, cb: ActionCallback) {
        self.map.insert(id.into(), cb);
    }

    pub fn remove(&mut self, id: &str) -> Option<ActionCallback> {
        self.map.remove(id)
    }

    /// Look up a live callback by durable id.
    pub fn find(&self, id: &str) -> Option<ActionCallback> {
        self.map.get(id).cloned()
    }

    /// Reverse lookup: the id a live callback was registered under.
    pub fn find_id(&self, cb: &ActionCallback) -> Option<&str> {
        self.map
            .iter()
            .find(|(_, registered)| registered.ptr_eq(cb))
            .map(|(id, _)| id.as_str())
    }

    /// Turn a pending reference into a live handle.
    pub fn resolve(&self, pending: &PendingCallback) -> Option<ActionCallback> {
        match pending {
            PendingCallback::Live(cb) => Some(cb.clone()),
            PendingCallback::Durable(id) => self.find(id),
        }
    }

    /// The durable form of a pending reference, if it has one.
    pub fn durable_id(&self, pending: &PendingCallback) -> Option<String> {
        match pending {
            PendingCallback::Live(cb) => self.find_id(cb).map(str::to_owned),
            PendingCallback::Durable(id) => Some(id.clone()),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::World;

    #[test]
    fn find_id_returns_registered_name() {
        let mut registry = CallbackRegistry::new();
        let cb = ActionCallback::new(|_w: &mut World| {});
        registry.register("verb:lookat", cb.clone());

        assert_eq!(registry.find_id(&cb), Some("verb:lookat"));
        assert!(registry.find("verb:lookat").is_some_and(|f| f.ptr_eq(&cb)));
    }

    #[test]
    fn unregistered_live_callback_has_no_durable_id() {
        let registry = CallbackRegistry::new();
        let cb = ActionCallback::new(|_w: &mut World| {});
        assert_eq!(registry.durable_id(&PendingCallback::Live(cb)), None);
    }

    #[test]
    fn resolve_durable_id() {
        let mut registry = CallbackRegistry::new();
        let cb = ActionCallback::new(|_w: &mut World| {});
        registry.register("verb:pickup", cb.clone());

        let resolved = registry.resolve(&PendingCallback::Durable("verb:pickup".into()));
        assert!(resolved.is_some_and(|r| r.ptr_eq(&cb)));
        assert!(
            registry
                .resolve(&PendingCallback::Durable("missing".into()))
                .is_none()
        );
    }
}
