//! Player inventory.
//!
//! Items are identified by the id of the actor they represent. Order is the
//! order of acquisition, which is how an inventory bar lists them.

use bevy_ecs::prelude::Resource;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<String>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Adding one that is already held does nothing.
    pub fn add_item(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.contains(&id) {
            self.items.push(id);
        }
    }

    /// Remove an item, returning its id if it was held.
    pub fn remove_item(&mut self, id: &str) -> Option<String> {
        let idx = self.items.iter().position(|item| item == id)?;
        debug!("inventory: removed '{}'", id);
        Some(self.items.remove(idx))
    }

    pub fn remove_all_items(&mut self) {
        debug!("inventory: removed {} items", self.items.len());
        self.items.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item == id)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_remove_keeps_order() {
        let mut inv = Inventory::new();
        inv.add_item("key");
        inv.add_item("rope");
        inv.add_item("key");
        inv.add_item("map");
        assert_eq!(inv.items(), &["key", "rope", "map"]);

        assert_eq!(inv.remove_item("rope").as_deref(), Some("rope"));
        assert_eq!(inv.remove_item("rope"), None);
        assert_eq!(inv.items(), &["key", "map"]);

        inv.remove_all_items();
        assert!(inv.is_empty());
    }
}
