use bevy_ecs::prelude::*;

use crate::actions::Action;
use crate::actions::param::{BoundParams, Param, ParamType};
use crate::resources::callbackqueue::ActionCallback;
use crate::resources::inventory::Inventory;

const PARAMS: &[Param] = &[Param::new(
    "id",
    "The 'actorid' from the inventory item to remove. If empty remove all items.",
    ParamType::Actor,
)];

/// Remove one item, or every item, from the inventory.
#[derive(Debug, Default)]
pub struct RemoveInventoryItemAction {
    item_id: Option<String>,
}

impl Action for RemoveInventoryItemAction {
    fn info(&self) -> &'static str {
        "Remove items from the inventory."
    }

    fn params(&self) -> &'static [Param] {
        PARAMS
    }

    fn set_params(&mut self, params: &BoundParams) {
        self.item_id = params
            .get_string("id")
            .filter(|id| !id.trim().is_empty());
    }

    fn run(&mut self, world: &mut World, _cb: ActionCallback) -> bool {
        let mut inventory = world.get_resource_or_init::<Inventory>();
        match &self.item_id {
            Some(id) => {
                inventory.remove_item(id);
            }
            None => inventory.remove_all_items(),
        }
        true
    }
}
