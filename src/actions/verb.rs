//! Verb sequencer.
//!
//! A [`Verb`] is an ordered list of authored actions. [`run_verb`] binds and
//! runs them one at a time: a step that finishes synchronously is followed
//! immediately by the next, a step that suspends parks the verb until its
//! resume callback comes off the queue.
//!
//! The resume callback is registered in the [`CallbackRegistry`] as
//! `verb:<id>`, so a suspended verb survives a save and reload. Call
//! [`register_verb_callbacks`] after restoring a world.

use bevy_ecs::prelude::*;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::actions::{ActionFactory, ActionSpec};
use crate::resources::callbackqueue::ActionCallback;
use crate::resources::callbackregistry::CallbackRegistry;

/// Lifecycle of the verb's current step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionState {
    #[default]
    Unbound,
    Bound,
    Running,
    /// Waiting for the resume callback.
    Pending,
    Done,
}

#[derive(Component, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verb {
    pub id: String,
    pub actions: Vec<ActionSpec>,
    /// Index of the current step.
    pub ip: usize,
    pub state: ActionState,
}

impl Verb {
    pub fn new(id: impl Into<String>, actions: Vec<ActionSpec>) -> Self {
        Self {
            id: id.into(),
            actions,
            ip: 0,
            state: ActionState::Unbound,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == ActionState::Done
    }

    pub fn is_pending(&self) -> bool {
        self.state == ActionState::Pending
    }
}

/// Durable callback id of the verb `id`.
pub fn callback_id(id: &str) -> String {
    format!("verb:{}", id)
}

pub fn find_verb(world: &mut World, id: &str) -> Option<Entity> {
    let mut query = world.query::<(Entity, &Verb)>();
    query
        .iter(world)
        .find(|(_, verb)| verb.id == id)
        .map(|(entity, _)| entity)
}

/// Spawn a verb entity and register its resume callback.
pub fn spawn_verb(world: &mut World, verb: Verb) -> Entity {
    let id = verb.id.clone();
    let entity = world.spawn(verb).id();
    register_verb_callback(world, &id);
    entity
}

/// Register the resume callback of the verb `id`.
pub fn register_verb_callback(world: &mut World, id: &str) -> ActionCallback {
    let verb_id = id.to_string();
    let cb = ActionCallback::new(move |world: &mut World| resume_verb(world, &verb_id));
    world
        .get_resource_or_init::<CallbackRegistry>()
        .register(callback_id(id), cb.clone());
    cb
}

/// Re-register the resume callback of every verb in the world.
pub fn register_verb_callbacks(world: &mut World) -> usize {
    let mut query = world.query::<&Verb>();
    let ids: Vec<String> = query.iter(world).map(|verb| verb.id.clone()).collect();
    for id in &ids {
        register_verb_callback(world, id);
    }
    ids.len()
}

/// Run the verb `id` from its first step.
///
/// Returns `true` when every step finished synchronously, `false` when the
/// verb is suspended or does not exist.
pub fn run_verb(world: &mut World, id: &str) -> bool {
    let Some(entity) = find_verb(world, id) else {
        error!("verb '{}' not found", id);
        return false;
    };

    info!("running verb '{}'", id);
    if let Some(mut verb) = world.get_mut::<Verb>(entity) {
        verb.ip = 0;
        verb.state = ActionState::Unbound;
    }
    if world
        .get_resource::<CallbackRegistry>()
        .and_then(|registry| registry.find(&callback_id(id)))
        .is_none()
    {
        register_verb_callback(world, id);
    }

    advance(world, entity)
}

/// Resume callback target: move past the suspended step and continue.
pub fn resume_verb(world: &mut World, id: &str) {
    let Some(entity) = find_verb(world, id) else {
        warn!("resume for unknown verb '{}'", id);
        return;
    };

    match world.get_mut::<Verb>(entity) {
        Some(mut verb) if verb.is_pending() => {
            verb.ip += 1;
            verb.state = ActionState::Unbound;
        }
        Some(verb) => {
            warn!("verb '{}' resumed while {:?}; ignored", id, verb.state);
            return;
        }
        None => return,
    }

    advance(world, entity);
}

fn advance(world: &mut World, entity: Entity) -> bool {
    loop {
        let Some(verb) = world.get::<Verb>(entity) else {
            return false;
        };
        let id = verb.id.clone();
        let ip = verb.ip;

        let Some(spec) = verb.actions.get(ip).cloned() else {
            if let Some(mut verb) = world.get_mut::<Verb>(entity) {
                verb.state = ActionState::Done;
            }
            debug!("verb '{}' done", id);
            return true;
        };

        let created = world
            .get_resource_or_init::<ActionFactory>()
            .create_bound(&spec);

        let mut action = match created {
            Ok(action) => action,
            Err(err) => {
                error!("verb '{}' step {} ({}): {}", id, ip, spec.kind, err);
                if let Some(mut verb) = world.get_mut::<Verb>(entity) {
                    verb.ip += 1;
                }
                continue;
            }
        };
        set_state(world, entity, ActionState::Bound);

        let cb = world
            .get_resource::<CallbackRegistry>()
            .and_then(|registry| registry.find(&callback_id(&id)));
        let cb = match cb {
            Some(cb) => cb,
            None => register_verb_callback(world, &id),
        };

        debug!("verb '{}' step {}: {}", id, ip, spec.kind);
        set_state(world, entity, ActionState::Running);

        if action.run(world, cb) {
            if let Some(mut verb) = world.get_mut::<Verb>(entity) {
                verb.ip += 1;
                verb.state = ActionState::Unbound;
            }
        } else {
            set_state(world, entity, ActionState::Pending);
            return false;
        }
    }
}

fn set_state(world: &mut World, entity: Entity, state: ActionState) {
    if let Some(mut verb) = world.get_mut::<Verb>(entity) {
        verb.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::callbackqueue::ActionCallbackQueue;
    use crate::resources::inventory::Inventory;
    use crate::resources::timers::Timers;
    use crate::systems::callbacks::dispatch_callbacks;

    fn world() -> World {
        let mut world = World::new();
        world.insert_resource(ActionCallbackQueue::new());
        world.insert_resource(CallbackRegistry::new());
        world.insert_resource(ActionFactory::with_defaults());
        world
    }

    #[test]
    fn synchronous_steps_run_through() {
        let mut world = world();
        let mut inventory = Inventory::new();
        inventory.add_item("key");
        world.insert_resource(inventory);

        spawn_verb(
            &mut world,
            Verb::new("drop", vec![ActionSpec::new("remove_inventory_item")]),
        );
        assert!(run_verb(&mut world, "drop"));

        let entity = find_verb(&mut world, "drop").unwrap();
        assert!(world.get::<Verb>(entity).unwrap().is_done());
        assert!(world.resource::<Inventory>().is_empty());
        assert!(world.resource::<ActionCallbackQueue>().is_empty());
    }

    #[test]
    fn suspends_on_wait_and_resumes() {
        let mut world = world();
        world.insert_resource(Inventory::new());
        spawn_verb(
            &mut world,
            Verb::new(
                "pause",
                vec![
                    ActionSpec::new("wait").with("time", "0.5"),
                    ActionSpec::new("remove_inventory_item"),
                ],
            ),
        );

        assert!(!run_verb(&mut world, "pause"));
        let entity = find_verb(&mut world, "pause").unwrap();
        assert!(world.get::<Verb>(entity).unwrap().is_pending());
        assert_eq!(world.resource::<Timers>().len(), 1);

        world.resource_scope(|world, mut timers: Mut<Timers>| {
            timers.update(0.5, &mut world.resource_mut::<ActionCallbackQueue>());
        });
        assert_eq!(dispatch_callbacks(&mut world), 1);

        let verb = world.get::<Verb>(entity).unwrap();
        assert!(verb.is_done());
        assert_eq!(verb.ip, 2);
    }

    #[test]
    fn invalid_step_is_skipped() {
        let mut world = world();
        world.insert_resource(Inventory::new());
        spawn_verb(
            &mut world,
            Verb::new(
                "broken",
                vec![ActionSpec::new("leave"), ActionSpec::new("dance")],
            ),
        );
        assert!(run_verb(&mut world, "broken"));
    }

    #[test]
    fn stray_resume_is_ignored() {
        let mut world = world();
        spawn_verb(&mut world, Verb::new("idle", vec![]));
        assert!(run_verb(&mut world, "idle"));
        resume_verb(&mut world, "idle");
        let entity = find_verb(&mut world, "idle").unwrap();
        assert_eq!(world.get::<Verb>(entity).unwrap().ip, 0);
    }

    #[test]
    fn callbacks_reregister_after_load() {
        let mut world = World::new();
        world.spawn(Verb::new("a", vec![]));
        world.spawn(Verb::new("b", vec![]));
        assert_eq!(register_verb_callbacks(&mut world), 2);
        let registry = world.resource::<CallbackRegistry>();
        assert!(registry.find("verb:a").is_some());
        assert!(registry.find("verb:b").is_some());
    }
}
