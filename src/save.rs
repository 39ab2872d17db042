//! World snapshots.
//!
//! [`write_world`] captures everything a suspended script needs to pick up
//! where it left off: actors with their tweens and animation, timers, the
//! screen transition, signals, inventory and verbs. Callbacks are stored by
//! their durable id (see [`CallbackRegistry`]); a callback without one is
//! dropped with a warning.
//!
//! [`read_world`] first checks that every stored callback id resolves, then
//! replaces the actors and verbs of a world with the snapshot's and
//! re-registers the verb callbacks. A snapshot that fails the check leaves the
//! world untouched. Durable callbacks other than verbs must be registered
//! before reading.

use std::fs;
use std::path::Path;

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;
use serde::{Deserialize, Serialize};

use crate::actions::verb::{Verb, callback_id, register_verb_callbacks};
use crate::components::actor::Actor;
use crate::components::animation::{Animation, AnimationState};
use crate::components::facing::{Direction, Facing};
use crate::components::mapposition::MapPosition;
use crate::components::postween::{PosTween, PosTweenState};
use crate::components::scale::Scale;
use crate::components::scaletween::{ScaleTween, ScaleTweenState};
use crate::components::tween::TweenState;
use crate::error::SaveError;
use crate::resources::callbackregistry::CallbackRegistry;
use crate::resources::inventory::Inventory;
use crate::resources::timers::{TimerState, Timers};
use crate::resources::transition::{Transition, TransitionState};
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub id: String,
    pub walking_speed: f32,
    pub pos: Vec2,
    pub scale: f32,
    pub facing: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_tween: Option<PosTweenState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_tween: Option<ScaleTweenState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub elapsed: f32,
    pub actors: Vec<ActorSnapshot>,
    pub timers: Vec<TimerState>,
    pub transition: Option<TransitionState>,
    pub signals: WorldSignals,
    pub inventory: Inventory,
    pub verbs: Vec<Verb>,
}

impl WorldSnapshot {
    /// Every durable callback id the snapshot refers to.
    pub fn callback_ids(&self) -> Vec<&str> {
        fn tween_cb(tween: &TweenState) -> Option<&str> {
            tween.cb.as_deref()
        }

        let mut ids: Vec<&str> = Vec::new();
        for actor in &self.actors {
            match &actor.pos_tween {
                Some(PosTweenState::Sprite(state)) => ids.extend(tween_cb(&state.tween)),
                Some(PosTweenState::Walk(state)) => {
                    ids.extend(state.cb.as_deref());
                    ids.extend(tween_cb(&state.segment.tween));
                }
                None => {}
            }
            if let Some(state) = &actor.scale_tween {
                ids.extend(tween_cb(&state.tween));
            }
            if let Some(state) = &actor.animation {
                ids.extend(tween_cb(&state.tween));
            }
        }
        ids.extend(self.timers.iter().map(|timer| timer.cb.as_str()));
        if let Some(transition) = &self.transition {
            ids.extend(tween_cb(&transition.tween));
        }
        ids
    }
}

/// Capture the persistable state of `world`.
pub fn write_world(world: &mut World) -> WorldSnapshot {
    world.init_resource::<CallbackRegistry>();

    let mut query = world.query::<(
        &Actor,
        &MapPosition,
        Option<&Scale>,
        Option<&Facing>,
        Option<&PosTween>,
        Option<&ScaleTween>,
        Option<&Animation>,
    )>();

    let registry = world.resource::<CallbackRegistry>();
    let actors = query
        .iter(world)
        .map(
            |(actor, pos, scale, facing, pos_tween, scale_tween, animation)| ActorSnapshot {
                id: actor.id.clone(),
                walking_speed: actor.walking_speed,
                pos: pos.pos,
                scale: scale.copied().unwrap_or_default().scale,
                facing: facing.map(|f| f.direction).unwrap_or_default(),
                pos_tween: pos_tween.map(|tween| tween.write(registry)),
                scale_tween: scale_tween.map(|tween| tween.write(registry)),
                animation: animation.map(|anim| anim.write(registry)),
            },
        )
        .collect();

    let timers = world
        .get_resource::<Timers>()
        .map(|timers| timers.write(registry))
        .unwrap_or_default();
    let transition = world
        .get_resource::<Transition>()
        .and_then(|transition| transition.write(registry));

    let mut verbs_query = world.query::<&Verb>();
    let verbs = verbs_query.iter(world).cloned().collect();

    WorldSnapshot {
        elapsed: world
            .get_resource::<WorldTime>()
            .map_or(0.0, |time| time.elapsed),
        actors,
        timers,
        transition,
        signals: world.get_resource::<WorldSignals>().cloned().unwrap_or_default(),
        inventory: world.get_resource::<Inventory>().cloned().unwrap_or_default(),
        verbs,
    }
}

/// Replace the actors, verbs and script state of `world` with `snapshot`.
pub fn read_world(world: &mut World, snapshot: &WorldSnapshot) -> Result<(), SaveError> {
    // verb callbacks are re-registered from the snapshot itself
    let verb_ids: Vec<String> = snapshot
        .verbs
        .iter()
        .map(|verb| callback_id(&verb.id))
        .collect();
    let registry = world.get_resource::<CallbackRegistry>();
    if let Some(missing) = snapshot.callback_ids().into_iter().find(|id| {
        !verb_ids.iter().any(|verb_id| verb_id == id)
            && registry.and_then(|registry| registry.find(id)).is_none()
    }) {
        return Err(SaveError::UnknownCallback(missing.to_string()));
    }

    let stale: Vec<Entity> = world
        .query_filtered::<Entity, Or<(With<Actor>, With<Verb>)>>()
        .iter(world)
        .collect();
    for entity in stale {
        world.despawn(entity);
    }

    for actor in &snapshot.actors {
        let mut entity = world.spawn((
            Actor::new(actor.id.clone()).with_walking_speed(actor.walking_speed),
            MapPosition { pos: actor.pos },
            Scale::new(actor.scale),
            Facing::new(actor.facing),
        ));
        if let Some(state) = &actor.pos_tween {
            entity.insert(state.read());
        }
        if let Some(state) = &actor.scale_tween {
            entity.insert(state.read());
        }
        entity.insert(
            actor
                .animation
                .as_ref()
                .map(AnimationState::read)
                .unwrap_or_default(),
        );
    }

    for verb in &snapshot.verbs {
        world.spawn(verb.clone());
    }

    world.insert_resource(Timers::read(&snapshot.timers));
    world.insert_resource(Transition::read(snapshot.transition.as_ref()));
    world.insert_resource(snapshot.signals.clone());
    world.insert_resource(snapshot.inventory.clone());
    world.get_resource_or_init::<WorldTime>().elapsed = snapshot.elapsed;

    register_verb_callbacks(world);

    info!(
        "restored {} actors, {} verbs, {} timers",
        snapshot.actors.len(),
        snapshot.verbs.len(),
        snapshot.timers.len()
    );
    Ok(())
}

pub fn to_json(snapshot: &WorldSnapshot) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn from_json(json: &str) -> Result<WorldSnapshot, SaveError> {
    Ok(serde_json::from_str(json)?)
}

pub fn save_to_file(world: &mut World, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let json = to_json(&write_world(world))?;
    fs::write(path.as_ref(), json)?;
    info!("saved world to {}", path.as_ref().display());
    Ok(())
}

pub fn load_from_file(world: &mut World, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let json = fs::read_to_string(path.as_ref())?;
    read_world(world, &from_json(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::verb::register_verb_callback;
    use crate::actor::{go_to, spawn_actor};
    use crate::resources::callbackqueue::ActionCallback;
    use crate::resources::navgraph::NavGraph;

    #[test]
    fn actor_and_walk_survive_json() {
        let mut world = World::new();
        world.insert_resource(NavGraph::default());
        let hero = spawn_actor(&mut world, "hero", Vec2::ZERO);
        go_to(&mut world, hero, Vec2::new(100.0, 0.0), None).unwrap();

        let snapshot = write_world(&mut world);
        let json = to_json(&snapshot).unwrap();
        let restored = from_json(&json).unwrap();
        assert_eq!(restored, snapshot);

        let mut other = World::new();
        read_world(&mut other, &restored).unwrap();
        let mut query = other.query::<(&Actor, &MapPosition, &PosTween)>();
        let (actor, pos, tween) = query.single(&other).unwrap();
        assert_eq!(actor.id, "hero");
        assert_eq!(pos.pos, Vec2::ZERO);
        assert!(tween.is_walk());
    }

    #[test]
    fn unregistered_callback_is_an_error() {
        let mut world = World::new();
        let mut registry = CallbackRegistry::new();
        let cb = ActionCallback::new(|_w: &mut World| {});
        registry.register("door:open", cb.clone());
        world.insert_resource(registry);
        world.insert_resource(Timers::new());
        world.resource_mut::<Timers>().add_timer(3.0, cb);

        let snapshot = write_world(&mut world);
        assert_eq!(snapshot.callback_ids(), vec!["door:open"]);

        let mut fresh = World::new();
        assert!(matches!(
            read_world(&mut fresh, &snapshot),
            Err(SaveError::UnknownCallback(id)) if id == "door:open"
        ));
    }

    #[test]
    fn failed_read_leaves_world_untouched() {
        let mut world = World::new();
        let hero = spawn_actor(&mut world, "hero", Vec2::new(5.0, 5.0));
        world.insert_resource(Timers::new());
        let mut signals = WorldSignals::default();
        signals.set_current_scene("harbour");
        world.insert_resource(signals);

        let mut snapshot = WorldSnapshot::default();
        snapshot.actors.push(ActorSnapshot {
            id: "ghost".to_string(),
            walking_speed: 1.0,
            pos: Vec2::ZERO,
            scale: 1.0,
            facing: Direction::default(),
            pos_tween: None,
            scale_tween: None,
            animation: None,
        });
        let mut registry = CallbackRegistry::new();
        let cb = ActionCallback::new(|_w: &mut World| {});
        registry.register("door:open", cb.clone());
        let mut timers = Timers::new();
        timers.add_timer(1.0, cb);
        snapshot.timers = timers.write(&registry);

        assert!(matches!(
            read_world(&mut world, &snapshot),
            Err(SaveError::UnknownCallback(id)) if id == "door:open"
        ));

        let mut query = world.query::<&Actor>();
        let ids: Vec<&str> = query.iter(&world).map(|actor| actor.id.as_str()).collect();
        assert_eq!(ids, vec!["hero"]);
        assert_eq!(world.get::<MapPosition>(hero).unwrap().pos, Vec2::new(5.0, 5.0));
        assert!(world.resource::<Timers>().is_empty());
        assert_eq!(world.resource::<WorldSignals>().current_scene(), Some("harbour"));
    }

    #[test]
    fn verb_callbacks_resolve_from_the_snapshot() {
        let mut source = World::new();
        let cb = register_verb_callback(&mut source, "open");
        source.spawn(Verb::new("open", vec![]));
        source.insert_resource(Timers::new());
        source.resource_mut::<Timers>().add_timer(2.0, cb);
        let snapshot = write_world(&mut source);
        assert_eq!(snapshot.callback_ids(), vec!["verb:open"]);

        let mut fresh = World::new();
        read_world(&mut fresh, &snapshot).unwrap();
        assert!(fresh.resource::<CallbackRegistry>().find("verb:open").is_some());
        assert_eq!(fresh.resource::<Timers>().len(), 1);
    }
}
