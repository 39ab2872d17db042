//! Actor commands.
//!
//! The script-facing operations on an actor entity. Every command that
//! installs a tween supersedes the actor's previous tween of the same kind by
//! inserting a new component; the replaced tween is dropped and its callback
//! is never queued.
//!
//! | command | slot | cancels |
//! |---|---|---|
//! | [`go_to`] | [`PosTween`] | previous positional tween |
//! | [`start_pos_animation`] | [`PosTween`] | previous positional tween |
//! | [`start_scale_animation`] | [`ScaleTween`] | previous scale tween |
//! | [`start_animation`] | [`Animation`] | an in-progress walk |
//! | [`stand`], [`look_at`] | [`Animation`] | any positional tween |
//!
//! [`ActorView`] is the bridge between the tween state machines and the ECS:
//! it borrows the components a walk touches and implements [`WalkTarget`].

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, warn};

use crate::components::actor::Actor;
use crate::components::animation::Animation;
use crate::components::facing::Facing;
use crate::components::mapposition::MapPosition;
use crate::components::postween::{PosTween, PositionTarget, SpritePosTween};
use crate::components::scale::Scale;
use crate::components::scaletween::{ScaleTween, SpriteScaleTween};
use crate::components::tween::{Easing, RepeatMode};
use crate::components::walktween::{WalkTarget, WalkTween};
use crate::error::ConfigurationError;
use crate::resources::animationstore::AnimationStore;
use crate::resources::callbackqueue::{ActionCallback, ActionCallbackQueue};
use crate::resources::gameconfig::GameConfig;
use crate::resources::navgraph::NavGraph;

/// Mutable view of the components a positional tween drives.
pub struct ActorView<'a> {
    pub position: &'a mut MapPosition,
    pub facing: Option<&'a mut Facing>,
    pub animation: Option<&'a mut Animation>,
    pub store: &'a AnimationStore,
}

impl ActorView<'_> {
    fn play_directional(&mut self, prefix: &str) {
        let direction = self
            .facing
            .as_deref()
            .map(|facing| facing.direction)
            .unwrap_or_default();
        if let Some(animation) = self.animation.as_deref_mut() {
            animation.play(
                format!("{}.{}", prefix, direction.name()),
                self.store,
                RepeatMode::FromCurrent,
                1,
                None,
            );
        }
    }
}

impl PositionTarget for ActorView<'_> {
    fn position(&self) -> Vec2 {
        self.position.pos
    }
    fn set_position(&mut self, pos: Vec2) {
        self.position.pos = pos;
    }
}

impl WalkTarget for ActorView<'_> {
    fn start_walk(&mut self, from: Vec2, to: Vec2) {
        if let Some(facing) = self.facing.as_deref_mut() {
            facing.look_along(to - from);
        }
        self.play_directional("walk");
    }

    fn stand(&mut self) {
        self.play_directional("stand");
    }
}

fn not_an_actor(entity: Entity) -> ConfigurationError {
    ConfigurationError::NotAnActor(format!("{entity}"))
}

/// Run `f` with an [`ActorView`] over `entity`.
pub fn with_actor_view<R>(
    world: &mut World,
    entity: Entity,
    f: impl FnOnce(&mut ActorView<'_>) -> R,
) -> Result<R, ConfigurationError> {
    world.init_resource::<AnimationStore>();
    world.resource_scope(|world, store: Mut<AnimationStore>| {
        let mut query =
            world.query::<(&mut MapPosition, Option<&mut Facing>, Option<&mut Animation>)>();
        let (mut position, mut facing, mut animation) = query
            .get_mut(world, entity)
            .map_err(|_| not_an_actor(entity))?;
        let mut view = ActorView {
            position: &mut *position,
            facing: facing.as_deref_mut(),
            animation: animation.as_deref_mut(),
            store: &*store,
        };
        Ok(f(&mut view))
    })
}

fn enqueue(world: &mut World, cb: Option<ActionCallback>) {
    if let Some(cb) = cb {
        world.get_resource_or_init::<ActionCallbackQueue>().add(cb);
    }
}

/// Spawn an actor with the default components at `pos`, standing front.
pub fn spawn_actor(world: &mut World, id: &str, pos: Vec2) -> Entity {
    let speed = world
        .get_resource::<GameConfig>()
        .map_or(crate::components::actor::DEFAULT_WALKING_SPEED, |c| c.walking_speed);
    world.init_resource::<AnimationStore>();
    let animation = Animation::new("stand.front", world.resource::<AnimationStore>());
    world
        .spawn((
            Actor::new(id).with_walking_speed(speed),
            MapPosition { pos },
            Scale::default(),
            Facing::default(),
            animation,
        ))
        .id()
}

/// Walk the actor to `target` along the scene's navigation graph.
///
/// `cb` is queued when the actor arrives. Targets within the configured
/// arrive distance snap immediately; unreachable targets resume at once
/// without moving.
pub fn go_to(
    world: &mut World,
    entity: Entity,
    target: Vec2,
    cb: Option<ActionCallback>,
) -> Result<(), ConfigurationError> {
    let speed = world
        .get::<Actor>(entity)
        .map(|actor| actor.walking_speed)
        .ok_or_else(|| not_an_actor(entity))?;
    let from = world
        .get::<MapPosition>(entity)
        .map(|p| p.pos)
        .ok_or_else(|| not_an_actor(entity))?;

    debug!("GOTO {},{}", target.x, target.y);

    let arrive_distance = world
        .get_resource::<GameConfig>()
        .map_or(2.0, |config| config.arrive_distance);

    if from.distance(target) < arrive_distance {
        if let Some(mut pos) = world.get_mut::<MapPosition>(entity) {
            pos.pos = target;
        }
        enqueue(world, cb);
        return Ok(());
    }

    let path = world
        .get_resource::<NavGraph>()
        .and_then(|graph| graph.find_path(from, target))
        .filter(|path| !path.is_empty());

    let Some(path) = path else {
        warn!("no walkable path to {},{}", target.x, target.y);
        enqueue(world, cb);
        return Ok(());
    };

    let mut walk = WalkTween::new();
    with_actor_view(world, entity, |view| walk.start(view, path, speed, cb))??;
    world.entity_mut(entity).insert(PosTween::Walk(walk));
    Ok(())
}

/// Move the actor in a straight line to `dest` over `duration` seconds.
#[allow(clippy::too_many_arguments)]
pub fn start_pos_animation(
    world: &mut World,
    entity: Entity,
    repeat: RepeatMode,
    count: i32,
    duration: f32,
    dest: Vec2,
    interpolation: Option<Easing>,
    cb: Option<ActionCallback>,
) -> Result<(), ConfigurationError> {
    let position = world
        .get::<MapPosition>(entity)
        .ok_or_else(|| not_an_actor(entity))?;
    let mut tween = SpritePosTween::new();
    tween.start(position, repeat, count, dest, duration, interpolation, cb);
    world.entity_mut(entity).insert(PosTween::Sprite(tween));
    Ok(())
}

/// Animate the actor's scale to `scale` over `duration` seconds.
#[allow(clippy::too_many_arguments)]
pub fn start_scale_animation(
    world: &mut World,
    entity: Entity,
    repeat: RepeatMode,
    count: i32,
    duration: f32,
    scale: f32,
    interpolation: Option<Easing>,
    cb: Option<ActionCallback>,
) -> Result<(), ConfigurationError> {
    let mut entity_mut = world
        .get_entity_mut(entity)
        .map_err(|_| not_an_actor(entity))?;
    let current = entity_mut.get::<Scale>().copied().unwrap_or_default();
    let mut tween = SpriteScaleTween::new();
    tween.start(&current, repeat, count, scale, duration, interpolation, cb);
    entity_mut.insert((current, ScaleTween(tween)));
    Ok(())
}

/// Play the clip `key`. An in-progress walk is cancelled.
pub fn start_animation(
    world: &mut World,
    entity: Entity,
    key: &str,
    repeat: RepeatMode,
    count: i32,
    cb: Option<ActionCallback>,
) -> Result<(), ConfigurationError> {
    world.init_resource::<AnimationStore>();
    world.resource_scope(|world, store: Mut<AnimationStore>| {
        let mut entity_mut = world
            .get_entity_mut(entity)
            .map_err(|_| not_an_actor(entity))?;

        if entity_mut.get::<PosTween>().is_some_and(PosTween::is_walk) {
            entity_mut.remove::<PosTween>();
        }

        match entity_mut.get_mut::<Animation>() {
            Some(mut animation) => animation.play(key, &store, repeat, count, cb),
            None => {
                let mut animation = Animation::default();
                animation.play(key, &store, repeat, count, cb);
                entity_mut.insert(animation);
            }
        }
        Ok(())
    })
}

/// Show the standing pose and stop any positional tween.
pub fn stand(world: &mut World, entity: Entity) -> Result<(), ConfigurationError> {
    with_actor_view(world, entity, |view| view.stand())?;
    world.entity_mut(entity).remove::<PosTween>();
    Ok(())
}

/// Turn towards `point`, stand, and stop any positional tween.
pub fn look_at(world: &mut World, entity: Entity, point: Vec2) -> Result<(), ConfigurationError> {
    with_actor_view(world, entity, |view| {
        let from = view.position();
        if let Some(facing) = view.facing.as_deref_mut() {
            facing.look_along(point - from);
        }
        view.stand();
    })?;
    world.entity_mut(entity).remove::<PosTween>();
    Ok(())
}
