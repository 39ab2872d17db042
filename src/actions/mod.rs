//! Scripted actions.
//!
//! An [`Action`] is one step of a verb: walk somewhere, play an animation,
//! fade the screen, wait. Every action follows the same protocol:
//!
//! 1. It declares a static parameter schema ([`Action::params`])
//! 2. The caller binds textual values with [`bind`], which validates them
//!    against the schema before the action sees them
//! 3. [`Action::run`] executes it and returns
//!    - `true` when the step finished synchronously; nothing was queued
//!    - `false` when the step suspends; the action arranges for its `cb` to be
//!      queued exactly once later (directly, through a tween, a timer or a
//!      transition)
//!
//! Actions are created by kind through the [`ActionFactory`] resource. The
//! verb sequencer in [`verb`] drives them one at a time.
//!
//! Submodules overview:
//! - [`param`] – schema entries, textual encodings and [`BoundParams`]
//! - [`verb`] – the sequencer that runs a list of actions
//! - the catalog: [`wait`], [`leave`], [`transition`], [`goto`],
//!   [`position`], [`scale`], [`animation`], [`inventory`]

pub mod animation;
pub mod goto;
pub mod inventory;
pub mod leave;
pub mod param;
pub mod position;
pub mod scale;
pub mod transition;
pub mod verb;
pub mod wait;

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ParamError;
use crate::resources::callbackqueue::ActionCallback;
use param::{BoundParams, Param, ParamType, parse_bool, parse_vector2, parse_vector3};

/// A single scripted step.
pub trait Action: Send + Sync {
    /// Human-readable description of what the action does.
    fn info(&self) -> &'static str;

    /// Static parameter schema.
    fn params(&self) -> &'static [Param];

    /// Receive values already validated by [`bind`].
    fn set_params(&mut self, params: &BoundParams);

    /// Execute. `true` = finished now, `false` = `cb` will be queued later.
    fn run(&mut self, world: &mut World, cb: ActionCallback) -> bool;
}

/// Serialized form of an authored action: its kind and raw parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub kind: String,
    #[serde(default)]
    pub params: FxHashMap<String, String>,
}

impl ActionSpec {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: FxHashMap::default(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// Does `value` parse as `kind`? `None` means "malformed compound": the value
/// is dropped as if it had not been supplied.
fn check_value(param: &Param, value: &str) -> Result<Option<()>, ParamError> {
    let invalid = || ParamError::InvalidValue {
        param: param.name.to_string(),
        kind: param.kind,
        value: value.to_string(),
    };

    match param.kind {
        ParamType::Float => value.trim().parse::<f32>().map(|_| Some(())).map_err(|_| invalid()),
        ParamType::Integer => value.trim().parse::<i32>().map(|_| Some(())).map_err(|_| invalid()),
        ParamType::Boolean => parse_bool(value).map(|_| Some(())).ok_or_else(invalid),
        ParamType::Vector2 | ParamType::Dimension => Ok(parse_vector2(value).map(|_| ())),
        ParamType::Vector3 => Ok(parse_vector3(value).map(|_| ())),
        ParamType::Option if !param.options.is_empty() => {
            if param.options.iter().any(|option| *option == value.trim()) {
                Ok(Some(()))
            } else {
                Err(ParamError::InvalidOption {
                    param: param.name.to_string(),
                    value: value.to_string(),
                    options: param.options.iter().map(|o| o.to_string()).collect(),
                })
            }
        }
        _ => Ok(Some(())),
    }
}

/// Validate `values` against `schema`.
///
/// Absent values take the declared default. A mandatory parameter that is
/// still absent is a [`ParamError::MissingParameter`]. Scalars that do not
/// parse are a [`ParamError::InvalidValue`]; malformed compound values count
/// as absent, so an optional one falls back to its default and a mandatory
/// one is reported as invalid. Values not in the schema are ignored.
pub fn validate(
    kind: &str,
    schema: &[Param],
    values: &FxHashMap<String, String>,
) -> Result<BoundParams, ParamError> {
    let mut bound = BoundParams::default();

    for param in schema {
        let supplied = values.get(param.name).map(String::as_str);

        let accepted = match supplied {
            Some(value) => match check_value(param, value)? {
                Some(()) => Some(value),
                None if param.mandatory => {
                    return Err(ParamError::InvalidValue {
                        param: param.name.to_string(),
                        kind: param.kind,
                        value: value.to_string(),
                    });
                }
                None => None,
            },
            None => None,
        };

        match accepted.or(param.default) {
            Some(value) => bound.insert(param.name, value),
            None if param.mandatory => {
                return Err(ParamError::MissingParameter {
                    action: kind.to_string(),
                    param: param.name.to_string(),
                });
            }
            None => {}
        }
    }

    Ok(bound)
}

/// Validate `values` against the action's schema and hand them over.
pub fn bind(
    kind: &str,
    action: &mut dyn Action,
    values: &FxHashMap<String, String>,
) -> Result<(), ParamError> {
    let bound = validate(kind, action.params(), values)?;
    action.set_params(&bound);
    Ok(())
}

type ActionCtor = fn() -> Box<dyn Action>;

/// Registry of action constructors keyed by kind.
#[derive(Resource)]
pub struct ActionFactory {
    ctors: FxHashMap<String, ActionCtor>,
}

impl Default for ActionFactory {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ActionFactory {
    /// An empty factory.
    pub fn new() -> Self {
        Self {
            ctors: FxHashMap::default(),
        }
    }

    /// A factory with the built-in catalog registered.
    pub fn with_defaults() -> Self {
        let mut factory = Self::new();
        factory.register("wait", || Box::new(wait::WaitAction::default()));
        factory.register("leave", || Box::new(leave::LeaveAction::default()));
        factory.register("transition", || {
            Box::new(transition::TransitionAction::default())
        });
        factory.register("goto", || Box::new(goto::GotoAction::default()));
        factory.register("position", || Box::new(position::PositionAction::default()));
        factory.register("scale", || Box::new(scale::ScaleAction::default()));
        factory.register("animation", || Box::new(animation::AnimationAction::default()));
        factory.register("remove_inventory_item", || {
            Box::new(inventory::RemoveInventoryItemAction::default())
        });
        factory
    }

    pub fn register(&mut self, kind: impl Into<String>, ctor: ActionCtor) {
        self.ctors.insert(kind.into(), ctor);
    }

    /// A fresh, unbound action of `kind`.
    pub fn create(&self, kind: &str) -> Result<Box<dyn Action>, ParamError> {
        self.ctors
            .get(kind)
            .map(|ctor| ctor())
            .ok_or_else(|| ParamError::UnknownAction(kind.to_string()))
    }

    /// Create and bind an action from its authored form.
    pub fn create_bound(&self, spec: &ActionSpec) -> Result<Box<dyn Action>, ParamError> {
        let mut action = self.create(&spec.kind)?;
        bind(&spec.kind, action.as_mut(), &spec.params)?;
        Ok(action)
    }

    /// Parameter schema of `kind`.
    pub fn schema(&self, kind: &str) -> Option<&'static [Param]> {
        self.ctors.get(kind).map(|ctor| ctor().params())
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.ctors.keys().map(String::as_str)
    }
}

/// Resolve an actor id to its entity, logging when it does not exist.
pub(crate) fn resolve_actor(world: &mut World, id: &str) -> Option<Entity> {
    let entity = crate::components::actor::find_actor(world, id);
    if entity.is_none() {
        log::error!("action refers to unknown actor '{}'", id);
    }
    entity
}
