//! One-shot timers that resume a suspended action.
//!
//! [`Timers::add_timer`] stores a duration and a callback. The
//! [`update_timers`](crate::systems::time::update_timers) system advances every
//! timer by the scaled frame delta; a timer whose time has run out pushes its
//! callback onto the [`ActionCallbackQueue`] exactly once and is removed.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::resources::callbackqueue::{ActionCallback, ActionCallbackQueue, PendingCallback};
use crate::resources::callbackregistry::CallbackRegistry;

#[derive(Debug, Clone)]
pub struct Timer {
    pub duration: f32,
    pub elapsed: f32,
    cb: PendingCallback,
}

impl Timer {
    pub fn new(duration: f32, cb: impl Into<PendingCallback>) -> Self {
        Timer {
            duration,
            elapsed: 0.0,
            cb: cb.into(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Resource, Debug, Default)]
pub struct Timers {
    timers: Vec<Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_timer(&mut self, duration: f32, cb: ActionCallback) {
        self.timers.push(Timer::new(duration, cb));
    }

    /// Advance every timer and queue the callbacks of the expired ones.
    pub fn update(&mut self, delta: f32, queue: &mut ActionCallbackQueue) {
        for timer in self.timers.iter_mut() {
            timer.elapsed += delta;
        }
        self.timers.retain(|timer| {
            if timer.is_expired() {
                queue.add(timer.cb.clone());
                false
            } else {
                true
            }
        });
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Persistable form. Timers whose callback has no durable id are dropped.
    pub fn write(&self, registry: &CallbackRegistry) -> Vec<TimerState> {
        self.timers
            .iter()
            .filter_map(|timer| {
                registry.durable_id(&timer.cb).map(|cb| TimerState {
                    duration: timer.duration,
                    elapsed: timer.elapsed,
                    cb,
                })
            })
            .collect()
    }

    pub fn read(states: &[TimerState]) -> Self {
        Timers {
            timers: states
                .iter()
                .map(|state| Timer {
                    duration: state.duration,
                    elapsed: state.elapsed,
                    cb: PendingCallback::Durable(state.cb.clone()),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub duration: f32,
    pub elapsed: f32,
    pub cb: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::World;

    #[test]
    fn timer_fires_once_after_duration() {
        let mut queue = ActionCallbackQueue::new();
        let mut timers = Timers::new();
        timers.add_timer(1.0, ActionCallback::new(|_w: &mut World| {}));

        timers.update(0.6, &mut queue);
        assert!(queue.is_empty());
        assert_eq!(timers.len(), 1);

        timers.update(0.6, &mut queue);
        assert_eq!(queue.len(), 1);
        assert!(timers.is_empty());

        timers.update(5.0, &mut queue);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn timers_fire_in_insertion_order() {
        let mut queue = ActionCallbackQueue::new();
        let mut registry = CallbackRegistry::new();
        let a = ActionCallback::new(|_w: &mut World| {});
        let b = ActionCallback::new(|_w: &mut World| {});
        registry.register("a", a.clone());
        registry.register("b", b.clone());

        let mut timers = Timers::new();
        timers.add_timer(0.5, a);
        timers.add_timer(0.2, b);
        timers.update(1.0, &mut queue);

        let ids: Vec<_> = std::iter::from_fn(|| queue.pop())
            .filter_map(|p| registry.durable_id(&p))
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn write_skips_timers_without_durable_id() {
        let mut registry = CallbackRegistry::new();
        let kept = ActionCallback::new(|_w: &mut World| {});
        registry.register("verb:wait", kept.clone());

        let mut timers = Timers::new();
        timers.add_timer(2.0, kept);
        timers.add_timer(3.0, ActionCallback::new(|_w: &mut World| {}));

        let states = timers.write(&registry);
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].cb, "verb:wait");
        assert_eq!(Timers::read(&states).len(), 1);
    }
}
