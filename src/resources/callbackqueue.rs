//! Deferred resumption callbacks.
//!
//! Anything that finishes in the middle of a frame (a tween, a timer, an
//! animation clip, an action that completes on its own) pushes its
//! [`ActionCallback`] onto the [`ActionCallbackQueue`] instead of calling it.
//! The queue is drained exactly once per tick by
//! [`dispatch_callbacks`](crate::systems::callbacks::dispatch_callbacks),
//! after every per-entity update has run, so callbacks always see a fully
//! updated world and never re-enter the update pass that produced them.
//!
//! # Durable callbacks
//!
//! A live callback is a closure and cannot be written to a save file. Owners
//! that must survive a save hold a [`PendingCallback`], which is either the
//! live handle or the durable string id it was registered under in the
//! [`CallbackRegistry`](crate::resources::callbackregistry::CallbackRegistry).
//! Durable ids are resolved lazily when the entry is drained.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::{Resource, World};

/// Signature of the code run when a suspended action is resumed.
pub type ResumeFn = dyn Fn(&mut World) + Send + Sync;

/// Shared handle to "the next step to run".
///
/// Cloning is cheap; clones compare equal with [`ActionCallback::ptr_eq`].
#[derive(Clone)]
pub struct ActionCallback(Arc<ResumeFn>);

impl ActionCallback {
    pub fn new(f: impl Fn(&mut World) + Send + Sync + 'static) -> Self {
        ActionCallback(Arc::new(f))
    }

    /// Run the continuation.
    pub fn resume(&self, world: &mut World) {
        (self.0)(world);
    }

    /// True when both handles point to the same continuation.
    pub fn ptr_eq(&self, other: &ActionCallback) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ActionCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActionCallback({:p})", Arc::as_ptr(&self.0))
    }
}

/// A callback reference held by a tween, timer or transition.
#[derive(Clone, Debug)]
pub enum PendingCallback {
    /// A live handle created in this process.
    Live(ActionCallback),
    /// A durable id read from a save, resolved through the registry on use.
    Durable(String),
}

impl From<ActionCallback> for PendingCallback {
    fn from(cb: ActionCallback) -> Self {
        PendingCallback::Live(cb)
    }
}

/// FIFO of callbacks ready to run at the end of the current tick.
#[derive(Resource, Default, Debug)]
pub struct ActionCallbackQueue {
    queue: VecDeque<PendingCallback>,
}

impl ActionCallbackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a callback. Never runs it.
    pub fn add(&mut self, cb: impl Into<PendingCallback>) {
        self.queue.push_back(cb.into());
    }

    /// Take the oldest entry, if any.
    pub fn pop(&mut self) -> Option<PendingCallback> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop every pending entry without running it.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
