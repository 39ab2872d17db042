//! Callback dispatch.
//!
//! [`dispatch_callbacks`] is the single point where suspended actions resume.
//! It runs once per tick, after the update schedule, and drains the
//! [`ActionCallbackQueue`] in FIFO order. Callbacks queued while draining (a
//! resumed verb that immediately finishes another step) run in the same pass.

use bevy_ecs::prelude::*;
use log::warn;

use crate::resources::callbackqueue::{ActionCallbackQueue, PendingCallback};
use crate::resources::callbackregistry::CallbackRegistry;

/// Run every queued callback until the queue is empty.
///
/// Durable ids are resolved through the [`CallbackRegistry`]; an id nobody
/// registered is logged and dropped. Returns the number of callbacks run.
pub fn dispatch_callbacks(world: &mut World) -> usize {
    let mut ran = 0;

    loop {
        let Some(pending) = world
            .get_resource_mut::<ActionCallbackQueue>()
            .and_then(|mut queue| queue.pop())
        else {
            break;
        };

        let cb = match world.get_resource::<CallbackRegistry>() {
            Some(registry) => registry.resolve(&pending),
            None => match pending {
                PendingCallback::Live(ref cb) => Some(cb.clone()),
                PendingCallback::Durable(_) => None,
            },
        };

        match cb {
            Some(cb) => {
                cb.resume(world);
                ran += 1;
            }
            None => warn!("callback {:?} is not registered; dropped", pending),
        }
    }

    ran
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::callbackqueue::ActionCallback;
    use std::sync::{Arc, Mutex};

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> ActionCallback {
        let log = log.clone();
        ActionCallback::new(move |_w: &mut World| log.lock().unwrap().push(name))
    }

    #[test]
    fn drains_in_fifo_order_including_nested() {
        let mut world = World::new();
        world.insert_resource(ActionCallbackQueue::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        let d = recorder(&log, "D");
        let a_log = log.clone();
        let a = ActionCallback::new(move |w: &mut World| {
            a_log.lock().unwrap().push("A");
            w.resource_mut::<ActionCallbackQueue>().add(d.clone());
        });

        {
            let mut queue = world.resource_mut::<ActionCallbackQueue>();
            queue.add(a);
            queue.add(recorder(&log, "B"));
            queue.add(recorder(&log, "C"));
        }

        assert_eq!(dispatch_callbacks(&mut world), 4);
        assert_eq!(*log.lock().unwrap(), vec!["A", "B", "C", "D"]);
        assert!(world.resource::<ActionCallbackQueue>().is_empty());
    }

    #[test]
    fn durable_ids_resolve_through_registry() {
        let mut world = World::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = CallbackRegistry::new();
        registry.register("verb:open", recorder(&log, "open"));
        world.insert_resource(registry);

        let mut queue = ActionCallbackQueue::new();
        queue.add(PendingCallback::Durable("verb:open".into()));
        queue.add(PendingCallback::Durable("verb:gone".into()));
        world.insert_resource(queue);

        assert_eq!(dispatch_callbacks(&mut world), 1);
        assert_eq!(*log.lock().unwrap(), vec!["open"]);
    }

    #[test]
    fn empty_queue_runs_nothing() {
        let mut world = World::new();
        assert_eq!(dispatch_callbacks(&mut world), 0);
        world.insert_resource(ActionCallbackQueue::new());
        assert_eq!(dispatch_callbacks(&mut world), 0);
    }
}
