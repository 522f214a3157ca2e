//! Subscription bus: an explicit observer registry.
//!
//! Consumers get the full collection on every accepted change, in
//! subscription order, synchronously, before any persistence I/O. A new
//! subscriber is handed the current collection immediately (replay-latest),
//! so late subscribers never miss the present state.

use crate::model::Task;

/// Handle returned by [`Bus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Callback = Box<dyn FnMut(&[Task]) + Send>;

#[derive(Default)]
pub struct Bus {
    next_id: u64,
    subscribers: Vec<(SubscriberId, Callback)>,
}

impl Bus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; it fires immediately with `current`.
    pub fn subscribe(&mut self, current: &[Task], mut callback: Callback) -> SubscriberId {
        callback(current);
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, callback));
        id
    }

    /// Remove a subscriber. Returns whether it was present.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Push the new collection to every subscriber, in subscription order.
    pub fn broadcast(&mut self, tasks: &[Task]) {
        for (_, callback) in &mut self.subscribers {
            callback(tasks);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Bus;
    use crate::model::Task;
    use std::sync::{Arc, Mutex};

    fn sample(id: u64) -> Task {
        Task {
            id,
            ..Task::default()
        }
    }

    #[test]
    fn subscribe_replays_current_collection() {
        let mut bus = Bus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        bus.subscribe(
            &[sample(1), sample(2)],
            Box::new(move |tasks| sink.lock().unwrap().push(tasks.len())),
        );

        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[test]
    fn broadcast_hits_subscribers_in_order() {
        let mut bus = Bus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let sink = Arc::clone(&order);
            bus.subscribe(&[], Box::new(move |_| sink.lock().unwrap().push(tag)));
        }
        order.lock().unwrap().clear();

        bus.broadcast(&[sample(1)]);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribed_callbacks_stop_firing() {
        let mut bus = Bus::new();
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);

        let id = bus.subscribe(&[], Box::new(move |_| *sink.lock().unwrap() += 1));
        assert_eq!(*count.lock().unwrap(), 1); // replay

        assert!(bus.unsubscribe(id));
        bus.broadcast(&[]);
        assert_eq!(*count.lock().unwrap(), 1);
        assert!(!bus.unsubscribe(id));
    }
}
