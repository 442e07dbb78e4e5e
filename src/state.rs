//! Observable state cell.
//!
//! Every mutation goes through [`StateCell::update`], which hands each
//! subscriber the `(previous, next)` pair and returns the same pair to the
//! caller. Nothing is intercepted implicitly: a change that does not pass
//! through `update` is impossible because the value is never lent mutably.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::fmt;

/// Callback invoked with `(previous, next)` after each update.
pub type Subscriber<T> = Box<dyn FnMut(&T, &T)>;

/// Handle returned by [`StateCell::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The value before and after one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<T> {
    pub prev: T,
    pub next: T,
}

impl<T: PartialEq> Transition<T> {
    #[must_use]
    pub fn changed(&self) -> bool {
        self.prev != self.next
    }
}

/// A value plus an ordered list of subscribers.
pub struct StateCell<T> {
    value: T,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
    next_id: u64,
}

impl<T: Clone> StateCell<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self { value, subscribers: Vec::new(), next_id: 0 }
    }

    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Apply `f`, notify subscribers in registration order, return the transition.
    ///
    /// Subscribers fire even when `f` leaves the value unchanged.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) -> Transition<T> {
        let prev = self.value.clone();
        f(&mut self.value);
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&prev, &self.value);
        }
        Transition { prev, next: self.value.clone() }
    }

    /// Replace the value outright.
    pub fn set(&mut self, value: T) -> Transition<T> {
        self.update(|v| *v = value)
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&T, &T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Clone + Default> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
