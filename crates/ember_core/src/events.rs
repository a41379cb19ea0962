//! Synchronous event queue
//!
//! Systems publish during the tick; the owner drains at a defined point
//! so delivery order is deterministic and testable. Events are one-way
//! notifications and never carry state back into the simulation.

use std::collections::VecDeque;

/// FIFO event queue drained synchronously by its owner
#[derive(Debug)]
pub struct EventQueue<E> {
    queue: VecDeque<E>,
}

impl<E> EventQueue<E> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Publish an event
    pub fn publish(&mut self, event: E) {
        self.queue.push_back(event);
    }

    /// Publish a batch of events, preserving order
    pub fn publish_all(&mut self, events: impl IntoIterator<Item = E>) {
        self.queue.extend(events);
    }

    /// Drain all pending events in publish order
    pub fn drain(&mut self) -> impl Iterator<Item = E> + '_ {
        self.queue.drain(..)
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let mut queue = EventQueue::new();
        queue.publish(1u32);
        queue.publish(2);
        queue.publish(3);

        let drained: Vec<u32> = queue.drain().collect();
        assert_eq!(drained, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_publish_all() {
        let mut queue = EventQueue::new();
        queue.publish_all([1u32, 2]);
        assert_eq!(queue.len(), 2);
    }
}
