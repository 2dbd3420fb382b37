use std::collections::VecDeque;

use super::instance::{EffectId, EffectInstance};

/// FIFO with a fixed maximum length that evicts its oldest member to make
/// room.
///
/// Callers make room with [`evict_if_full`](Self::evict_if_full) before
/// each [`push_back`](Self::push_back).
///
/// Capacity is clamped to at least one, so a freshly inserted instance is
/// always retained.
#[derive(Debug, Clone)]
pub struct BoundedQueue {
    items: VecDeque<EffectInstance>,
    capacity: usize,
}

impl BoundedQueue {
    /// Create an empty queue holding at most `capacity` instances.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of instances retained.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of instances currently queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the next insertion would evict.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Pop the oldest instance if the queue is at capacity.
    pub fn evict_if_full(&mut self) -> Option<EffectInstance> {
        if self.is_full() {
            self.items.pop_front()
        } else {
            None
        }
    }

    /// Append `instance` as the newest member.
    pub fn push_back(&mut self, instance: EffectInstance) {
        self.items.push_back(instance);
    }

    /// Remove the instance with `id`. Missing ids are ignored.
    pub fn remove(&mut self, id: EffectId) -> Option<EffectInstance> {
        let index = self.items.iter().position(|fx| fx.id == id)?;
        self.items.remove(index)
    }

    /// Queued instances, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &EffectInstance> {
        self.items.iter()
    }

    /// Drain everything, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = EffectInstance> + '_ {
        self.items.drain(..)
    }
}
