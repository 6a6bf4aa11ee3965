//! Time-ordered event queue
//!
//! Events pop in ascending time order. Events scheduled for the same time pop
//! in the order they were scheduled, so replaying the same inputs always
//! yields the same dispatch order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::events::Event;

/// An event together with its position in the schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEvent {
    /// Insertion sequence number, unique per scheduler
    pub seq: u64,
    /// The event itself
    pub event: Event,
}

impl ScheduledEvent {
    fn key(&self) -> (f64, u64) {
        (self.event.time(), self.seq)
    }
}

impl Eq for ScheduledEvent {}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap yields the earliest (time, seq) first
        let (a_time, a_seq) = self.key();
        let (b_time, b_seq) = other.key();
        b_time.total_cmp(&a_time).then_with(|| b_seq.cmp(&a_seq))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of pending events
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<ScheduledEvent>,
    next_seq: u64,
}

impl Scheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event, returning its sequence number
    pub fn schedule(&mut self, event: Event) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        trace!(seq, kind = ?event.kind(), time = event.time(), "Scheduling event");
        self.queue.push(ScheduledEvent { seq, event });
        seq
    }

    /// Remove the earliest event, or `None` once the queue has drained
    pub fn pop_next(&mut self) -> Option<ScheduledEvent> {
        self.queue.pop()
    }

    /// Time of the earliest pending event
    pub fn peek_time(&self) -> Option<f64> {
        self.queue.peek().map(|s| s.event.time())
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no events are pending
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pending events in unspecified order
    pub fn pending(&self) -> impl Iterator<Item = &ScheduledEvent> {
        self.queue.iter()
    }
}
