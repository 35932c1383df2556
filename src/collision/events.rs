//! Trigger event records and the free-list pool they are recycled through.

use crate::core::shape::ShapeId;

/// Lifecycle stage of an overlapping shape pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerState {
    Enter,
    Stay,
    Exit,
}

/// Canonical identity of an unordered shape pair, packed as `lo << 32 | hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(u64);

impl PairKey {
    /// Orders the ids so both argument orders yield the same key.
    pub fn new(a: ShapeId, b: ShapeId) -> Self {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        Self((u64::from(lo) << 32) | u64::from(hi))
    }

    pub fn lo(&self) -> ShapeId {
        (self.0 >> 32) as ShapeId
    }

    pub fn hi(&self) -> ShapeId {
        self.0 as ShapeId
    }

    pub fn involves(&self, id: ShapeId) -> bool {
        self.lo() == id || self.hi() == id
    }
}

/// Overlap record for one shape pair.
///
/// `pending_confirmation` is true between steps and flips to false once the pair is
/// observed overlapping during the scan. Events still pending at sweep time exit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerEvent {
    pub pair: PairKey,
    pub state: TriggerState,
    pub pending_confirmation: bool,
}

/// Index of an event slot inside a [`TriggerEventPool`].
pub type EventSlot = usize;

/// Slab of event records plus a free list of slots ready for reuse.
///
/// A slot is handed out to at most one live pair at a time; every field is overwritten
/// when a free slot is reacquired.
#[derive(Debug, Default)]
pub struct TriggerEventPool {
    events: Vec<TriggerEvent>,
    free: Vec<EventSlot>,
}

impl TriggerEventPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out an event in the `Enter` state, already confirmed for this step.
    pub fn acquire(&mut self, pair: PairKey) -> EventSlot {
        let event = TriggerEvent {
            pair,
            state: TriggerState::Enter,
            pending_confirmation: false,
        };
        match self.free.pop() {
            Some(slot) => {
                self.events[slot] = event;
                slot
            }
            None => {
                self.events.push(event);
                self.events.len() - 1
            }
        }
    }

    pub fn release(&mut self, slot: EventSlot) {
        debug_assert!(slot < self.events.len(), "release of unknown event slot {slot}");
        debug_assert!(
            !self.free.contains(&slot),
            "event slot {slot} released twice"
        );
        self.free.push(slot);
    }

    pub fn get(&self, slot: EventSlot) -> &TriggerEvent {
        &self.events[slot]
    }

    pub fn get_mut(&mut self, slot: EventSlot) -> &mut TriggerEvent {
        &mut self.events[slot]
    }

    /// Slots sitting in the free list.
    pub fn pooled_count(&self) -> usize {
        self.free.len()
    }
}
