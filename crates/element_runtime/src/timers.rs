//! Cancelable timeouts and animation frames on a virtual clock.

use std::collections::{BTreeMap, HashMap};

use crate::tree::Action;
use crate::InstanceId;

/// Disposable handle to a scheduled timeout or frame.
///
/// Handles are owned by the instance that scheduled them; removing the instance cancels
/// every handle it still holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle {
    owner: InstanceId,
    seq: u64,
}

impl TimerHandle {
    /// Instance that owns the timer.
    pub fn owner(&self) -> InstanceId {
        self.owner
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DueTimer {
    pub handle: TimerHandle,
    pub action: Action,
}

/// Pending timers ordered by due time, ties broken by creation order.
#[derive(Debug, Default)]
pub(crate) struct TimerQueue {
    next_seq: u64,
    entries: BTreeMap<(u64, u64), DueTimer>,
    due_by_seq: HashMap<u64, u64>,
}

impl TimerQueue {
    pub fn schedule(&mut self, owner: InstanceId, due: u64, action: Action) -> TimerHandle {
        self.next_seq += 1;
        let handle = TimerHandle {
            owner,
            seq: self.next_seq,
        };
        self.entries
            .insert((due, handle.seq), DueTimer { handle, action });
        self.due_by_seq.insert(handle.seq, due);
        handle
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.due_by_seq.remove(&handle.seq) {
            Some(due) => self.entries.remove(&(due, handle.seq)).is_some(),
            None => false,
        }
    }

    pub fn cancel_owner(&mut self, owner: InstanceId) -> usize {
        let before = self.entries.len();
        let due_by_seq = &mut self.due_by_seq;
        self.entries.retain(|(_, seq), timer| {
            let keep = timer.handle.owner != owner;
            if !keep {
                due_by_seq.remove(seq);
            }
            keep
        });
        before - self.entries.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.due_by_seq.contains_key(&handle.seq)
    }

    pub fn pending_for(&self, owner: InstanceId) -> usize {
        self.entries
            .values()
            .filter(|timer| timer.handle.owner == owner)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Removes and returns the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<(u64, DueTimer)> {
        let (&(due, seq), _) = self.entries.first_key_value()?;
        if due > now {
            return None;
        }
        self.due_by_seq.remove(&seq);
        self.entries.remove(&(due, seq)).map(|timer| (due, timer))
    }

    pub fn next_due(&self) -> Option<u64> {
        self.entries.keys().next().map(|(due, _)| *due)
    }
}
