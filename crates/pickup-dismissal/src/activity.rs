//! Bounded, newest-first feed of human-readable events.

use pickup_core::SharedClock;
use pickup_models::ActivityEntry;
use std::collections::VecDeque;
use tracing::info;

/// Maximum number of entries the feed retains.
pub const ACTIVITY_LOG_CAPACITY: usize = 20;

pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    next_id: u64,
    clock: SharedClock,
}

impl ActivityLog {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            entries: VecDeque::with_capacity(ACTIVITY_LOG_CAPACITY + 1),
            next_id: 1,
            clock,
        }
    }

    /// Records `message` as the newest entry, evicting the oldest entries
    /// beyond [`ACTIVITY_LOG_CAPACITY`].
    pub fn append(&mut self, message: impl Into<String>) -> ActivityEntry {
        let entry = ActivityEntry {
            id: self.next_id,
            message: message.into(),
            timestamp: self.clock.now(),
        };
        self.next_id += 1;

        info!(target: "pickup::activity", id = entry.id, "{}", entry.message);

        self.entries.push_front(entry.clone());
        self.entries.truncate(ACTIVITY_LOG_CAPACITY);
        entry
    }

    /// Snapshot of the feed, newest first.
    pub fn list(&self) -> Vec<ActivityEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&ActivityEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ActivityLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityLog")
            .field("entries", &self.entries)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickup_core::{Clock, ManualClock};
    use std::sync::Arc;

    fn log_with_clock() -> (ActivityLog, ManualClock) {
        let clock = ManualClock::default();
        (ActivityLog::new(Arc::new(clock.clone())), clock)
    }

    #[test]
    fn test_append_returns_entry_with_clock_time() {
        let (mut log, clock) = log_with_clock();
        let entry = log.append("Teacher Mrs. Johnson logged into pickup portal");
        assert_eq!(entry.id, 1);
        assert_eq!(entry.timestamp, clock.now());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_list_is_newest_first() {
        let (mut log, clock) = log_with_clock();
        log.append("first");
        clock.advance_seconds(5);
        log.append("second");
        clock.advance_seconds(5);
        log.append("third");

        let messages: Vec<_> = log.list().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let (mut log, _) = log_with_clock();
        let ids: Vec<u64> = (0..5).map(|i| log.append(format!("m{i}")).id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_capacity_is_never_exceeded() {
        let (mut log, _) = log_with_clock();
        for i in 0..100 {
            log.append(format!("event {i}"));
            assert!(log.len() <= ACTIVITY_LOG_CAPACITY);
        }
        assert_eq!(log.len(), ACTIVITY_LOG_CAPACITY);
    }

    #[test]
    fn test_oldest_evicted_first() {
        let (mut log, _) = log_with_clock();
        for i in 0..25 {
            log.append(format!("event {i}"));
        }

        let entries = log.list();
        assert_eq!(entries.first().unwrap().message, "event 24");
        assert_eq!(entries.last().unwrap().message, "event 5");
        assert!(entries.iter().all(|e| e.message != "event 4"));
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let (mut log, _) = log_with_clock();
        log.append("before");
        let snapshot = log.list();
        log.append("after");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.latest().unwrap().message, "after");
    }
}
