//! Dispatch history tracking.
//!
//! Provides an immutable log of the actions a store has reduced, in the
//! order they were applied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single successful reduction.
///
/// # Example
///
/// ```rust
/// use tally::core::DispatchRecord;
/// use chrono::Utc;
///
/// let record = DispatchRecord {
///     sequence: 1,
///     kind: "SCREAM".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.kind, "SCREAM");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// Position of this dispatch in the store's lifetime, starting at 1
    pub sequence: u64,
    /// Kind tag of the reduced action
    pub kind: String,
    /// When the new state was installed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of dispatches.
///
/// History is immutable: `record` returns a new history with the entry
/// appended. A bounded history drops its oldest entries once full.
///
/// # Example
///
/// ```rust
/// use tally::core::{DispatchHistory, DispatchRecord};
/// use chrono::Utc;
///
/// let history = DispatchHistory::bounded(2);
/// let history = ["SCREAM", "SILENCE", "MURMUR"]
///     .iter()
///     .enumerate()
///     .fold(history, |h, (i, kind)| {
///         h.record(DispatchRecord {
///             sequence: i as u64 + 1,
///             kind: kind.to_string(),
///             timestamp: Utc::now(),
///         })
///     });
///
/// assert_eq!(history.kinds(), vec!["SILENCE", "MURMUR"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchHistory {
    records: VecDeque<DispatchRecord>,
    capacity: Option<usize>,
}

impl DispatchHistory {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history that keeps at most `capacity` records.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity: Some(capacity),
        }
    }

    /// Record a dispatch, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, record: DispatchRecord) -> Self {
        let mut records = self.records.clone();
        records.push_back(record);
        if let Some(capacity) = self.capacity {
            while records.len() > capacity {
                records.pop_front();
            }
        }
        Self {
            records,
            capacity: self.capacity,
        }
    }

    /// Kind tags in dispatch order.
    pub fn kinds(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.kind.as_str()).collect()
    }

    /// Time between the first and last retained record.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.front(), self.records.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Most recent record, if any.
    pub fn last(&self) -> Option<&DispatchRecord> {
        self.records.back()
    }

    pub fn records(&self) -> impl Iterator<Item = &DispatchRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sequence: u64, kind: &str) -> DispatchRecord {
        DispatchRecord {
            sequence,
            kind: kind.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = DispatchHistory::new();
        assert!(history.is_empty());
        assert!(history.kinds().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = DispatchHistory::new();
        let new_history = history.record(record(1, "SCREAM"));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn kinds_follow_dispatch_order() {
        let history = DispatchHistory::new()
            .record(record(1, "SCREAM"))
            .record(record(2, "SILENCE"))
            .record(record(3, "MURMUR"));

        assert_eq!(history.kinds(), vec!["SCREAM", "SILENCE", "MURMUR"]);
        assert_eq!(history.last().map(|r| r.sequence), Some(3));
    }

    #[test]
    fn bounded_history_drops_oldest() {
        let history = DispatchHistory::bounded(2)
            .record(record(1, "A"))
            .record(record(2, "B"))
            .record(record(3, "C"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.kinds(), vec!["B", "C"]);
        assert_eq!(history.capacity(), Some(2));
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let history = DispatchHistory::bounded(0).record(record(1, "A"));
        assert!(history.is_empty());
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let history = DispatchHistory::new().record(record(1, "A"));

        std::thread::sleep(std::time::Duration::from_millis(10));

        let history = history.record(record(2, "B"));

        let duration = history.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn single_record_has_duration_zero() {
        let history = DispatchHistory::new().record(record(1, "A"));
        assert_eq!(history.duration(), Some(std::time::Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = DispatchHistory::bounded(5)
            .record(record(1, "A"))
            .record(record(2, "B"));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: DispatchHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
