/// Time-retention window over immutable snapshots.
///
/// Entries are appended in ascending timestamp order and evicted in a single
/// prune step at the front, so the retention invariant holds after every
/// record call. Entries are never mutated once stored.
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct TimedEntry<T> {
    pub timestamp: i64,
    pub value: T,
}

#[derive(Debug, Clone)]
pub struct HistoryWindow<T> {
    entries: VecDeque<TimedEntry<T>>,
    retention_ms: i64,
}

impl<T> HistoryWindow<T> {
    pub fn new(retention_ms: i64) -> Self {
        Self {
            entries: VecDeque::new(),
            retention_ms,
        }
    }

    /// Append a snapshot, evicting everything older than the retention
    /// period relative to `timestamp`.
    pub fn record(&mut self, timestamp: i64, value: T) {
        self.prune(timestamp);
        self.entries.push_back(TimedEntry { timestamp, value });
    }

    /// Drop entries with `timestamp < now - retention`.
    pub fn prune(&mut self, now: i64) {
        let cutoff = now - self.retention_ms;
        while let Some(front) = self.entries.front() {
            if front.timestamp < cutoff {
                self.entries.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn oldest(&self) -> Option<&TimedEntry<T>> {
        self.entries.front()
    }

    pub fn newest(&self) -> Option<&TimedEntry<T>> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedEntry<T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
