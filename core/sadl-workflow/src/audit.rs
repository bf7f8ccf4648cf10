//! Bounded, newest-first audit log.
//!
//! Every operation the coordinator performs ends up here as one
//! human-readable line. Entries are never edited or reordered; once the
//! capacity is reached the oldest entry is evicted.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// A single audit log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Monotonic sequence number, assigned on append.
    pub seq: u64,
    /// When the entry was appended.
    pub timestamp: DateTime<Local>,
    /// The message.
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S%.3f"), self.message)
    }
}

/// Newest-first ring of log entries.
#[derive(Debug, Clone)]
pub struct AuditLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_seq: u64,
}

impl AuditLog {
    /// Creates an empty log holding at most `capacity` entries (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            next_seq: 0,
        }
    }

    /// Prepends an entry, evicting the oldest if full.
    pub fn append(&mut self, message: impl Into<String>) -> &LogEntry {
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        let entry = LogEntry {
            seq: self.next_seq,
            timestamp: Local::now(),
            message: message.into(),
        };
        self.next_seq += 1;
        self.entries.push_front(entry);
        &self.entries[0]
    }

    /// Returns the entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Returns the most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been logged (or everything was evicted).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries retained.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total entries ever appended, including evicted ones.
    #[must_use]
    pub fn total_appended(&self) -> u64 {
        self.next_seq
    }

    /// Copies the entries out, newest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}
