//! # Activity Feed
//!
//! Append-to-front log of human-readable contribution events. Entries are
//! formatted text only; no structured event data is kept. The log is
//! unbounded.
//!
//! ## Example
//!
//! ```rust
//! use nucleus_core::feed::ActivityFeed;
//!
//! let mut feed = ActivityFeed::new();
//! feed.record("Lab_X added material: Olive Wood");
//! feed.record("Lab_Y added material: Cork");
//! assert_eq!(feed.list()[0], "Lab_Y added material: Cork");
//! ```

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Format the feed line for an accepted material submission.
pub fn submission_entry(contributor: &str, material_name: &str) -> String {
    format!("{} added material: {}", contributor, material_name)
}

/// Newest-first log of contribution events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityFeed {
    entries: VecDeque<String>,
}

impl ActivityFeed {
    /// Create an empty feed.
    pub fn new() -> Self {
        ActivityFeed::default()
    }

    /// Prepend an entry so it becomes position 0.
    pub fn record(&mut self, text: impl Into<String>) {
        self.entries.push_front(text.into());
    }

    /// All entries, most recent first.
    pub fn list(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    /// Iterate entries, most recent first, without cloning.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Most recent entry, if any
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
