use super::models::{MessageKind, StatusMessage};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// How many entries the activity feed keeps by default
pub const DEFAULT_LOG_CAP: usize = 20;

/// Newest-first, capped activity log. Entries are never edited; the oldest
/// ones fall off the back once the cap is reached.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<StatusMessage>,
    cap: usize,
    next_id: u64,
}

impl ActivityLog {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
            next_id: 1,
        }
    }

    pub fn push(
        &mut self,
        kind: MessageKind,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> &StatusMessage {
        let entry = StatusMessage {
            id: self.next_id.to_string(),
            kind,
            message: message.into(),
            timestamp,
        };
        self.next_id += 1;

        self.entries.push_front(entry);
        self.entries.truncate(self.cap);
        &self.entries[0]
    }

    pub fn entries(&self) -> impl Iterator<Item = &StatusMessage> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&StatusMessage> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAP)
    }
}
