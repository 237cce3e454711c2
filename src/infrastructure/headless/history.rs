//! Session history kept in memory.

use tracing::trace;

use crate::domain::entities::AttachmentId;
use crate::domain::ports::HistoryPort;

/// Kind of history write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryWrite {
    /// `pushState`.
    Push,
    /// `replaceState`.
    Replace,
}

#[derive(Debug, Clone)]
struct Entry {
    url: String,
    state: Option<AttachmentId>,
}

/// Browser-like history stack with a cursor.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Entry>,
    cursor: usize,
    writes: Vec<(HistoryWrite, String)>,
}

impl MemoryHistory {
    /// History holding a single entry for `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            entries: vec![Entry {
                url: url.into(),
                state: None,
            }],
            cursor: 0,
            writes: Vec::new(),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history has at least one entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// State object of the current entry.
    #[must_use]
    pub fn state(&self) -> Option<AttachmentId> {
        self.entries[self.cursor].state
    }

    /// Writes performed so far.
    #[must_use]
    pub fn writes(&self) -> &[(HistoryWrite, String)] {
        &self.writes
    }

    /// Number of writes of the given kind.
    #[must_use]
    pub fn count(&self, kind: HistoryWrite) -> usize {
        self.writes.iter().filter(|(write, _)| *write == kind).count()
    }

    /// Moves one entry back. Returns false at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Moves one entry forward. Returns false at the newest entry.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

impl HistoryPort for MemoryHistory {
    fn location(&self) -> String {
        self.entries[self.cursor].url.clone()
    }

    fn push_state(&mut self, url: &str, state: Option<AttachmentId>) {
        trace!(url, "pushState");
        self.entries.truncate(self.cursor + 1);
        self.entries.push(Entry {
            url: url.to_string(),
            state,
        });
        self.cursor += 1;
        self.writes.push((HistoryWrite::Push, url.to_string()));
    }

    fn replace_state(&mut self, url: &str, state: Option<AttachmentId>) {
        trace!(url, "replaceState");
        self.entries[self.cursor] = Entry {
            url: url.to_string(),
            state,
        };
        self.writes.push((HistoryWrite::Replace, url.to_string()));
    }
}
