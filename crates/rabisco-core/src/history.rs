//! Linear undo/redo history of canvas snapshots.

use crate::canvas::CanvasState;

/// Ordered snapshots plus a cursor.
///
/// The cursor is `None` only while the history is empty. Entry 0 is the
/// baseline: undo never moves before it. Pushing after an undo discards every
/// entry past the cursor.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<CanvasState>,
    index: Option<usize>,
    limit: Option<usize>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history whose only entry is `baseline`.
    pub fn with_baseline(baseline: CanvasState) -> Self {
        let mut history = Self::new();
        history.snapshot(baseline);
        history
    }

    /// Keep at most `limit` entries, dropping the oldest first.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.map(|l| l.max(1));
        self.enforce_limit();
        self
    }

    /// Record `state` as the newest entry.
    pub fn snapshot(&mut self, state: CanvasState) {
        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push(state);
        self.index = Some(self.entries.len() - 1);
        self.enforce_limit();
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else { return };
        if self.entries.len() > limit {
            let excess = self.entries.len() - limit;
            self.entries.drain(..excess);
            self.index = self.index.map(|i| i.saturating_sub(excess));
        }
    }

    /// Step back one entry and return it.
    pub fn undo(&mut self) -> Option<&CanvasState> {
        match self.index {
            Some(i) if i > 0 => {
                self.index = Some(i - 1);
                self.entries.get(i - 1)
            }
            _ => None,
        }
    }

    /// Step forward one entry and return it.
    pub fn redo(&mut self) -> Option<&CanvasState> {
        match self.index {
            Some(i) if i + 1 < self.entries.len() => {
                self.index = Some(i + 1);
                self.entries.get(i + 1)
            }
            _ => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.entries.len())
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
