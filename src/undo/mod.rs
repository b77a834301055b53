//! Linear undo/redo history over full-content snapshots.
//!
//! ## undo/ Invariants
//! - `current_index == None` means the stack is empty or every recorded snapshot has been undone.
//! - Recording at any point other than the tip truncates the redo tail before appending.
//! - The stack never holds more than `max_snapshots` entries; the oldest is evicted first.

use crate::rope::Rope;
use std::time::SystemTime;

/// A single recorded state of the buffer.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub content: Vec<u8>,
    pub cursor_offset: usize,
    pub timestamp: SystemTime,
    pub description: String,
}

/// Bounded linear undo/redo stack of full-content snapshots.
#[derive(Debug)]
pub struct UndoStack {
    snapshots: Vec<Snapshot>,
    current_index: Option<usize>,
    max_snapshots: usize,
}

impl UndoStack {
    pub fn new(max_snapshots: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            current_index: None,
            max_snapshots: max_snapshots.max(1),
        }
    }

    /// Records the current content of `rope` as a new snapshot at `cursor_offset`. Any redo tail
    /// past the current position is discarded. If the stack exceeds `max_snapshots`, the oldest
    /// snapshot is dropped and `current_index` is decremented to stay pointed at the same entry.
    pub fn record(&mut self, rope: &Rope, cursor_offset: usize, description: impl Into<String>) {
        let tip = self.current_index.map(|i| i + 1).unwrap_or(0);
        self.snapshots.truncate(tip);

        self.snapshots.push(Snapshot {
            content: rope.to_string_lossy().into_bytes(),
            cursor_offset,
            timestamp: SystemTime::now(),
            description: description.into(),
        });
        self.current_index = Some(self.snapshots.len() - 1);

        if self.snapshots.len() > self.max_snapshots {
            self.snapshots.remove(0);
            self.current_index = self.current_index.map(|i| i.saturating_sub(1));
        }
    }

    /// Moves one step back and returns the snapshot now current, or `None` if already at the
    /// oldest recorded state.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        match self.current_index {
            None => None,
            Some(0) => {
                self.current_index = None;
                None
            }
            Some(i) => {
                self.current_index = Some(i - 1);
                self.snapshots.get(i - 1)
            }
        }
    }

    /// Moves one step forward and returns the snapshot now current, or `None` if already at the
    /// newest recorded state.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = match self.current_index {
            None if !self.snapshots.is_empty() => 0,
            Some(i) if i + 1 < self.snapshots.len() => i + 1,
            _ => return None,
        };
        self.current_index = Some(next);
        self.snapshots.get(next)
    }

    pub fn can_undo(&self) -> bool {
        self.current_index.is_some()
    }

    pub fn can_redo(&self) -> bool {
        match self.current_index {
            None => !self.snapshots.is_empty(),
            Some(i) => i + 1 < self.snapshots.len(),
        }
    }

    /// The snapshot currently applied, if any.
    pub fn current(&self) -> Option<&Snapshot> {
        self.current_index.and_then(|i| self.snapshots.get(i))
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
