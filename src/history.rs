//! Linear undo/redo log over immutable snapshots.

use std::collections::VecDeque;

use crate::models::HistoryStatus;

/// Classic two-stack history.
///
/// `past` runs oldest → most recent; `future` runs most-recently-undone
/// first. A fresh [`commit`](History::commit) always truncates `future`.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: Vec<T>,
    current: T,
    future: VecDeque<T>,
}

impl<T> History<T> {
    pub fn new(current: T) -> Self {
        Self {
            past: Vec::new(),
            current,
            future: VecDeque::new(),
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    /// Record `next` as a new undoable step.
    pub fn commit(&mut self, next: T) {
        let previous = std::mem::replace(&mut self.current, next);
        self.past.push(previous);
        self.future.clear();
    }

    /// Replace the current snapshot without recording a step.
    ///
    /// Used for presentation-only edits such as expand/collapse.
    pub fn replace_current(&mut self, next: T) {
        self.current = next;
    }

    /// Step back once. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let undone = std::mem::replace(&mut self.current, previous);
        self.future.push_front(undone);
        true
    }

    /// Step forward once. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let previous = std::mem::replace(&mut self.current, next);
        self.past.push(previous);
        true
    }

    /// Forget every undo and redo step, keeping the current snapshot.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo_depth: self.past.len(),
            redo_depth: self.future.len(),
        }
    }
}
