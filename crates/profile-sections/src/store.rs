//! Collection state for one rendered section.
//!
//! Holds the server-ordered items and the single-editor cursor. The store
//! makes no remote calls; the controller is its only writer.

use crate::adapter::InsertPosition;
use crate::confirm::ConfirmationGate;
use std::fmt;

/// Where the section's state machine currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Editing a fresh placeholder at this index.
    Adding(usize),
    /// Editing the persisted item at this index.
    Editing(usize),
    /// The item at this index awaits delete confirmation.
    ConfirmingDelete(usize),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Adding(i) => write!(f, "adding at {}", i),
            Phase::Editing(i) => write!(f, "editing {}", i),
            Phase::ConfirmingDelete(i) => write!(f, "confirming delete of {}", i),
        }
    }
}

/// Snapshot of the ephemeral UI state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor<T> {
    pub editing_index: Option<usize>,
    pub is_adding: bool,
    pub pending_delete_target: Option<T>,
}

impl<T> Cursor<T> {
    pub fn is_idle(&self) -> bool {
        self.editing_index.is_none() && !self.is_adding && self.pending_delete_target.is_none()
    }
}

#[derive(Debug)]
pub struct CollectionStore<T> {
    items: Vec<T>,
    editing_index: Option<usize>,
    is_adding: bool,
    confirm: ConfirmationGate<T>,
}

impl<T> Default for CollectionStore<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            editing_index: None,
            is_adding: false,
            confirm: ConfirmationGate::new(),
        }
    }
}

impl<T: Clone> CollectionStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the items with a fresh snapshot and resets the cursor.
    pub fn initialize(&mut self, items: Vec<T>) {
        self.items = items;
        self.reset_cursor();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> Cursor<T> {
        Cursor {
            editing_index: self.editing_index,
            is_adding: self.is_adding,
            pending_delete_target: self.confirm.pending().map(|p| p.item.clone()),
        }
    }

    pub fn phase(&self) -> Phase {
        if let Some(pending) = self.confirm.pending() {
            return Phase::ConfirmingDelete(pending.index);
        }
        match (self.editing_index, self.is_adding) {
            (Some(i), true) => Phase::Adding(i),
            (Some(i), false) => Phase::Editing(i),
            (None, _) => Phase::Idle,
        }
    }

    /// Inserts `placeholder` and points the cursor at it. Returns its index.
    pub(crate) fn begin_add(&mut self, placeholder: T, at: InsertPosition) -> usize {
        debug_assert_eq!(self.phase(), Phase::Idle);
        let index = match at {
            InsertPosition::Front => {
                self.items.insert(0, placeholder);
                0
            }
            InsertPosition::Back => {
                self.items.push(placeholder);
                self.items.len() - 1
            }
        };
        self.editing_index = Some(index);
        self.is_adding = true;
        index
    }

    pub(crate) fn begin_edit(&mut self, index: usize) {
        debug_assert!(index < self.items.len());
        self.editing_index = Some(index);
        self.is_adding = false;
    }

    /// Removes the placeholder created by `begin_add`, if one is being edited.
    pub(crate) fn discard_placeholder(&mut self) -> Option<T> {
        match (self.editing_index, self.is_adding) {
            (Some(i), true) if i < self.items.len() => Some(self.items.remove(i)),
            _ => None,
        }
    }

    pub(crate) fn request_delete(&mut self, index: usize) {
        let item = self.items[index].clone();
        self.confirm.request(index, item);
    }

    pub(crate) fn confirmation(&mut self) -> &mut ConfirmationGate<T> {
        &mut self.confirm
    }

    pub(crate) fn remove(&mut self, index: usize) -> T {
        self.items.remove(index)
    }

    pub(crate) fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub(crate) fn reset_cursor(&mut self) {
        self.editing_index = None;
        self.is_adding = false;
        self.confirm.dismiss();
    }
}
