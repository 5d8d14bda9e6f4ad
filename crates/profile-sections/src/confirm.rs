//! Two-step commit for destructive transitions.
//!
//! A delete is only dispatched for a target that went through `request`
//! and was then taken out with `confirm`. Taking the target consumes it, so
//! one request yields at most one delete.

/// A row awaiting delete confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingDelete<T> {
    pub index: usize,
    pub item: T,
}

#[derive(Debug)]
pub struct ConfirmationGate<T> {
    pending: Option<PendingDelete<T>>,
}

impl<T> Default for ConfirmationGate<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> ConfirmationGate<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, index: usize, item: T) {
        self.pending = Some(PendingDelete { index, item });
    }

    pub fn pending(&self) -> Option<&PendingDelete<T>> {
        self.pending.as_ref()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Releases the target for deletion.
    pub fn confirm(&mut self) -> Option<PendingDelete<T>> {
        self.pending.take()
    }

    /// Drops the target without deleting anything.
    pub fn dismiss(&mut self) -> Option<PendingDelete<T>> {
        self.pending.take()
    }
}
