//! One-shot latches for the first navigation.
//!
//! Two separate facts are tracked: whether any load has been dispatched
//! yet (drives the progress bar) and whether bootstrap has completed
//! (drives the one-time page side effects). A failed first load sets the
//! former but not the latter.

use std::cell::Cell;

/// First-navigation state shared by every loader of a runtime.
#[derive(Debug)]
pub struct BootstrapGate {
    first: Cell<bool>,
    dispatched: Cell<bool>,
}

impl Default for BootstrapGate {
    fn default() -> Self {
        Self::new()
    }
}

impl BootstrapGate {
    pub fn new() -> Self {
        Self {
            first: Cell::new(true),
            dispatched: Cell::new(false),
        }
    }

    /// True until the first successful load completes bootstrap.
    pub fn is_first(&self) -> bool {
        self.first.get()
    }

    /// Marks bootstrap complete. No-op when already complete.
    pub fn complete(&self) {
        self.first.set(false);
    }

    /// Check-and-set: returns true only for the caller that performs the
    /// transition.
    pub fn claim(&self) -> bool {
        self.first.replace(false)
    }

    /// Records a load dispatch. Returns true only for the very first one.
    pub fn dispatch(&self) -> bool {
        !self.dispatched.replace(true)
    }

    pub fn has_dispatched(&self) -> bool {
        self.dispatched.get()
    }
}
