//! Process-wide resolved view cache.
//!
//! # Invariants
//! - At most one resolved view is stored per `ViewIdentity`.
//! - Entries are never evicted for the runtime lifetime.
//! - The cache does not arbitrate writers: the last `set` wins.

use crate::model::view::{ResolvedView, ViewIdentity};
use std::cell::RefCell;
use std::collections::HashMap;

/// Identity → resolved view map shared by every loader of one runtime.
#[derive(Default)]
pub struct ViewCache {
    views: RefCell<HashMap<ViewIdentity, ResolvedView>>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the resolved view for `identity`, if any load completed.
    pub fn get(&self, identity: &ViewIdentity) -> Option<ResolvedView> {
        self.views.borrow().get(identity).cloned()
    }

    /// Stores `view` for `identity`, replacing any earlier entry.
    pub fn set(&self, identity: &ViewIdentity, view: ResolvedView) {
        self.views.borrow_mut().insert(identity.clone(), view);
    }

    pub fn contains(&self, identity: &ViewIdentity) -> bool {
        self.views.borrow().contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.views.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.borrow().is_empty()
    }
}
