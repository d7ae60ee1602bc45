//! Navigation-key → viewport offset table.
//!
//! # Responsibility
//! - Remember where the viewport was when a route unmounted.
//! - Hand the offset back when the same history entry is popped to.
//!
//! # Invariants
//! - Writes happen only on loader unmount; reads only on POP mounts.
//! - Unbounded unless a capacity is configured; a bounded table evicts
//!   the least recently used key.

use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::num::NonZeroUsize;

/// Viewport scroll offset in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

impl ScrollOffset {
    pub const ORIGIN: ScrollOffset = ScrollOffset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

enum Positions {
    Unbounded(HashMap<String, ScrollOffset>),
    Bounded(LruCache<String, ScrollOffset>),
}

/// Shared scroll position table.
pub struct ScrollPositionTable {
    positions: RefCell<Positions>,
}

impl Default for ScrollPositionTable {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl ScrollPositionTable {
    pub fn unbounded() -> Self {
        Self {
            positions: RefCell::new(Positions::Unbounded(HashMap::new())),
        }
    }

    /// Creates a table that keeps at most `capacity` keys.
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            positions: RefCell::new(Positions::Bounded(LruCache::new(capacity))),
        }
    }

    /// Builds a table from an optional configured capacity. `None` or zero
    /// means unbounded.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        match capacity.and_then(NonZeroUsize::new) {
            Some(capacity) => Self::bounded(capacity),
            None => Self::unbounded(),
        }
    }

    pub fn record(&self, key: &str, offset: ScrollOffset) {
        match &mut *self.positions.borrow_mut() {
            Positions::Unbounded(map) => {
                map.insert(key.to_string(), offset);
            }
            Positions::Bounded(lru) => {
                lru.put(key.to_string(), offset);
            }
        }
    }

    pub fn lookup(&self, key: &str) -> Option<ScrollOffset> {
        match &mut *self.positions.borrow_mut() {
            Positions::Unbounded(map) => map.get(key).copied(),
            Positions::Bounded(lru) => lru.get(key).copied(),
        }
    }

    pub fn len(&self) -> usize {
        match &*self.positions.borrow() {
            Positions::Unbounded(map) => map.len(),
            Positions::Bounded(lru) => lru.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured bound, `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        match &*self.positions.borrow() {
            Positions::Unbounded(_) => None,
            Positions::Bounded(lru) => Some(lru.cap().get()),
        }
    }
}
