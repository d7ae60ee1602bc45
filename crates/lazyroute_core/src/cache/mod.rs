//! Shared caches owned by the route runtime.
//!
//! # Responsibility
//! - Keep resolved views so repeat navigations render synchronously.
//! - Keep scroll offsets so POP navigations land where the user left.
//!
//! # Invariants
//! - Both caches live as long as the runtime that owns them.
//! - Mutation happens on the single UI thread only (`RefCell`, no locks).

pub mod scroll_table;
pub mod view_cache;
