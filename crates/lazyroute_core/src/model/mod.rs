//! Navigation and view model shared by the route-loading runtime.
//!
//! # Responsibility
//! - Define the data the router hands to loaders.
//! - Define what a lazily loaded view looks like to the core.
//!
//! # Invariants
//! - Model types carry no behavior that mutates shared runtime state.

pub mod navigation;
pub mod view;
