//! Download build configurator.
//!
//! # Responsibility
//! - Publish artifact metadata for the configurator view.
//! - Load and save build configurations as JSON.
//!
//! # Invariants
//! - Imports are parse-or-reject: nothing is applied unless the whole
//!   document validates.

pub mod artifacts;
pub mod build_config;
pub mod toolbar;
