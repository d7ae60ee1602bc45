//! Asynchronous route loading.
//!
//! # Responsibility
//! - Hold the shared runtime state (`RouteRuntime`).
//! - Turn view-loader thunks into routes and per-navigation loaders.
//!
//! # See also
//! - `crate::router` for the layer that mounts and unmounts loaders.

pub mod async_route;
pub mod runtime;
