//! Core runtime for lazily loaded single-page-application routes.
//! Owns the view cache, scroll bookkeeping and one-time page bootstrap.

pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod configurator;
pub mod env;
pub mod loader;
pub mod logging;
pub mod model;
pub mod router;

pub use bootstrap::gate::BootstrapGate;
pub use cache::scroll_table::{ScrollOffset, ScrollPositionTable};
pub use cache::view_cache::ViewCache;
pub use config::{BuildProfile, RuntimeConfig, RuntimeConfigError};
pub use configurator::artifacts::{lwjgl_3_0_0, Artifact, ArtifactTable, NativePlatform};
pub use configurator::build_config::{BuildConfig, ConfigImportError};
pub use configurator::toolbar::{Alerter, BuildToolbar, SelectedFile};
pub use env::recording::{PageEvent, RecordingPage};
pub use env::{
    Analytics, PageEnvironment, ProgressIndicator, ScriptLoader, ScrollRestoration, Viewport,
};
pub use loader::async_route::{
    async_route, AsyncRoute, AsyncRouteLoader, LoaderPhase, LoadingPlaceholder, RouteOutput,
};
pub use loader::runtime::RouteRuntime;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::navigation::{HistoryAction, Location, NavigationDescriptor, RouteMatch};
pub use model::view::{
    HistoryHandle, LoadError, ResolvedView, RouteProps, ViewIdentity, ViewLoader, ViewModule,
};
pub use router::history::MemoryHistory;
pub use router::{RouteError, Router};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
