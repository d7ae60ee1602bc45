//! Shared runtime state built once at application startup.
//!
//! # Responsibility
//! - Own the view cache, scroll table and bootstrap gate for one page.
//! - Carry the injected page ports, config and local task spawner.
//!
//! # Invariants
//! - Every loader created from one runtime sees the same cache, table
//!   and gate; clones share state.
//! - The runtime is single-threaded (`Rc`), matching the UI event loop.

use crate::bootstrap::gate::BootstrapGate;
use crate::cache::scroll_table::ScrollPositionTable;
use crate::cache::view_cache::ViewCache;
use crate::config::{RuntimeConfig, RuntimeConfigError};
use crate::env::PageEnvironment;
use futures::task::{LocalSpawn, LocalSpawnExt, SpawnError};
use log::info;
use std::future::Future;
use std::rc::Rc;

struct RuntimeShared {
    views: ViewCache,
    scroll_positions: ScrollPositionTable,
    gate: BootstrapGate,
    env: PageEnvironment,
    config: RuntimeConfig,
    spawner: Rc<dyn LocalSpawn>,
}

/// Handle to the process-wide route-loading state.
#[derive(Clone)]
pub struct RouteRuntime {
    shared: Rc<RuntimeShared>,
}

impl RouteRuntime {
    /// Builds the runtime after validating `config`.
    ///
    /// # Errors
    /// - Returns the config validation error unchanged.
    pub fn new(
        env: PageEnvironment,
        config: RuntimeConfig,
        spawner: impl LocalSpawn + 'static,
    ) -> Result<Self, RuntimeConfigError> {
        config.validate()?;
        let scroll_positions = ScrollPositionTable::with_capacity(config.scroll_table_capacity);
        info!(
            "event=runtime_init module=loader status=ok build_profile={:?} scroll_capacity={:?}",
            config.build_profile, config.scroll_table_capacity
        );
        Ok(Self {
            shared: Rc::new(RuntimeShared {
                views: ViewCache::new(),
                scroll_positions,
                gate: BootstrapGate::new(),
                env,
                config,
                spawner: Rc::new(spawner),
            }),
        })
    }

    pub fn views(&self) -> &ViewCache {
        &self.shared.views
    }

    pub fn scroll_positions(&self) -> &ScrollPositionTable {
        &self.shared.scroll_positions
    }

    pub fn gate(&self) -> &BootstrapGate {
        &self.shared.gate
    }

    pub fn env(&self) -> &PageEnvironment {
        &self.shared.env
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.shared.config
    }

    pub(crate) fn spawn(&self, task: impl Future<Output = ()> + 'static) -> Result<(), SpawnError> {
        self.shared.spawner.spawn_local(task)
    }
}
