//! Route table that mounts one loader per navigation.
//!
//! # Responsibility
//! - Match the current history location against registered patterns.
//! - Unmount the previous loader and mount a fresh one on every
//!   history transition.
//! - Forward the history handle to views as router-injected props.
//!
//! # Invariants
//! - At most one loader is mounted at a time.
//! - The outgoing loader is unmounted before the incoming one mounts, so
//!   its scroll offset is recorded before the viewport moves.
//! - Routes are tried in registration order; the first match wins.

pub mod history;
pub mod pattern;

use crate::loader::async_route::{AsyncRoute, AsyncRouteLoader, LoaderPhase, RouteOutput};
use crate::loader::runtime::RouteRuntime;
use crate::model::navigation::{HistoryAction, Location, NavigationDescriptor};
use crate::model::view::{HistoryHandle, RouteProps};
use history::MemoryHistory;
use log::{info, warn};
use pattern::RoutePattern;
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Router registration and matching errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    InvalidPattern { pattern: String, reason: String },
    DuplicatePattern(String),
    NoMatch(String),
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { pattern, reason } => {
                write!(f, "route pattern `{pattern}` is invalid: {reason}")
            }
            Self::DuplicatePattern(pattern) => {
                write!(f, "route pattern already registered: {pattern}")
            }
            Self::NoMatch(pathname) => write!(f, "no route matches path: {pathname}"),
        }
    }
}

impl Error for RouteError {}

struct RouteEntry {
    pattern: RoutePattern,
    route: AsyncRoute,
}

struct RouterInner {
    runtime: RouteRuntime,
    history: Rc<MemoryHistory>,
    routes: RefCell<Vec<RouteEntry>>,
    active: RefCell<Option<AsyncRouteLoader>>,
    render_requests: Rc<Cell<u64>>,
}

/// Switch-style router over a `MemoryHistory`.
pub struct Router {
    inner: Rc<RouterInner>,
}

impl Router {
    /// Creates a router and subscribes it to `history`.
    pub fn new(runtime: RouteRuntime, history: Rc<MemoryHistory>) -> Self {
        let inner = Rc::new(RouterInner {
            runtime,
            history: Rc::clone(&history),
            routes: RefCell::new(Vec::new()),
            active: RefCell::new(None),
            render_requests: Rc::new(Cell::new(0)),
        });

        let weak = Rc::downgrade(&inner);
        history.listen(Rc::new(move |_location: &Location, _action: HistoryAction| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if let Err(err) = inner.sync() {
                warn!("event=route_sync module=router status=error error={err}");
            }
        }));

        Self { inner }
    }

    /// Registers an exact-match route.
    pub fn route(&self, pattern: &str, route: AsyncRoute) -> Result<(), RouteError> {
        self.register(RoutePattern::parse(pattern, true)?, route)
    }

    /// Registers a route that also matches deeper paths.
    pub fn prefix_route(&self, pattern: &str, route: AsyncRoute) -> Result<(), RouteError> {
        self.register(RoutePattern::parse(pattern, false)?, route)
    }

    fn register(&self, pattern: RoutePattern, route: AsyncRoute) -> Result<(), RouteError> {
        let mut routes = self.inner.routes.borrow_mut();
        if routes
            .iter()
            .any(|entry| entry.pattern.as_str() == pattern.as_str())
        {
            return Err(RouteError::DuplicatePattern(pattern.as_str().to_string()));
        }
        info!(
            "event=route_register module=router status=ok pattern={} view={}",
            pattern.as_str(),
            route.identity().label()
        );
        routes.push(RouteEntry { pattern, route });
        Ok(())
    }

    /// Mounts the loader for the current location.
    pub fn start(&self) -> Result<(), RouteError> {
        self.inner.sync()
    }

    pub fn history(&self) -> &Rc<MemoryHistory> {
        &self.inner.history
    }

    pub fn runtime(&self) -> &RouteRuntime {
        &self.inner.runtime
    }

    /// Current output, `None` before `start` or after a failed match.
    pub fn render(&self) -> Option<RouteOutput> {
        self.inner.active.borrow().as_ref().map(AsyncRouteLoader::render)
    }

    pub fn active_phase(&self) -> Option<LoaderPhase> {
        self.inner.active.borrow().as_ref().map(AsyncRouteLoader::phase)
    }

    /// Retries the active loader after a failed load.
    pub fn retry(&self) {
        if let Some(loader) = self.inner.active.borrow().as_ref() {
            loader.retry();
        }
    }

    /// Number of async re-render requests raised by mounted loaders.
    pub fn render_requests(&self) -> u64 {
        self.inner.render_requests.get()
    }
}

impl RouterInner {
    fn sync(&self) -> Result<(), RouteError> {
        let location = self.history.location();
        let action = self.history.action();

        let selected = self.routes.borrow().iter().find_map(|entry| {
            entry
                .pattern
                .matches(&location.pathname)
                .map(|route_match| {
                    let path = entry.pattern.as_str().to_string();
                    (path, route_match, entry.route.clone())
                })
        });

        let previous = self.active.borrow_mut().take();
        if let Some(previous) = previous {
            previous.unmount();
        }

        let Some((path, route_match, route)) = selected else {
            return Err(RouteError::NoMatch(location.pathname));
        };

        let history: Rc<dyn HistoryHandle> = self.history.clone();
        let props = RouteProps {
            descriptor: NavigationDescriptor {
                path,
                action,
                location,
                route_match,
            },
            history: Some(history),
        };

        let loader = route.instantiate(&self.runtime, props);
        let requests = Rc::clone(&self.render_requests);
        loader.on_change(move || requests.set(requests.get() + 1));
        loader.mount();
        *self.active.borrow_mut() = Some(loader);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{RouteError, Router};
    use crate::config::RuntimeConfig;
    use crate::env::recording::RecordingPage;
    use crate::env::PageEnvironment;
    use crate::loader::async_route::async_route;
    use crate::loader::runtime::RouteRuntime;
    use crate::model::view::{LoadError, ResolvedView};
    use crate::router::history::MemoryHistory;
    use futures::executor::LocalPool;
    use std::rc::Rc;

    fn failing() -> Result<ResolvedView, LoadError> {
        Err(LoadError::Fetch("unreachable".to_string()))
    }

    fn router(pool: &LocalPool, path: &str) -> Router {
        let page = Rc::new(RecordingPage::default());
        let runtime = RouteRuntime::new(
            PageEnvironment::from_single(page),
            RuntimeConfig::default(),
            pool.spawner(),
        )
        .expect("runtime should build");
        Router::new(runtime, Rc::new(MemoryHistory::new(path)))
    }

    #[test]
    fn rejects_duplicate_patterns() {
        let pool = LocalPool::new();
        let router = router(&pool, "/");
        router
            .route("/", async_route("home", || async { failing() }))
            .expect("first registration");
        let err = router
            .route("/", async_route("home", || async { failing() }))
            .expect_err("duplicate must fail");
        assert_eq!(err, RouteError::DuplicatePattern("/".to_string()));
    }

    #[test]
    fn start_without_match_reports_no_match() {
        let pool = LocalPool::new();
        let router = router(&pool, "/missing");
        router
            .route("/", async_route("home", || async { failing() }))
            .expect("registration");
        let err = router.start().expect_err("nothing matches");
        assert_eq!(err, RouteError::NoMatch("/missing".to_string()));
        assert!(router.render().is_none());
    }
}
