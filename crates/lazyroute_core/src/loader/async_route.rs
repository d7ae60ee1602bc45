//! Lazily loaded route wrapper and its per-navigation loader.
//!
//! # Responsibility
//! - Wrap a view-loader thunk into an `AsyncRoute` with a stable identity.
//! - Drive one navigation through `Loading -> Ready | Failed`, coordinating
//!   the progress bar, page bootstrap, analytics and scroll policy.
//!
//! # Invariants
//! - A cache hit is observed before the first render; no placeholder flicker.
//! - The progress bar is never started for the first dispatched load, and
//!   is started for every later cache-miss load, even after a failed first
//!   load.
//! - A continuation never mutates render state after unmount, but a
//!   successful load is always written to the cache.
//! - Failed loads never reach the cache, so the next mount retries.
//! - `unmount` is terminal; later calls on the instance are no-ops.

use crate::bootstrap::run_page_bootstrap;
use crate::cache::scroll_table::ScrollOffset;
use crate::loader::runtime::RouteRuntime;
use crate::model::navigation::HistoryAction;
use crate::model::view::{
    LoadError, ResolvedView, RouteProps, ViewIdentity, ViewLoadFuture, ViewLoader,
};
use futures::FutureExt;
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::rc::Rc;

/// Spinner size shown while a view loads.
pub const LOADING_SPINNER_SIZE: u32 = 128;

/// A view-loader thunk bound to one `ViewIdentity`.
///
/// Every loader instantiated from the same `AsyncRoute` (or its clones)
/// shares one cache slot.
#[derive(Clone)]
pub struct AsyncRoute {
    identity: ViewIdentity,
    loader: ViewLoader,
}

/// Wraps a lazy view loader into a route the router can instantiate.
pub fn async_route<F, Fut>(label: impl Into<String>, loader: F) -> AsyncRoute
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<ResolvedView, LoadError>> + 'static,
{
    let loader: ViewLoader = Rc::new(move || -> ViewLoadFuture { loader().boxed_local() });
    AsyncRoute {
        identity: ViewIdentity::new(label),
        loader,
    }
}

impl AsyncRoute {
    pub fn identity(&self) -> &ViewIdentity {
        &self.identity
    }

    /// Creates the loader for one navigation.
    ///
    /// The initial render state is decided here: `Ready` on cache hit,
    /// `Loading` otherwise.
    pub fn instantiate(&self, runtime: &RouteRuntime, props: RouteProps) -> AsyncRouteLoader {
        let initial = match runtime.views().get(&self.identity) {
            Some(view) => RenderState::Ready(view),
            None => RenderState::Loading,
        };
        AsyncRouteLoader {
            route: self.clone(),
            runtime: runtime.clone(),
            props,
            instance: Rc::new(InstanceState {
                mounted: Cell::new(false),
                unmounted: Cell::new(false),
                progress_started: Cell::new(false),
                render: RefCell::new(initial),
                on_change: RefCell::new(None),
            }),
        }
    }
}

impl Debug for AsyncRoute {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncRoute")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Render phase of one loader instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    Loading,
    Ready,
    Failed,
}

enum RenderState {
    Loading,
    Ready(ResolvedView),
    Failed(LoadError),
}

impl RenderState {
    fn phase(&self) -> LoaderPhase {
        match self {
            Self::Loading => LoaderPhase::Loading,
            Self::Ready(_) => LoaderPhase::Ready,
            Self::Failed(_) => LoaderPhase::Failed,
        }
    }
}

/// Placeholder shown while the view module is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingPlaceholder {
    pub size: u32,
    /// Spinner waits briefly before showing to avoid flashing on fast loads.
    pub delay: bool,
}

impl Default for LoadingPlaceholder {
    fn default() -> Self {
        Self {
            size: LOADING_SPINNER_SIZE,
            delay: true,
        }
    }
}

/// What the renderer should draw for a loader right now.
pub enum RouteOutput {
    Loading(LoadingPlaceholder),
    View {
        view: ResolvedView,
        props: RouteProps,
    },
    Failed(LoadError),
}

impl RouteOutput {
    pub fn phase(&self) -> LoaderPhase {
        match self {
            Self::Loading(_) => LoaderPhase::Loading,
            Self::View { .. } => LoaderPhase::Ready,
            Self::Failed(_) => LoaderPhase::Failed,
        }
    }

    pub fn view_name(&self) -> Option<&str> {
        match self {
            Self::View { view, .. } => Some(view.name()),
            _ => None,
        }
    }

    /// Renders through the resolved view, or a plain marker otherwise.
    pub fn to_markup(&self) -> String {
        match self {
            Self::Loading(placeholder) => format!(
                "<spinner size={} delay={}/>",
                placeholder.size, placeholder.delay
            ),
            Self::View { view, props } => view.render(props),
            Self::Failed(err) => format!("<load-error>{err}</load-error>"),
        }
    }
}

impl Debug for RouteOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading(placeholder) => f.debug_tuple("Loading").field(placeholder).finish(),
            Self::View { view, props } => f
                .debug_struct("View")
                .field("view", &view.name())
                .field("props", props)
                .finish(),
            Self::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
        }
    }
}

struct InstanceState {
    mounted: Cell<bool>,
    unmounted: Cell<bool>,
    progress_started: Cell<bool>,
    render: RefCell<RenderState>,
    on_change: RefCell<Option<Rc<dyn Fn()>>>,
}

impl InstanceState {
    fn transition(&self, next: RenderState) {
        *self.render.borrow_mut() = next;
        // Clone out first so the callback may re-enter `render`.
        let callback = self.on_change.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}

/// Stateful unit for one navigation to one `AsyncRoute`.
pub struct AsyncRouteLoader {
    route: AsyncRoute,
    runtime: RouteRuntime,
    props: RouteProps,
    instance: Rc<InstanceState>,
}

impl AsyncRouteLoader {
    pub fn identity(&self) -> &ViewIdentity {
        &self.route.identity
    }

    pub fn props(&self) -> &RouteProps {
        &self.props
    }

    pub fn phase(&self) -> LoaderPhase {
        self.instance.render.borrow().phase()
    }

    pub fn is_mounted(&self) -> bool {
        self.instance.mounted.get()
    }

    /// Registers the re-render request fired on async state transitions.
    pub fn on_change(&self, callback: impl Fn() + 'static) {
        *self.instance.on_change.borrow_mut() = Some(Rc::new(callback));
    }

    /// Returns what should be drawn for the current state.
    pub fn render(&self) -> RouteOutput {
        match &*self.instance.render.borrow() {
            RenderState::Loading => RouteOutput::Loading(LoadingPlaceholder::default()),
            RenderState::Ready(view) => RouteOutput::View {
                view: Rc::clone(view),
                props: self.props.clone(),
            },
            RenderState::Failed(err) => RouteOutput::Failed(err.clone()),
        }
    }

    /// Runs mount side effects.
    ///
    /// Cache hit: pageview, then POP scroll restore or scroll to top.
    /// Cache miss: progress bar (except on the first dispatch), background
    /// load, scroll to top.
    pub fn mount(&self) {
        if self.instance.mounted.get() || self.instance.unmounted.get() {
            warn!(
                "event=loader_mount module=loader status=ignored view={} reason=already_mounted_or_unmounted",
                self.route.identity.label()
            );
            return;
        }
        self.instance.mounted.set(true);

        // Another instance may have resolved this identity after we were built.
        if matches!(&*self.instance.render.borrow(), RenderState::Loading) {
            if let Some(view) = self.runtime.views().get(&self.route.identity) {
                *self.instance.render.borrow_mut() = RenderState::Ready(view);
            }
        }

        let cached = matches!(&*self.instance.render.borrow(), RenderState::Ready(_));
        info!(
            "event=loader_mount module=loader status=ok view={} action={} cache={}",
            self.route.identity.label(),
            self.props.descriptor.action,
            if cached { "hit" } else { "miss" }
        );

        if cached {
            self.send_pageview();
            if self.restore_scroll() {
                return;
            }
        } else {
            self.begin_load();
        }

        self.runtime.env().viewport.scroll_to(ScrollOffset::ORIGIN);
    }

    /// Re-runs a failed load. No-op unless mounted and `Failed`.
    pub fn retry(&self) {
        if !self.instance.mounted.get() || self.phase() != LoaderPhase::Failed {
            debug!(
                "event=loader_retry module=loader status=ignored view={} phase={:?}",
                self.route.identity.label(),
                self.phase()
            );
            return;
        }
        info!(
            "event=loader_retry module=loader status=ok view={}",
            self.route.identity.label()
        );
        self.instance.transition(RenderState::Loading);
        self.begin_load();
    }

    /// Records the viewport offset for this entry and stops accepting
    /// state changes.
    pub fn unmount(&self) {
        if !self.instance.mounted.get() {
            return;
        }
        let key = self.scroll_key();
        let offset = self.runtime.env().viewport.scroll_offset();
        self.runtime.scroll_positions().record(key, offset);
        self.instance.mounted.set(false);
        self.instance.unmounted.set(true);
        debug!(
            "event=loader_unmount module=loader status=ok view={} key={} x={} y={}",
            self.route.identity.label(),
            key,
            offset.x,
            offset.y
        );
    }

    fn scroll_key(&self) -> &str {
        self.props
            .descriptor
            .location
            .scroll_key(&self.runtime.config().root_scroll_key)
    }

    fn send_pageview(&self) {
        let path = self.props.descriptor.location.path_with_search();
        self.runtime.env().analytics.send_pageview(&path);
    }

    /// Restores the recorded offset on POP. Returns whether it did.
    fn restore_scroll(&self) -> bool {
        if self.props.descriptor.action != HistoryAction::Pop {
            return false;
        }
        match self.runtime.scroll_positions().lookup(self.scroll_key()) {
            Some(offset) => {
                self.runtime.env().viewport.scroll_to(offset);
                true
            }
            None => false,
        }
    }

    fn begin_load(&self) {
        if !self.runtime.gate().dispatch() {
            self.runtime.env().progress.start();
            self.instance.progress_started.set(true);
        }

        let pending = (self.route.loader)();
        let settle = LoadSettlement {
            runtime: self.runtime.clone(),
            identity: self.route.identity.clone(),
            instance: Rc::clone(&self.instance),
            pageview_path: self.props.descriptor.location.path_with_search(),
        };
        let task = async move {
            let result = pending.await;
            settle.apply(result);
        };

        if let Err(err) = self.runtime.spawn(task) {
            warn!(
                "event=loader_spawn module=loader status=error view={} error={}",
                self.route.identity.label(),
                err
            );
            if self.instance.progress_started.replace(false) {
                self.runtime.env().progress.done();
            }
            self.instance
                .transition(RenderState::Failed(LoadError::Fetch(format!(
                    "could not schedule load: {err}"
                ))));
        }
    }
}

impl Drop for AsyncRouteLoader {
    fn drop(&mut self) {
        // Late continuations must see a dead instance even without unmount.
        self.instance.mounted.set(false);
    }
}

/// Everything a load continuation needs once the module arrives.
struct LoadSettlement {
    runtime: RouteRuntime,
    identity: ViewIdentity,
    instance: Rc<InstanceState>,
    pageview_path: String,
}

impl LoadSettlement {
    fn apply(self, result: Result<ResolvedView, LoadError>) {
        match result {
            Ok(view) => self.resolved(view),
            Err(err) => self.failed(err),
        }
    }

    fn resolved(self, view: ResolvedView) {
        if self.runtime.gate().claim() {
            run_page_bootstrap(self.runtime.env(), self.runtime.config());
        }
        if self.instance.progress_started.replace(false) {
            self.runtime.env().progress.done();
        }

        self.runtime.views().set(&self.identity, Rc::clone(&view));

        if !self.instance.mounted.get() {
            info!(
                "event=loader_resolve module=loader status=discarded view={} reason=unmounted",
                self.identity.label()
            );
            return;
        }

        info!(
            "event=loader_resolve module=loader status=ok view={} module_name={}",
            self.identity.label(),
            view.name()
        );
        self.instance.transition(RenderState::Ready(view));
        self.runtime
            .env()
            .analytics
            .send_pageview(&self.pageview_path);
    }

    fn failed(self, err: LoadError) {
        if self.instance.progress_started.replace(false) {
            self.runtime.env().progress.done();
        }
        warn!(
            "event=loader_resolve module=loader status=error view={} error={}",
            self.identity.label(),
            err
        );
        if !self.instance.mounted.get() {
            return;
        }
        self.instance.transition(RenderState::Failed(err));
    }
}

#[cfg(test)]
mod tests {
    use super::{async_route, LoaderPhase, LOADING_SPINNER_SIZE};
    use crate::cache::scroll_table::ScrollOffset;
    use crate::config::{BuildProfile, RuntimeConfig};
    use crate::env::recording::{PageEvent, RecordingPage};
    use crate::env::PageEnvironment;
    use crate::loader::runtime::RouteRuntime;
    use crate::model::navigation::{HistoryAction, Location, NavigationDescriptor};
    use crate::model::view::{LoadError, ResolvedView, RouteProps, ViewModule};
    use futures::executor::LocalPool;
    use std::cell::Cell;
    use std::rc::Rc;

    struct StaticView;

    impl ViewModule for StaticView {
        fn name(&self) -> &str {
            "static"
        }

        fn render(&self, props: &RouteProps) -> String {
            format!("static:{}", props.descriptor.location.pathname)
        }
    }

    fn static_view() -> Result<ResolvedView, LoadError> {
        Ok(Rc::new(StaticView))
    }

    fn props(pathname: &str, action: HistoryAction) -> RouteProps {
        RouteProps {
            descriptor: NavigationDescriptor::new(pathname, action, Location::new(pathname)),
            history: None,
        }
    }

    fn runtime(pool: &LocalPool, page: &Rc<RecordingPage>) -> RouteRuntime {
        let config = RuntimeConfig {
            build_profile: BuildProfile::Development,
            ..RuntimeConfig::default()
        };
        RouteRuntime::new(
            PageEnvironment::from_single(page.clone()),
            config,
            pool.spawner(),
        )
        .expect("runtime should build")
    }

    #[test]
    fn loading_placeholder_uses_default_spinner() {
        let pool = LocalPool::new();
        let page = Rc::new(RecordingPage::default());
        let runtime = runtime(&pool, &page);
        let route = async_route("home", || async { static_view() });

        let loader = route.instantiate(&runtime, props("/", HistoryAction::Push));
        let output = loader.render();
        assert_eq!(output.phase(), LoaderPhase::Loading);
        assert_eq!(
            output.to_markup(),
            format!("<spinner size={LOADING_SPINNER_SIZE} delay=true/>")
        );
    }

    #[test]
    fn on_change_fires_when_async_load_resolves() {
        let mut pool = LocalPool::new();
        let page = Rc::new(RecordingPage::default());
        let runtime = runtime(&pool, &page);
        let route = async_route("home", || async { static_view() });

        let loader = route.instantiate(&runtime, props("/", HistoryAction::Push));
        let notified = Rc::new(Cell::new(0));
        let counter = notified.clone();
        loader.on_change(move || counter.set(counter.get() + 1));
        loader.mount();
        pool.run_until_stalled();

        assert_eq!(notified.get(), 1);
        assert_eq!(loader.render().to_markup(), "static:/");
    }

    #[test]
    fn mount_is_ignored_after_unmount() {
        let mut pool = LocalPool::new();
        let page = Rc::new(RecordingPage::default());
        let runtime = runtime(&pool, &page);
        let route = async_route("home", || async { static_view() });

        let loader = route.instantiate(&runtime, props("/", HistoryAction::Push));
        loader.mount();
        loader.unmount();
        page.take_events();
        loader.mount();
        pool.run_until_stalled();

        assert!(!loader.is_mounted());
        assert_eq!(loader.phase(), LoaderPhase::Loading);
        assert_eq!(page.count(|event| matches!(event, PageEvent::Pageview(_))), 0);
    }

    #[test]
    fn retry_is_ignored_unless_failed() {
        let mut pool = LocalPool::new();
        let page = Rc::new(RecordingPage::default());
        let runtime = runtime(&pool, &page);
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let route = async_route("home", move || {
            seen.set(seen.get() + 1);
            async { Err::<ResolvedView, _>(LoadError::Fetch("offline".to_string())) }
        });

        let loader = route.instantiate(&runtime, props("/", HistoryAction::Push));
        loader.retry();
        assert_eq!(calls.get(), 0);

        loader.mount();
        pool.run_until_stalled();
        assert_eq!(loader.phase(), LoaderPhase::Failed);
        assert!(loader.render().to_markup().contains("offline"));

        loader.retry();
        pool.run_until_stalled();
        assert_eq!(calls.get(), 2);
        assert_eq!(loader.phase(), LoaderPhase::Failed);
    }

    #[test]
    fn load_fails_when_executor_is_gone() {
        let pool = LocalPool::new();
        let page = Rc::new(RecordingPage::default());
        let runtime = runtime(&pool, &page);
        drop(pool);
        let route = async_route("home", || async { static_view() });

        let loader = route.instantiate(&runtime, props("/", HistoryAction::Push));
        let notified = Rc::new(Cell::new(0));
        let counter = notified.clone();
        loader.on_change(move || counter.set(counter.get() + 1));
        loader.mount();

        assert_eq!(loader.phase(), LoaderPhase::Failed);
        assert!(loader.render().to_markup().contains("could not schedule load"));
        assert_eq!(notified.get(), 1);
        assert!(runtime.views().is_empty());
        assert_eq!(
            page.events(),
            vec![PageEvent::ScrollTo(ScrollOffset::ORIGIN)]
        );
    }
}
