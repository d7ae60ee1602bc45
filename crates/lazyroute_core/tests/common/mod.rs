#![allow(dead_code)]

use futures::channel::oneshot;
use futures::executor::LocalPool;
use lazyroute_core::{
    async_route, AsyncRoute, BuildProfile, HistoryAction, LoadError, Location,
    NavigationDescriptor, PageEnvironment, RecordingPage, ResolvedView, RouteProps, RouteRuntime,
    RuntimeConfig, ViewModule,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct NamedView(pub &'static str);

impl ViewModule for NamedView {
    fn name(&self) -> &str {
        self.0
    }

    fn render(&self, props: &RouteProps) -> String {
        format!("{}@{}", self.0, props.descriptor.location.pathname)
    }
}

pub fn view(name: &'static str) -> ResolvedView {
    Rc::new(NamedView(name))
}

pub fn ready(name: &'static str) -> Result<ResolvedView, LoadError> {
    Ok(view(name))
}

pub struct Harness {
    pub pool: LocalPool,
    pub page: Rc<RecordingPage>,
    pub runtime: RouteRuntime,
}

pub fn harness(profile: BuildProfile) -> Harness {
    harness_with(RuntimeConfig {
        build_profile: profile,
        ..RuntimeConfig::default()
    })
}

pub fn harness_with(config: RuntimeConfig) -> Harness {
    let pool = LocalPool::new();
    let page = Rc::new(RecordingPage::default());
    let runtime = RouteRuntime::new(
        PageEnvironment::from_single(page.clone()),
        config,
        pool.spawner(),
    )
    .expect("runtime should build");
    Harness {
        pool,
        page,
        runtime,
    }
}

pub fn props(pathname: &str, action: HistoryAction, key: Option<&str>) -> RouteProps {
    let mut location = Location::new(pathname);
    location.key = key.map(str::to_string);
    RouteProps {
        descriptor: NavigationDescriptor::new(pathname, action, location),
        history: None,
    }
}

/// Loader whose loads stay pending until the test settles them.
#[derive(Default)]
pub struct ControlledLoads {
    pending: RefCell<Vec<oneshot::Sender<Result<ResolvedView, LoadError>>>>,
    started: Cell<usize>,
}

impl ControlledLoads {
    pub fn route(self: &Rc<Self>, label: &str) -> AsyncRoute {
        let loads = Rc::clone(self);
        async_route(label, move || {
            let (sender, receiver) = oneshot::channel();
            loads.pending.borrow_mut().push(sender);
            loads.started.set(loads.started.get() + 1);
            async move {
                receiver
                    .await
                    .unwrap_or_else(|_| Err(LoadError::Fetch("dropped".to_string())))
            }
        })
    }

    pub fn started(&self) -> usize {
        self.started.get()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Settles the oldest pending load.
    pub fn settle_next(&self, result: Result<ResolvedView, LoadError>) {
        let sender = self.pending.borrow_mut().remove(0);
        let _ = sender.send(result);
    }
}
