//! Lazily loaded view contracts.
//!
//! # Responsibility
//! - Define the identity shared by every loader built from one wrapped route.
//! - Define the renderable handle a view-loader thunk resolves to.
//! - Define the props forwarded unchanged to a resolved view.
//!
//! # Invariants
//! - A `ViewIdentity` is minted once per wrapped route and never reused.
//! - A resolved view is immutable; the cache only ever hands out clones
//!   of the same `Rc`.

use crate::model::navigation::NavigationDescriptor;
use futures::future::LocalBoxFuture;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;
use uuid::Uuid;

/// Stable key identifying one lazily loadable view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewIdentity {
    id: Uuid,
    label: String,
}

impl ViewIdentity {
    /// Mints a fresh identity. Two calls never compare equal.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Human-readable name used in log lines.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Display for ViewIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.label, self.id)
    }
}

/// Router-injected callables forwarded to views as props.
pub trait HistoryHandle {
    fn push(&self, path: &str);
    fn replace(&self, path: &str);
    fn go(&self, delta: isize);
    fn go_back(&self) {
        self.go(-1);
    }
    fn go_forward(&self) {
        self.go(1);
    }
    /// Number of entries in the history stack.
    fn length(&self) -> usize;
}

/// Props handed to a resolved view.
#[derive(Clone)]
pub struct RouteProps {
    pub descriptor: NavigationDescriptor,
    pub history: Option<Rc<dyn HistoryHandle>>,
}

impl Debug for RouteProps {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteProps")
            .field("descriptor", &self.descriptor)
            .field("history", &self.history.as_ref().map(|h| h.length()))
            .finish()
    }
}

/// Renderable view implementation produced by a view loader.
pub trait ViewModule {
    /// Stable name used for diagnostics.
    fn name(&self) -> &str;

    /// Renders the view for the given props.
    fn render(&self, props: &RouteProps) -> String;
}

/// Shared handle to a loaded view.
pub type ResolvedView = Rc<dyn ViewModule>;

/// Deferred result of one view-loader invocation.
pub type ViewLoadFuture = LocalBoxFuture<'static, Result<ResolvedView, LoadError>>;

/// Zero-argument thunk that starts loading a view module.
pub type ViewLoader = Rc<dyn Fn() -> ViewLoadFuture>;

/// Failure reported by a view loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Fetching or evaluating the module failed.
    Fetch(String),
    /// Module loaded but exposes no renderable view.
    MissingView(String),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(reason) => write!(f, "view module fetch failed: {reason}"),
            Self::MissingView(module) => {
                write!(f, "view module has no renderable view: {module}")
            }
        }
    }
}

impl Error for LoadError {}
