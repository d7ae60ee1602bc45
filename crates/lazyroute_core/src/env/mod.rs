//! Browser-side ports used by the route runtime.
//!
//! # Responsibility
//! - Describe the few page capabilities the loader touches (viewport,
//!   progress bar, analytics, script injection) as injectable traits.
//! - Bundle them into one `PageEnvironment` handed to the runtime.
//!
//! # Invariants
//! - Every port call is fire-and-forget; none of them can fail the loader.
//! - `ProgressIndicator::start/done` must tolerate redundant calls.

pub mod recording;

use crate::cache::scroll_table::ScrollOffset;
use std::rc::Rc;

/// History scroll-restoration mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRestoration {
    /// Browser restores scroll on its own.
    Auto,
    /// Application restores scroll.
    Manual,
}

/// Viewport scroll read/write plus the scroll-restoration override.
pub trait Viewport {
    fn scroll_offset(&self) -> ScrollOffset;
    fn scroll_to(&self, offset: ScrollOffset);

    /// Capability probe for `history.scrollRestoration`.
    fn supports_scroll_restoration(&self) -> bool;
    fn set_scroll_restoration(&self, mode: ScrollRestoration);
}

/// Top-of-viewport busy indicator.
pub trait ProgressIndicator {
    fn start(&self);
    fn done(&self);
}

/// Page-view analytics sink.
pub trait Analytics {
    fn send_pageview(&self, path: &str);
}

/// Deferred external script injection.
pub trait ScriptLoader {
    fn load_script(&self, url: &str);
}

/// Page capabilities injected into a `RouteRuntime`.
#[derive(Clone)]
pub struct PageEnvironment {
    pub viewport: Rc<dyn Viewport>,
    pub progress: Rc<dyn ProgressIndicator>,
    pub analytics: Rc<dyn Analytics>,
    pub scripts: Rc<dyn ScriptLoader>,
}

impl PageEnvironment {
    /// Uses one object for every port.
    pub fn from_single<P>(page: Rc<P>) -> Self
    where
        P: Viewport + ProgressIndicator + Analytics + ScriptLoader + 'static,
    {
        Self {
            viewport: page.clone(),
            progress: page.clone(),
            analytics: page.clone(),
            scripts: page,
        }
    }
}
