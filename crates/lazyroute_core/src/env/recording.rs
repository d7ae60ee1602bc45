//! In-memory page that records every port call.
//!
//! Used by the CLI probe to print a session transcript and by tests to
//! assert side-effect ordering.

use crate::cache::scroll_table::ScrollOffset;
use crate::env::{Analytics, ProgressIndicator, ScriptLoader, ScrollRestoration, Viewport};
use log::debug;
use std::cell::{Cell, RefCell};

/// One observed page side effect.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    ProgressStart,
    ProgressDone,
    Pageview(String),
    ScrollTo(ScrollOffset),
    ScrollRestoration(ScrollRestoration),
    ScriptLoad(String),
}

/// Page double backed by plain cells.
pub struct RecordingPage {
    events: RefCell<Vec<PageEvent>>,
    offset: Cell<ScrollOffset>,
    restoration: Cell<ScrollRestoration>,
    restoration_supported: bool,
}

impl Default for RecordingPage {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RecordingPage {
    pub fn new(restoration_supported: bool) -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            offset: Cell::new(ScrollOffset::ORIGIN),
            restoration: Cell::new(ScrollRestoration::Auto),
            restoration_supported,
        }
    }

    /// Simulates the user scrolling without going through `scroll_to`.
    pub fn user_scroll(&self, offset: ScrollOffset) {
        self.offset.set(offset);
    }

    /// Current restoration mode; browsers start in `Auto`.
    pub fn scroll_restoration(&self) -> ScrollRestoration {
        self.restoration.get()
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.events.borrow().clone()
    }

    /// Returns and clears the recorded events.
    pub fn take_events(&self) -> Vec<PageEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn count(&self, predicate: impl Fn(&PageEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|&event| predicate(event)).count()
    }

    fn push(&self, event: PageEvent) {
        debug!("event=page_effect module=env effect={event:?}");
        self.events.borrow_mut().push(event);
    }
}

impl Viewport for RecordingPage {
    fn scroll_offset(&self) -> ScrollOffset {
        self.offset.get()
    }

    fn scroll_to(&self, offset: ScrollOffset) {
        self.offset.set(offset);
        self.push(PageEvent::ScrollTo(offset));
    }

    fn supports_scroll_restoration(&self) -> bool {
        self.restoration_supported
    }

    fn set_scroll_restoration(&self, mode: ScrollRestoration) {
        self.restoration.set(mode);
        self.push(PageEvent::ScrollRestoration(mode));
    }
}

impl ProgressIndicator for RecordingPage {
    fn start(&self) {
        self.push(PageEvent::ProgressStart);
    }

    fn done(&self) {
        self.push(PageEvent::ProgressDone);
    }
}

impl Analytics for RecordingPage {
    fn send_pageview(&self, path: &str) {
        self.push(PageEvent::Pageview(path.to_string()));
    }
}

impl ScriptLoader for RecordingPage {
    fn load_script(&self, url: &str) {
        self.push(PageEvent::ScriptLoad(url.to_string()));
    }
}
