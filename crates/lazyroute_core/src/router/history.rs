//! In-memory history stack.
//!
//! # Invariants
//! - The initial entry has no key; every pushed or replaced entry gets a
//!   fresh one.
//! - `go` clamps to the stack bounds and does not notify when the index
//!   does not change.
//! - Listeners run after internal state is updated and released, so they
//!   may read the history re-entrantly.

use crate::model::navigation::{HistoryAction, Location};
use crate::model::view::HistoryHandle;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

const HISTORY_KEY_LEN: usize = 6;

/// Callback fired after every history transition.
pub type HistoryListener = Rc<dyn Fn(&Location, HistoryAction)>;

struct HistoryState {
    entries: Vec<Location>,
    index: usize,
    action: HistoryAction,
}

/// Browser-like history kept entirely in memory.
pub struct MemoryHistory {
    state: RefCell<HistoryState>,
    listeners: RefCell<Vec<HistoryListener>>,
}

impl MemoryHistory {
    /// Starts with one entry at `initial_path`; the initial action is POP,
    /// matching what a browser reports on page load.
    pub fn new(initial_path: &str) -> Self {
        Self {
            state: RefCell::new(HistoryState {
                entries: vec![parse_path(initial_path)],
                index: 0,
                action: HistoryAction::Pop,
            }),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn location(&self) -> Location {
        let state = self.state.borrow();
        state.entries[state.index].clone()
    }

    pub fn action(&self) -> HistoryAction {
        self.state.borrow().action
    }

    pub fn index(&self) -> usize {
        self.state.borrow().index
    }

    pub fn listen(&self, listener: HistoryListener) {
        self.listeners.borrow_mut().push(listener);
    }

    fn notify(&self) {
        let (location, action) = {
            let state = self.state.borrow();
            (state.entries[state.index].clone(), state.action)
        };
        debug!(
            "event=history_change module=router action={} path={} key={:?}",
            action,
            location.path_with_search(),
            location.key
        );
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&location, action);
        }
    }
}

impl HistoryHandle for MemoryHistory {
    fn push(&self, path: &str) {
        {
            let mut state = self.state.borrow_mut();
            let next = state.index + 1;
            state.entries.truncate(next);
            state.entries.push(parse_path(path).with_key(fresh_key()));
            state.index = next;
            state.action = HistoryAction::Push;
        }
        self.notify();
    }

    fn replace(&self, path: &str) {
        {
            let mut state = self.state.borrow_mut();
            let index = state.index;
            state.entries[index] = parse_path(path).with_key(fresh_key());
            state.action = HistoryAction::Replace;
        }
        self.notify();
    }

    fn go(&self, delta: isize) {
        let moved = {
            let mut state = self.state.borrow_mut();
            let last = state.entries.len() - 1;
            let target = state.index.saturating_add_signed(delta).min(last);
            if target == state.index {
                false
            } else {
                state.index = target;
                state.action = HistoryAction::Pop;
                true
            }
        };
        if moved {
            self.notify();
        }
    }

    fn length(&self) -> usize {
        self.state.borrow().entries.len()
    }
}

fn fresh_key() -> String {
    Uuid::new_v4().simple().to_string()[..HISTORY_KEY_LEN].to_string()
}

/// Splits `/path?query#hash` into a location without a key.
pub fn parse_path(path: &str) -> Location {
    let (rest, hash) = match path.find('#') {
        Some(at) => (&path[..at], &path[at..]),
        None => (path, ""),
    };
    let (pathname, search) = match rest.find('?') {
        Some(at) => (&rest[..at], &rest[at..]),
        None => (rest, ""),
    };
    let pathname = if pathname.is_empty() { "/" } else { pathname };
    Location {
        pathname: pathname.to_string(),
        search: search.to_string(),
        hash: hash.to_string(),
        key: None,
        state: None,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_path, MemoryHistory};
    use crate::model::navigation::{HistoryAction, Location};
    use crate::model::view::HistoryHandle;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn parse_path_splits_query_and_hash() {
        let location = parse_path("/download?v=3#natives");
        assert_eq!(location.pathname, "/download");
        assert_eq!(location.search, "?v=3");
        assert_eq!(location.hash, "#natives");
        assert_eq!(parse_path("").pathname, "/");
    }

    #[test]
    fn push_assigns_keys_and_truncates_forward_entries() {
        let history = MemoryHistory::new("/");
        assert!(history.location().key.is_none());

        history.push("/a");
        history.push("/b");
        let b_key = history.location().key.expect("pushed entry has key");
        assert_eq!(b_key.len(), 6);

        history.go_back();
        assert_eq!(history.location().pathname, "/a");
        assert_eq!(history.action(), HistoryAction::Pop);

        history.push("/c");
        assert_eq!(history.length(), 3);
        history.go_forward();
        assert_eq!(history.location().pathname, "/c");
    }

    #[test]
    fn go_clamps_and_skips_notification_without_movement() {
        let history = MemoryHistory::new("/");
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = calls.clone();
        history.listen(Rc::new(move |location: &Location, action: HistoryAction| {
            seen.borrow_mut().push((location.pathname.clone(), action));
        }));

        history.go(-3);
        history.push("/a");
        history.go(-10);
        history.replace("/b");

        assert_eq!(
            *calls.borrow(),
            vec![
                ("/a".to_string(), HistoryAction::Push),
                ("/".to_string(), HistoryAction::Pop),
                ("/b".to_string(), HistoryAction::Replace),
            ]
        );
        assert_eq!(history.index(), 0);
    }
}
