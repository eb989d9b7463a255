#![forbid(unsafe_code)]

//! Viewport-watching capability.
//!
//! The observer never talks to a host environment directly. It registers one
//! [`QueryHandler`] per breakpoint with a [`MediaWatcher`] and keeps the
//! returned [`WatchHandle`] so it can release exactly that watch later.
//!
//! # Adapter contract
//!
//! 1. `on_match`/`on_unmatch` fire whenever the truth of the condition flips.
//!    An adapter may fire `on_match` from inside `register` when the
//!    condition already holds.
//! 2. Nothing fires for a handle after `unregister` has been called for it.
//! 3. `unregister` calls `on_teardown`, never `on_unmatch`.
//! 4. Handlers may re-enter the adapter (a handler can cause another
//!    `register`/`unregister`), so adapters must not hold interior borrows
//!    while invoking them.

use std::cell::Cell;
use std::fmt;

use breakwatch_core::MediaQuery;

/// Opaque identifier for one live media watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WatchHandle(u64);

impl WatchHandle {
    /// Wrap an adapter-assigned id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

type Hook = Box<dyn Fn()>;

/// Callbacks attached to one media condition.
pub struct QueryHandler {
    on_match: Hook,
    on_unmatch: Hook,
    on_teardown: Hook,
}

impl QueryHandler {
    /// Handler with a no-op teardown.
    pub fn new(on_match: impl Fn() + 'static, on_unmatch: impl Fn() + 'static) -> Self {
        Self {
            on_match: Box::new(on_match),
            on_unmatch: Box::new(on_unmatch),
            on_teardown: Box::new(|| {}),
        }
    }

    /// Replace the teardown hook.
    #[must_use]
    pub fn with_teardown(mut self, on_teardown: impl Fn() + 'static) -> Self {
        self.on_teardown = Box::new(on_teardown);
        self
    }

    /// The condition started to hold.
    pub fn fire_match(&self) {
        (self.on_match)();
    }

    /// The condition stopped holding.
    pub fn fire_unmatch(&self) {
        (self.on_unmatch)();
    }

    /// The watch is being released.
    pub fn teardown(&self) {
        (self.on_teardown)();
    }
}

impl fmt::Debug for QueryHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryHandler").finish_non_exhaustive()
    }
}

/// A facility that reports when media conditions start or stop matching.
pub trait MediaWatcher {
    /// Start watching `query`, reporting changes to `handler`.
    fn register(&self, query: &MediaQuery, handler: QueryHandler) -> WatchHandle;

    /// Stop watching. Unknown handles are ignored.
    fn unregister(&self, handle: WatchHandle);
}

/// Watcher for environments without viewport matching.
///
/// Reports no matches and keeps no handlers.
#[derive(Debug, Default)]
pub struct NoopWatcher {
    next_handle: Cell<u64>,
}

impl NoopWatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MediaWatcher for NoopWatcher {
    fn register(&self, _query: &MediaQuery, _handler: QueryHandler) -> WatchHandle {
        let id = self.next_handle.get();
        self.next_handle.set(id + 1);
        WatchHandle(id)
    }

    fn unregister(&self, _handle: WatchHandle) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn handler_routes_each_hook() {
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));
        let (a, b, c) = (Rc::clone(&log), Rc::clone(&log), Rc::clone(&log));
        let handler = QueryHandler::new(
            move || a.borrow_mut().push("match"),
            move || b.borrow_mut().push("unmatch"),
        )
        .with_teardown(move || c.borrow_mut().push("teardown"));

        handler.fire_match();
        handler.fire_unmatch();
        handler.teardown();
        assert_eq!(*log.borrow(), ["match", "unmatch", "teardown"]);
    }

    #[test]
    fn default_teardown_is_silent() {
        let hits = Rc::new(Cell::new(0u32));
        let (a, b) = (Rc::clone(&hits), Rc::clone(&hits));
        let handler = QueryHandler::new(move || a.set(a.get() + 1), move || b.set(b.get() + 1));
        handler.teardown();
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn noop_watcher_never_fires() {
        let hits = Rc::new(Cell::new(0u32));
        let watcher = NoopWatcher::new();
        let (a, b) = (Rc::clone(&hits), Rc::clone(&hits));
        let first = watcher.register(
            &MediaQuery::min_width(0),
            QueryHandler::new(move || a.set(a.get() + 1), move || b.set(b.get() + 1)),
        );
        let second = watcher.register(&MediaQuery::max_width(10), QueryHandler::new(|| {}, || {}));
        assert_eq!((first.raw(), second.raw()), (0, 1));
        assert_eq!(WatchHandle::new(first.raw()), first);
        watcher.unregister(first);
        watcher.unregister(first);
        assert_eq!(hits.get(), 0);
    }
}
