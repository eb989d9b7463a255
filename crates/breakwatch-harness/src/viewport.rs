#![forbid(unsafe_code)]

//! Simulated viewport for deterministic observer tests.
//!
//! `SimulatedViewport` behaves like a browser's media-query facility driven by
//! a width the test sets:
//!
//! - `register` fires `on_match` immediately when the condition already holds
//!   at the current width;
//! - `set_width` fires `on_match`/`on_unmatch` for every live watch whose truth
//!   flips, in registration order;
//! - `unregister` calls `on_teardown` and nothing for that handle fires again,
//!   even if it was released by a handler earlier in the same resize.
//!
//! No interior borrow is held while a handler runs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use breakwatch_core::MediaQuery;
use breakwatch_runtime::{MediaWatcher, QueryHandler, WatchHandle};
use breakwatch_core::debug;

struct Watch {
    handle: WatchHandle,
    query: MediaQuery,
    handler: Rc<QueryHandler>,
    matched: bool,
}

/// Media watcher backed by a test-controlled viewport width.
#[derive(Default)]
pub struct SimulatedViewport {
    width: Cell<u32>,
    watches: RefCell<Vec<Watch>>,
    next_handle: Cell<u64>,
    register_calls: Cell<usize>,
    unregister_calls: Cell<usize>,
    teardown_calls: Cell<usize>,
}

impl std::fmt::Debug for SimulatedViewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedViewport")
            .field("width", &self.width.get())
            .field("active_watches", &self.active_watches())
            .field("register_calls", &self.register_calls.get())
            .field("unregister_calls", &self.unregister_calls.get())
            .finish()
    }
}

impl SimulatedViewport {
    /// Viewport starting at `width` pixels.
    #[must_use]
    pub fn new(width: u32) -> Self {
        Self {
            width: Cell::new(width),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    /// Resize, firing handlers for every condition that flips.
    pub fn set_width(&self, width: u32) {
        self.width.set(width);
        let flips: Vec<(WatchHandle, Rc<QueryHandler>, bool)> = {
            let mut watches = self.watches.borrow_mut();
            watches
                .iter_mut()
                .filter_map(|watch| {
                    let now = watch.query.matches(width);
                    (now != watch.matched).then(|| {
                        watch.matched = now;
                        (watch.handle, Rc::clone(&watch.handler), now)
                    })
                })
                .collect()
        };
        debug!(width, flips = flips.len(), "viewport resized");

        for (handle, handler, matched) in flips {
            if !self.is_live(handle) {
                continue;
            }
            if matched {
                handler.fire_match();
            } else {
                handler.fire_unmatch();
            }
        }
    }

    /// Report a match for every live watch on `query`, regardless of width.
    pub fn fire_match(&self, query: &MediaQuery) {
        self.inject(query, true);
    }

    /// Report an unmatch for every live watch on `query`, regardless of width.
    pub fn fire_unmatch(&self, query: &MediaQuery) {
        self.inject(query, false);
    }

    /// Number of `register` calls so far.
    #[must_use]
    pub fn register_calls(&self) -> usize {
        self.register_calls.get()
    }

    /// Number of `unregister` calls that released a live watch.
    #[must_use]
    pub fn unregister_calls(&self) -> usize {
        self.unregister_calls.get()
    }

    /// Number of teardown hooks invoked.
    #[must_use]
    pub fn teardown_calls(&self) -> usize {
        self.teardown_calls.get()
    }

    /// Watches currently held.
    #[must_use]
    pub fn active_watches(&self) -> usize {
        self.watches.borrow().len()
    }

    /// Queries currently watched, in registration order.
    #[must_use]
    pub fn watched_queries(&self) -> Vec<MediaQuery> {
        self.watches.borrow().iter().map(|w| w.query).collect()
    }

    fn is_live(&self, handle: WatchHandle) -> bool {
        self.watches.borrow().iter().any(|w| w.handle == handle)
    }

    fn inject(&self, query: &MediaQuery, matched: bool) {
        let targets: Vec<(WatchHandle, Rc<QueryHandler>)> = {
            let mut watches = self.watches.borrow_mut();
            watches
                .iter_mut()
                .filter(|w| w.query == *query)
                .map(|w| {
                    w.matched = matched;
                    (w.handle, Rc::clone(&w.handler))
                })
                .collect()
        };
        for (handle, handler) in targets {
            if !self.is_live(handle) {
                continue;
            }
            if matched {
                handler.fire_match();
            } else {
                handler.fire_unmatch();
            }
        }
    }
}

impl MediaWatcher for SimulatedViewport {
    fn register(&self, query: &MediaQuery, handler: QueryHandler) -> WatchHandle {
        let handle = WatchHandle::new(self.next_handle.get());
        self.next_handle.set(self.next_handle.get() + 1);
        self.register_calls.set(self.register_calls.get() + 1);

        let matched = query.matches(self.width.get());
        let handler = Rc::new(handler);
        self.watches.borrow_mut().push(Watch {
            handle,
            query: *query,
            handler: Rc::clone(&handler),
            matched,
        });
        debug!(%query, matched, "watch registered");

        if matched {
            handler.fire_match();
        }
        handle
    }

    fn unregister(&self, handle: WatchHandle) {
        let removed = {
            let mut watches = self.watches.borrow_mut();
            watches
                .iter()
                .position(|w| w.handle == handle)
                .map(|index| watches.remove(index))
        };
        if let Some(watch) = removed {
            self.unregister_calls.set(self.unregister_calls.get() + 1);
            self.teardown_calls.set(self.teardown_calls.get() + 1);
            debug!(query = %watch.query, "watch released");
            watch.handler.teardown();
        }
    }
}
