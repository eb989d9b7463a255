#![forbid(unsafe_code)]

//! `window.matchMedia` watcher. Only compiled on `wasm32` targets.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use breakwatch_core::MediaQuery;
use breakwatch_runtime::{MediaWatcher, QueryHandler, WatchHandle};
use breakwatch_core::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{MediaQueryList, MediaQueryListEvent, Window};

type ChangeListener = Closure<dyn FnMut(MediaQueryListEvent)>;

struct Listener {
    handle: WatchHandle,
    list: Option<MediaQueryList>,
    handler: Rc<QueryHandler>,
    // Kept alive for as long as the JS side may call it.
    closure: Option<ChangeListener>,
}

/// Media watcher backed by the browser's `matchMedia`.
///
/// Registering a condition that already holds fires `on_match` immediately.
pub struct MatchMediaWatcher {
    window: Window,
    listeners: RefCell<Vec<Listener>>,
    next_handle: Cell<u64>,
}

impl std::fmt::Debug for MatchMediaWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchMediaWatcher")
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

impl MatchMediaWatcher {
    /// Watcher for the global `window`, or `None` when there is no window or
    /// the engine has no `matchMedia`.
    #[must_use]
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        // Calling a missing `matchMedia` throws, which surfaces as `Err`.
        window.match_media("all").ok().flatten()?;
        Some(Self {
            window,
            listeners: RefCell::new(Vec::new()),
            next_handle: Cell::new(0),
        })
    }
}

impl MediaWatcher for MatchMediaWatcher {
    fn register(&self, query: &MediaQuery, handler: QueryHandler) -> WatchHandle {
        let handle = WatchHandle::new(self.next_handle.get());
        self.next_handle.set(self.next_handle.get() + 1);
        let handler = Rc::new(handler);
        let text = query.to_string();

        let Some(list) = self.window.match_media(&text).ok().flatten() else {
            warn!(query = %text, "matchMedia returned no list");
            self.listeners.borrow_mut().push(Listener {
                handle,
                list: None,
                handler,
                closure: None,
            });
            return handle;
        };

        let target = Rc::clone(&handler);
        let closure = ChangeListener::new(move |event: MediaQueryListEvent| {
            if event.matches() {
                target.fire_match();
            } else {
                target.fire_unmatch();
            }
        });
        // `addListener` rather than the `change` event: older Safari has no
        // `EventTarget` methods on `MediaQueryList`.
        if list
            .add_listener_with_opt_callback(Some(closure.as_ref().unchecked_ref()))
            .is_err()
        {
            warn!(query = %text, "failed to attach media listener");
        }

        let matched = list.matches();
        self.listeners.borrow_mut().push(Listener {
            handle,
            list: Some(list),
            handler: Rc::clone(&handler),
            closure: Some(closure),
        });
        debug!(query = %text, matched, "media listener attached");

        if matched {
            handler.fire_match();
        }
        handle
    }

    fn unregister(&self, handle: WatchHandle) {
        let removed = {
            let mut listeners = self.listeners.borrow_mut();
            listeners
                .iter()
                .position(|l| l.handle == handle)
                .map(|index| listeners.remove(index))
        };
        let Some(listener) = removed else {
            return;
        };

        if let (Some(list), Some(closure)) = (&listener.list, &listener.closure) {
            if list
                .remove_listener_with_opt_callback(Some(closure.as_ref().unchecked_ref()))
                .is_err()
            {
                warn!(media = %list.media(), "failed to detach media listener");
            }
        }
        listener.handler.teardown();
    }
}
