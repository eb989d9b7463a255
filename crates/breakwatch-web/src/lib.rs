#![forbid(unsafe_code)]

//! Browser environment adapter for Breakwatch.
//!
//! On `wasm32` targets [`MatchMediaWatcher`] watches conditions through
//! `window.matchMedia`. Everywhere else, and in browsers without
//! `matchMedia`, [`default_watcher`] falls back to
//! [`NoopWatcher`](breakwatch_runtime::NoopWatcher), which reports no matches.
//!
//! ```
//! use breakwatch_core::ResponsiveMap;
//! use breakwatch_runtime::BreakpointObserver;
//!
//! let observer = BreakpointObserver::new(ResponsiveMap::default(), breakwatch_web::default_watcher());
//! let token = observer.subscribe(|_| {});
//! observer.unsubscribe(token);
//! ```

use std::rc::Rc;

use breakwatch_runtime::{MediaWatcher, NoopWatcher};

#[cfg(target_arch = "wasm32")]
mod match_media;

#[cfg(target_arch = "wasm32")]
pub use match_media::MatchMediaWatcher;

/// The best watcher for the current environment.
#[must_use]
pub fn default_watcher() -> Rc<dyn MediaWatcher> {
    browser_watcher().unwrap_or_else(|| {
        breakwatch_core::debug!("viewport matching unavailable, using no-op watcher");
        Rc::new(NoopWatcher::new()) as Rc<dyn MediaWatcher>
    })
}

#[cfg(target_arch = "wasm32")]
fn browser_watcher() -> Option<Rc<dyn MediaWatcher>> {
    MatchMediaWatcher::from_window().map(|watcher| Rc::new(watcher) as Rc<dyn MediaWatcher>)
}

#[cfg(not(target_arch = "wasm32"))]
fn browser_watcher() -> Option<Rc<dyn MediaWatcher>> {
    None
}
