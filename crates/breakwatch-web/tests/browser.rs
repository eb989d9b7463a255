//! In-browser checks for the `matchMedia` watcher.
//!
//! Run with: wasm-pack test --headless --firefox crates/breakwatch-web

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use breakwatch_core::{Breakpoint, MediaQuery, ResponsiveMap};
use breakwatch_runtime::{BreakpointObserver, MediaWatcher, QueryHandler};
use breakwatch_web::MatchMediaWatcher;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn always_true_query_matches_on_register() {
    let watcher = MatchMediaWatcher::from_window().expect("browser has matchMedia");
    let hits = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&hits);
    let handle = watcher.register(
        &MediaQuery::min_width(0),
        QueryHandler::new(move || counter.set(counter.get() + 1), || {}),
    );
    assert_eq!(hits.get(), 1);
    watcher.unregister(handle);
}

#[wasm_bindgen_test]
fn observer_sees_exactly_one_of_xs_and_sm() {
    let observer = BreakpointObserver::new(
        ResponsiveMap::default(),
        breakwatch_web::default_watcher(),
    );
    let token = observer.subscribe(|_| {});
    let state = observer.current();
    assert_ne!(state.is_active(Breakpoint::Xs), state.is_active(Breakpoint::Sm));
    observer.unsubscribe(token);
    assert!(!observer.is_registered());
}
