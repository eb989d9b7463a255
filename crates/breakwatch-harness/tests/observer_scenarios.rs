//! End-to-end observer scenarios driven through a simulated viewport.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use breakwatch_core::{Breakpoint, BreakpointState, MediaQuery, ResponsiveMap};
use breakwatch_harness::{Recorder, SimulatedViewport};
use breakwatch_layout::{Gutter, Responsive, RowScreens};
use breakwatch_runtime::BreakpointObserver;
use pretty_assertions::assert_eq;

const SM: MediaQuery = MediaQuery::min_width(576);
const MD: MediaQuery = MediaQuery::min_width(768);

fn two_tier() -> ResponsiveMap {
    ResponsiveMap::empty()
        .with(Breakpoint::Sm, SM)
        .with(Breakpoint::Md, MD)
}

fn state(flags: &[(Breakpoint, bool)]) -> BreakpointState {
    flags.iter().copied().collect()
}

#[test]
fn subscribe_match_match_unsubscribe() {
    let viewport = Rc::new(SimulatedViewport::new(320));
    let observer = BreakpointObserver::new(two_tier(), viewport.clone());
    let logger = Recorder::new();

    let token = observer.subscribe(logger.callback());
    assert_eq!(logger.snapshots(), vec![BreakpointState::new()]);
    assert_eq!(viewport.active_watches(), 2);

    viewport.fire_match(&SM);
    assert_eq!(logger.last(), Some(state(&[(Breakpoint::Sm, true)])));

    viewport.fire_match(&MD);
    assert_eq!(
        logger.last(),
        Some(state(&[(Breakpoint::Sm, true), (Breakpoint::Md, true)]))
    );

    observer.unsubscribe(token);
    assert_eq!(viewport.active_watches(), 0);

    viewport.fire_unmatch(&SM);
    viewport.set_width(2_000);
    assert_eq!(logger.len(), 3);
}

#[test]
fn already_matching_conditions_arrive_in_first_snapshot() {
    let viewport = Rc::new(SimulatedViewport::new(1_024));
    let observer = BreakpointObserver::new(ResponsiveMap::default(), viewport.clone());
    let logger = Recorder::new();

    observer.subscribe(logger.callback());
    // Registration fired matches before the subscriber was added.
    assert_eq!(logger.len(), 1);
    let first = logger.last().unwrap();
    assert_eq!(
        first.active().collect::<Vec<_>>(),
        [Breakpoint::Sm, Breakpoint::Md, Breakpoint::Lg]
    );
}

#[test]
fn resize_walks_through_tiers() {
    let viewport = Rc::new(SimulatedViewport::new(320));
    let observer = BreakpointObserver::new(ResponsiveMap::default(), viewport.clone());
    let logger = Recorder::new();
    observer.subscribe(logger.callback());

    for width in [600, 800, 1_000, 1_300, 1_700] {
        viewport.set_width(width);
        let expected = ResponsiveMap::default().matching(width);
        let current = observer.current();
        for bp in Breakpoint::ALL {
            assert_eq!(
                current.is_active(bp),
                expected.is_active(bp),
                "{bp} at {width}px"
            );
        }
    }
    assert_eq!(observer.current().largest_active(), Some(Breakpoint::Xxl));
}

#[test]
fn registration_lifecycle_over_repeated_cycles() {
    let viewport = Rc::new(SimulatedViewport::new(800));
    let observer = BreakpointObserver::new(ResponsiveMap::default(), viewport.clone());

    for cycle in 1..=4 {
        let a = observer.subscribe(|_| {});
        let b = observer.subscribe(|_| {});
        assert_eq!(viewport.register_calls(), 6 * cycle);
        observer.unsubscribe(b);
        observer.unsubscribe(a);
        observer.unsubscribe(a);
        assert_eq!(viewport.unregister_calls(), 6 * cycle);
        assert_eq!(viewport.active_watches(), 0);
    }
}

#[test]
fn deregistration_does_not_notify() {
    let viewport = Rc::new(SimulatedViewport::new(800));
    let observer = BreakpointObserver::new(ResponsiveMap::default(), viewport.clone());
    let calls = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&calls);
    let token = observer.subscribe(move |_| counter.set(counter.get() + 1));
    let before = observer.current();

    observer.unsubscribe(token);
    assert_eq!(calls.get(), 1);
    assert_eq!(viewport.teardown_calls(), 6);
    assert_eq!(observer.current(), before);
}

#[test]
fn resubscribe_refreshes_state_from_viewport() {
    let viewport = Rc::new(SimulatedViewport::new(800));
    let observer = BreakpointObserver::new(two_tier(), viewport.clone());

    let token = observer.subscribe(|_| {});
    observer.unsubscribe(token);
    assert!(!observer.dispatch(state(&[(Breakpoint::Sm, false)])));

    let logger = Recorder::new();
    observer.subscribe(logger.callback());
    // Re-registration at 800px re-fires both matches before the snapshot.
    assert_eq!(
        logger.snapshots(),
        vec![state(&[(Breakpoint::Sm, true), (Breakpoint::Md, true)])]
    );
}

#[test]
fn row_mounted_during_dispatch_gets_one_snapshot_per_pass() {
    let viewport = Rc::new(SimulatedViewport::new(320));
    let observer = BreakpointObserver::new(ResponsiveMap::default(), viewport.clone());
    let rows: Rc<RefCell<Vec<RowScreens>>> = Rc::new(RefCell::new(Vec::new()));
    let nested_calls = Rc::new(Cell::new(0u32));

    let parent = observer.clone();
    let mounted = Rc::clone(&rows);
    let counter = Rc::clone(&nested_calls);
    observer.subscribe(move |screens| {
        if screens.is_active(Breakpoint::Md) && mounted.borrow().is_empty() {
            let gutter = Gutter::horizontal(Responsive::per_breakpoint([
                (Breakpoint::Sm, 8),
                (Breakpoint::Lg, 24),
            ]));
            mounted.borrow_mut().push(RowScreens::mount(&parent, gutter));
            let counter = Rc::clone(&counter);
            parent.subscribe(move |_| counter.set(counter.get() + 1));
        }
    });

    viewport.set_width(800);
    // md flips during this resize; the nested subscriber only got its
    // initial snapshot for the pass that created it.
    let after_md = nested_calls.get();
    assert_eq!(after_md, 1);
    assert_eq!(rows.borrow()[0].gutter(), [8, 0]);

    viewport.set_width(1_000);
    assert_eq!(nested_calls.get(), after_md + 1);
    assert_eq!(rows.borrow()[0].gutter(), [24, 0]);
}

#[test]
fn observers_are_independent() {
    let narrow = Rc::new(SimulatedViewport::new(400));
    let wide = Rc::new(SimulatedViewport::new(1_400));
    let a = BreakpointObserver::new(ResponsiveMap::default(), narrow.clone());
    let b = BreakpointObserver::new(ResponsiveMap::default(), wide.clone());

    let ta = a.subscribe(|_| {});
    let tb = b.subscribe(|_| {});
    assert_eq!(ta.to_string(), "0");
    assert_eq!(tb.to_string(), "0");
    assert_eq!(a.current().largest_active(), Some(Breakpoint::Xs));
    assert_eq!(b.current().largest_active(), Some(Breakpoint::Xl));

    a.unsubscribe(ta);
    assert_eq!(narrow.active_watches(), 0);
    assert_eq!(wide.active_watches(), 6);
}

#[test]
fn state_serializes_for_logging() {
    let viewport = Rc::new(SimulatedViewport::new(700));
    let observer = BreakpointObserver::new(two_tier(), viewport.clone());
    observer.subscribe(|_| {});
    assert_eq!(
        serde_json::to_string(&observer.current()).unwrap(),
        r#"{"sm":true}"#
    );
}

#[test]
fn observer_built_from_json_config() {
    let map: ResponsiveMap = serde_json::from_str(
        r#"{"sm":"(min-width: 600px)","lg":"(min-width: 600px) and (max-width: 899px)"}"#,
    )
    .unwrap();
    let viewport = Rc::new(SimulatedViewport::new(700));
    let observer = BreakpointObserver::new(map, viewport.clone());
    let logger = Recorder::new();
    observer.subscribe(logger.callback());

    assert_eq!(viewport.watched_queries().len(), 2);
    assert_eq!(
        logger.last(),
        Some(state(&[(Breakpoint::Sm, true), (Breakpoint::Lg, true)]))
    );

    viewport.set_width(950);
    assert_eq!(
        logger.last(),
        Some(state(&[(Breakpoint::Sm, true), (Breakpoint::Lg, false)]))
    );
}
