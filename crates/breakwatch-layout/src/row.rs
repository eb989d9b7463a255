#![forbid(unsafe_code)]

//! Breakpoint subscription held by a grid row.
//!
//! A row subscribes when it is mounted and unsubscribes when it is unmounted
//! or dropped. Screens are only recorded when the row's gutter is responsive;
//! a fixed gutter never needs them.

use std::cell::RefCell;
use std::rc::Rc;

use breakwatch_core::BreakpointState;
use breakwatch_runtime::{BreakpointObserver, Subscription};

use crate::gutter::Gutter;

/// A mounted grid row's view of the breakpoint state.
#[derive(Debug)]
pub struct RowScreens {
    gutter: Gutter,
    screens: Rc<RefCell<BreakpointState>>,
    subscription: Option<Subscription>,
}

impl RowScreens {
    /// Subscribe to `observer` for a row with `gutter`.
    pub fn mount(observer: &BreakpointObserver, gutter: Gutter) -> Self {
        let screens = Rc::new(RefCell::new(BreakpointState::new()));
        let tracks_screens = gutter.is_responsive();
        let sink = Rc::clone(&screens);
        let subscription = observer.subscribe_guard(move |state| {
            if tracks_screens {
                *sink.borrow_mut() = state.clone();
            }
        });
        Self {
            gutter,
            screens,
            subscription: Some(subscription),
        }
    }

    /// Resolved `[horizontal, vertical]` spacing for the last recorded screens.
    #[must_use]
    pub fn gutter(&self) -> [u32; 2] {
        self.gutter.resolve(&self.screens.borrow())
    }

    /// Last recorded screens (empty for fixed gutters).
    #[must_use]
    pub fn screens(&self) -> BreakpointState {
        self.screens.borrow().clone()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Release the subscription. Calling this again is a no-op.
    pub fn unmount(&mut self) {
        self.subscription.take();
    }
}
