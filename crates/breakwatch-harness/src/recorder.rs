#![forbid(unsafe_code)]

//! Snapshot recorder for subscriber assertions.

use std::cell::RefCell;
use std::rc::Rc;

use breakwatch_core::BreakpointState;

/// Collects every state delivered to the callbacks it hands out.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    snapshots: Rc<RefCell<Vec<BreakpointState>>>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A subscriber callback that appends to this recorder.
    pub fn callback(&self) -> impl Fn(&BreakpointState) + use<> {
        let snapshots = Rc::clone(&self.snapshots);
        move |state: &BreakpointState| snapshots.borrow_mut().push(state.clone())
    }

    /// All recorded snapshots, oldest first.
    #[must_use]
    pub fn snapshots(&self) -> Vec<BreakpointState> {
        self.snapshots.borrow().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<BreakpointState> {
        self.snapshots.borrow().last().cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.snapshots.borrow_mut().clear();
    }
}
