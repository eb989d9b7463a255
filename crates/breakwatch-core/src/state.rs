#![forbid(unsafe_code)]

//! Breakpoint state snapshots.
//!
//! # Invariants
//!
//! 1. A [`BreakpointState`] is never mutated after it has been handed out;
//!    [`BreakpointState::with`] builds a new value.
//! 2. `with` carries every other flag forward unchanged, so merging an event
//!    for one tier never drops what earlier events recorded.
//! 3. A tier that has never been reported is absent, and reads as inactive.

use std::collections::BTreeMap;

use crate::breakpoint::{Breakpoint, RESPONSIVE_ORDER};

/// Which breakpoint conditions are currently satisfied.
///
/// Starts empty. Serializes as an object keyed by tier name, e.g.
/// `{"sm":true,"md":false}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct BreakpointState {
    flags: BTreeMap<Breakpoint, bool>,
}

impl BreakpointState {
    /// Empty state: no tier reported yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of `self` with `breakpoint` set to `active`.
    #[must_use]
    pub fn with(&self, breakpoint: Breakpoint, active: bool) -> Self {
        let mut flags = self.flags.clone();
        flags.insert(breakpoint, active);
        Self { flags }
    }

    /// The recorded flag, or `None` if the tier was never reported.
    #[must_use]
    pub fn get(&self, breakpoint: Breakpoint) -> Option<bool> {
        self.flags.get(&breakpoint).copied()
    }

    /// Whether `breakpoint` is recorded as matching. Unreported reads `false`.
    #[must_use]
    pub fn is_active(&self, breakpoint: Breakpoint) -> bool {
        self.get(breakpoint).unwrap_or(false)
    }

    /// Recorded flags, smallest tier first.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, bool)> + '_ {
        self.flags.iter().map(|(bp, active)| (*bp, *active))
    }

    /// Active tiers, smallest first.
    pub fn active(&self) -> impl Iterator<Item = Breakpoint> + '_ {
        self.iter().filter_map(|(bp, active)| active.then_some(bp))
    }

    /// The largest active tier, walking [`RESPONSIVE_ORDER`].
    #[must_use]
    pub fn largest_active(&self) -> Option<Breakpoint> {
        RESPONSIVE_ORDER
            .into_iter()
            .find(|bp| self.is_active(*bp))
    }

    /// Number of recorded tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl FromIterator<(Breakpoint, bool)> for BreakpointState {
    fn from_iter<I: IntoIterator<Item = (Breakpoint, bool)>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}
