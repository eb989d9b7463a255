#![forbid(unsafe_code)]

//! Breakpoint → media condition configuration.
//!
//! A [`ResponsiveMap`] is static configuration: it is built once, handed to an
//! observer, and never changes afterwards. The default map uses the familiar
//! six-tier thresholds:
//!
//! | tier | condition             |
//! |------|-----------------------|
//! | xs   | `(max-width: 575px)`  |
//! | sm   | `(min-width: 576px)`  |
//! | md   | `(min-width: 768px)`  |
//! | lg   | `(min-width: 992px)`  |
//! | xl   | `(min-width: 1200px)` |
//! | xxl  | `(min-width: 1600px)` |
//!
//! # Example
//!
//! ```
//! use breakwatch_core::{Breakpoint, MediaQuery, ResponsiveMap};
//!
//! let map = ResponsiveMap::empty()
//!     .with(Breakpoint::Sm, MediaQuery::min_width(576))
//!     .with(Breakpoint::Md, MediaQuery::min_width(768));
//!
//! let state = map.matching(600);
//! assert!(state.is_active(Breakpoint::Sm));
//! assert!(!state.is_active(Breakpoint::Md));
//! ```

use std::collections::BTreeMap;

use crate::breakpoint::Breakpoint;
use crate::media_query::MediaQuery;
use crate::state::BreakpointState;

/// Ordered mapping from breakpoint tier to its media condition.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ResponsiveMap {
    queries: BTreeMap<Breakpoint, MediaQuery>,
}

impl Default for ResponsiveMap {
    fn default() -> Self {
        Self::empty()
            .with(Breakpoint::Xs, MediaQuery::max_width(575))
            .with(Breakpoint::Sm, MediaQuery::min_width(576))
            .with(Breakpoint::Md, MediaQuery::min_width(768))
            .with(Breakpoint::Lg, MediaQuery::min_width(992))
            .with(Breakpoint::Xl, MediaQuery::min_width(1200))
            .with(Breakpoint::Xxl, MediaQuery::min_width(1600))
    }
}

impl ResponsiveMap {
    /// A map with no tiers configured.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            queries: BTreeMap::new(),
        }
    }

    /// Set (or replace) the condition for `breakpoint`.
    #[must_use]
    pub fn with(mut self, breakpoint: Breakpoint, query: MediaQuery) -> Self {
        self.queries.insert(breakpoint, query);
        self
    }

    #[must_use]
    pub fn get(&self, breakpoint: Breakpoint) -> Option<&MediaQuery> {
        self.queries.get(&breakpoint)
    }

    /// Configured tiers with their conditions, smallest tier first.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &MediaQuery)> {
        self.queries.iter().map(|(bp, query)| (*bp, query))
    }

    /// Configured tiers, smallest first.
    pub fn breakpoints(&self) -> impl Iterator<Item = Breakpoint> + '_ {
        self.queries.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// The state a viewport of `width` pixels would produce, with every
    /// configured tier present.
    #[must_use]
    pub fn matching(&self, width: u32) -> BreakpointState {
        self.iter()
            .fold(BreakpointState::new(), |state, (bp, query)| {
                state.with(bp, query.matches(width))
            })
    }
}
