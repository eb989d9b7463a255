#![forbid(unsafe_code)]

//! Core: breakpoint tiers, media conditions, and breakpoint state.
//!
//! # Role in Breakwatch
//! `breakwatch-core` is the vocabulary layer. It owns the fixed set of
//! breakpoint tiers, the width predicates attached to them, and the immutable
//! state snapshot that the observer hands to subscribers.
//!
//! # Primary responsibilities
//! - **Breakpoint**: the six named tiers and their public largest-to-smallest
//!   ordering ([`RESPONSIVE_ORDER`]).
//! - **MediaQuery**: min/max-width predicates with CSS text parsing and
//!   rendering.
//! - **ResponsiveMap**: the tier → condition configuration.
//! - **BreakpointState**: the replace-only snapshot of which tiers match.
//!
//! # How it fits in the system
//! The runtime (`breakwatch-runtime`) watches every condition of a
//! [`ResponsiveMap`] and dispatches [`BreakpointState`] values. Layout helpers
//! (`breakwatch-layout`) read those values through [`RESPONSIVE_ORDER`].

pub mod breakpoint;
pub mod logging;
pub mod media_query;
pub mod responsive_map;
pub mod state;

pub use breakpoint::{Breakpoint, BreakpointParseError, RESPONSIVE_ORDER};
pub use media_query::{MediaQuery, QueryParseError};
pub use responsive_map::ResponsiveMap;
pub use state::BreakpointState;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, trace_span, warn};
