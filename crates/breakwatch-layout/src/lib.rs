#![forbid(unsafe_code)]

//! Layout-side readers of breakpoint state.
//!
//! Grid components do not watch the viewport themselves; they subscribe to a
//! [`BreakpointObserver`](breakwatch_runtime::BreakpointObserver) and resolve
//! per-tier values against the snapshots they receive.
//!
//! - [`Responsive`]: a fixed value or a per-tier table, resolved largest tier
//!   first.
//! - [`Gutter`]: a row's `[horizontal, vertical]` spacing.
//! - [`RowScreens`]: the subscription a grid row holds for its lifetime.

pub mod gutter;
pub mod responsive;
pub mod row;

pub use gutter::Gutter;
pub use responsive::Responsive;
pub use row::RowScreens;
