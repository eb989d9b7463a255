#![forbid(unsafe_code)]

//! Test harness for Breakwatch observers.
//!
//! - [`SimulatedViewport`]: a [`MediaWatcher`](breakwatch_runtime::MediaWatcher)
//!   that evaluates conditions against a width the test controls, with call
//!   counters for lifecycle assertions.
//! - [`Recorder`]: collects every snapshot a subscriber receives.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use breakwatch_core::{Breakpoint, ResponsiveMap};
//! use breakwatch_harness::{Recorder, SimulatedViewport};
//! use breakwatch_runtime::BreakpointObserver;
//!
//! let viewport = Rc::new(SimulatedViewport::new(375));
//! let observer = BreakpointObserver::new(ResponsiveMap::default(), viewport.clone());
//! let recorder = Recorder::new();
//! observer.subscribe(recorder.callback());
//!
//! viewport.set_width(1024);
//! let last = recorder.last().unwrap();
//! assert_eq!(last.largest_active(), Some(Breakpoint::Lg));
//! ```

pub mod recorder;
pub mod viewport;

pub use recorder::Recorder;
pub use viewport::SimulatedViewport;
