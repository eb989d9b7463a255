#![forbid(unsafe_code)]

//! Runtime: the breakpoint observer and its environment contract.
//!
//! This crate provides the publish/subscribe engine that turns media-condition
//! events into [`BreakpointState`](breakwatch_core::BreakpointState) snapshots:
//!
//! - [`BreakpointObserver`]: subscriber registry, current-state owner, and
//!   media watch lifecycle.
//! - [`MediaWatcher`]: the injected viewport-watching capability.
//! - [`NoopWatcher`]: the stand-in for headless or unsupported environments.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//!
//! # Architecture
//!
//! The observer is single-threaded. Shared state lives in `Rc<RefCell<..>>`;
//! handler closures given to the watcher hold `Weak` references back to it.
//! No `RefCell` borrow is held while a subscriber callback or a watcher method
//! runs, so callbacks may freely subscribe, unsubscribe, or trigger further
//! dispatches.
//!
//! # Invariants
//!
//! 1. Media watches are registered iff the subscriber count is non-zero.
//! 2. Subscribers are notified in subscription order.
//! 3. A dispatch notifies exactly the subscribers present when it started.
//! 4. Tokens are never reused.

pub mod observer;
pub mod watcher;

pub use observer::{BreakpointObserver, Subscription, SubscriptionToken, TokenParseError};
pub use watcher::{MediaWatcher, NoopWatcher, QueryHandler, WatchHandle};
