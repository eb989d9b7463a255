#![forbid(unsafe_code)]

//! Breakpoint observer: subscriber registry with media watch lifecycle.
//!
//! # Design
//!
//! [`BreakpointObserver`] is a cheap-clone handle to shared, single-threaded
//! state (`Rc<..>` around a `RefCell`). The first subscriber causes one media
//! watch per configured breakpoint to be registered with the injected
//! [`MediaWatcher`]; the last unsubscribe releases them. Each watch reports
//! into [`BreakpointObserver::dispatch`] with the current state plus the one
//! flag that changed.
//!
//! # Reentrancy
//!
//! Dispatch clones the subscriber list before calling anyone, and the state
//! passed to a callback is the immutable snapshot of that dispatch. A callback
//! may subscribe, unsubscribe, or cause another dispatch:
//!
//! - a subscriber added mid-pass gets its initial snapshot from `subscribe`
//!   and is first notified by the next dispatch;
//! - a subscriber removed mid-pass still receives the pass that was already
//!   under way, and nothing after.
//!
//! # Failure Modes
//!
//! | Mode | Condition | Behavior |
//! |------|-----------|----------|
//! | Unknown token | `unsubscribe` twice, or a foreign token | No-op |
//! | No environment | [`NoopWatcher`](crate::NoopWatcher) injected | Subscribers only ever see the empty state |
//! | Dispatch with no subscribers | Event between last unsubscribe and teardown | State updated, returns `false` |

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use breakwatch_core::{Breakpoint, BreakpointState, ResponsiveMap};
use breakwatch_core::{debug, trace};

use crate::watcher::{MediaWatcher, QueryHandler, WatchHandle};

type Callback = Rc<dyn Fn(&BreakpointState)>;

/// Identifier returned by [`BreakpointObserver::subscribe`].
///
/// Tokens are issued from a per-observer counter starting at `0` and are never
/// reused. The string form is the decimal counter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionToken(u64);

impl SubscriptionToken {
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when parsing a token from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParseError(String);

impl fmt::Display for TokenParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid subscription token: {}", self.0)
    }
}

impl std::error::Error for TokenParseError {}

impl FromStr for SubscriptionToken {
    type Err = TokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(SubscriptionToken)
            .map_err(|_| TokenParseError(s.to_string()))
    }
}

struct Subscriber {
    token: SubscriptionToken,
    callback: Callback,
}

struct ObserverState {
    current: Rc<BreakpointState>,
    subscribers: Vec<Subscriber>,
    next_token: u64,
    registered: bool,
    registrations: BTreeMap<Breakpoint, WatchHandle>,
}

struct ObserverInner {
    map: ResponsiveMap,
    watcher: Rc<dyn MediaWatcher>,
    state: RefCell<ObserverState>,
}

impl Drop for ObserverInner {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        let handles = std::mem::take(&mut state.registrations);
        for handle in handles.into_values() {
            self.watcher.unregister(handle);
        }
    }
}

/// Publishes breakpoint state changes to subscribers.
///
/// Cloning creates another handle to the **same** observer.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use breakwatch_core::ResponsiveMap;
/// use breakwatch_runtime::{BreakpointObserver, NoopWatcher};
///
/// let observer = BreakpointObserver::new(ResponsiveMap::default(), Rc::new(NoopWatcher::new()));
/// let token = observer.subscribe(|screens| {
///     assert!(screens.is_empty());
/// });
/// assert_eq!(token.to_string(), "0");
/// assert!(observer.is_registered());
///
/// observer.unsubscribe(token);
/// assert!(!observer.is_registered());
/// ```
#[derive(Clone)]
pub struct BreakpointObserver {
    inner: Rc<ObserverInner>,
}

impl fmt::Debug for BreakpointObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("BreakpointObserver")
            .field("current", &state.current)
            .field("subscriber_count", &state.subscribers.len())
            .field("registered", &state.registered)
            .finish()
    }
}

impl BreakpointObserver {
    /// Create an observer for `map`, watching through `watcher`.
    ///
    /// Nothing is registered until the first subscriber arrives.
    #[must_use]
    pub fn new(map: ResponsiveMap, watcher: Rc<dyn MediaWatcher>) -> Self {
        Self {
            inner: Rc::new(ObserverInner {
                map,
                watcher,
                state: RefCell::new(ObserverState {
                    current: Rc::new(BreakpointState::new()),
                    subscribers: Vec::new(),
                    next_token: 0,
                    registered: false,
                    registrations: BTreeMap::new(),
                }),
            }),
        }
    }

    /// Subscribe to state changes.
    ///
    /// The first subscriber activates media watches. `callback` is invoked
    /// with the current state before this returns, then with every dispatched
    /// state until the returned token is unsubscribed.
    pub fn subscribe(&self, callback: impl Fn(&BreakpointState) + 'static) -> SubscriptionToken {
        if self.inner.state.borrow().subscribers.is_empty() {
            self.register();
        }

        let callback: Callback = Rc::new(callback);
        let (token, snapshot) = {
            let mut state = self.inner.state.borrow_mut();
            let token = SubscriptionToken(state.next_token);
            state.next_token += 1;
            state.subscribers.push(Subscriber {
                token,
                callback: Rc::clone(&callback),
            });
            (token, Rc::clone(&state.current))
        };
        trace!(%token, "subscribed");

        callback(&snapshot);
        token
    }

    /// Like [`subscribe`](Self::subscribe), returning a guard that
    /// unsubscribes when dropped.
    pub fn subscribe_guard(&self, callback: impl Fn(&BreakpointState) + 'static) -> Subscription {
        let token = self.subscribe(callback);
        Subscription {
            observer: Rc::downgrade(&self.inner),
            token,
        }
    }

    /// Stop delivering to `token`. Unknown tokens are ignored.
    ///
    /// When no subscribers remain, media watches are released.
    pub fn unsubscribe(&self, token: SubscriptionToken) {
        let (removed, now_empty) = {
            let mut state = self.inner.state.borrow_mut();
            let removed = state
                .subscribers
                .iter()
                .position(|sub| sub.token == token)
                .map(|index| state.subscribers.remove(index));
            (removed, state.subscribers.is_empty())
        };
        if removed.is_some() {
            trace!(%token, "unsubscribed");
        }
        // Dropped outside the borrow: a callback may own a guard whose drop
        // re-enters the observer.
        drop(removed);

        if now_empty {
            self.unregister();
        }
    }

    /// Replace the current state and notify every subscriber.
    ///
    /// Returns `false` without notifying when there are no subscribers; the
    /// state is replaced either way.
    pub fn dispatch(&self, next: BreakpointState) -> bool {
        let (snapshot, callbacks) = {
            let mut state = self.inner.state.borrow_mut();
            let snapshot = Rc::new(next);
            state.current = Rc::clone(&snapshot);
            let callbacks: Vec<Callback> = state
                .subscribers
                .iter()
                .map(|sub| Rc::clone(&sub.callback))
                .collect();
            (snapshot, callbacks)
        };

        trace!(
            subscribers = callbacks.len(),
            notified = !callbacks.is_empty(),
            state = ?snapshot,
            "dispatch"
        );
        if callbacks.is_empty() {
            return false;
        }
        for callback in &callbacks {
            callback(&snapshot);
        }
        true
    }

    /// Current state snapshot.
    #[must_use]
    pub fn current(&self) -> BreakpointState {
        BreakpointState::clone(&self.inner.state.borrow().current)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.state.borrow().subscribers.len()
    }

    /// Whether media watches are currently active.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.inner.state.borrow().registered
    }

    /// The breakpoint configuration being watched.
    #[must_use]
    pub fn responsive_map(&self) -> &ResponsiveMap {
        &self.inner.map
    }

    fn register(&self) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.registered {
                return;
            }
            state.registered = true;
        }
        debug!(tiers = self.inner.map.len(), "registering media watches");

        for (breakpoint, query) in self.inner.map.iter() {
            let handler = QueryHandler::new(
                self.flag_hook(breakpoint, true),
                self.flag_hook(breakpoint, false),
            );
            // The watcher may fire `on_match` synchronously; no borrow is held.
            let handle = self.inner.watcher.register(query, handler);
            self.inner
                .state
                .borrow_mut()
                .registrations
                .insert(breakpoint, handle);
        }
    }

    fn unregister(&self) {
        let handles = {
            let mut state = self.inner.state.borrow_mut();
            if !state.registered {
                return;
            }
            state.registered = false;
            std::mem::take(&mut state.registrations)
        };
        debug!(tiers = handles.len(), "releasing media watches");

        for handle in handles.into_values() {
            self.inner.watcher.unregister(handle);
        }
    }

    fn flag_hook(&self, breakpoint: Breakpoint, active: bool) -> impl Fn() + use<> {
        let inner = Rc::downgrade(&self.inner);
        move || {
            if let Some(inner) = inner.upgrade() {
                BreakpointObserver { inner }.set_flag(breakpoint, active);
            }
        }
    }

    fn set_flag(&self, breakpoint: Breakpoint, active: bool) -> bool {
        let next = self.inner.state.borrow().current.with(breakpoint, active);
        trace!(%breakpoint, active, "media condition changed");
        self.dispatch(next)
    }
}

/// RAII guard for a subscription.
///
/// Dropping the guard unsubscribes. If the observer is already gone, dropping
/// does nothing.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    observer: Weak<ObserverInner>,
    token: SubscriptionToken,
}

impl Subscription {
    #[must_use]
    pub fn token(&self) -> SubscriptionToken {
        self.token
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.observer.upgrade() {
            BreakpointObserver { inner }.unsubscribe(self.token);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
