#![forbid(unsafe_code)]

//! Values that may vary by breakpoint.

use std::collections::BTreeMap;

use breakwatch_core::{Breakpoint, BreakpointState, RESPONSIVE_ORDER};

/// A value that is either fixed or chosen per breakpoint tier.
///
/// Deserializes from either a bare value or an object keyed by tier name, so
/// `16` and `{"xs": 8, "md": 16}` are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Responsive<T> {
    Fixed(T),
    PerBreakpoint(BTreeMap<Breakpoint, T>),
}

impl<T> Default for Responsive<T>
where
    T: Default,
{
    fn default() -> Self {
        Self::Fixed(T::default())
    }
}

impl<T: Clone> Responsive<T> {
    /// Per-tier table from `(tier, value)` pairs.
    pub fn per_breakpoint(values: impl IntoIterator<Item = (Breakpoint, T)>) -> Self {
        Self::PerBreakpoint(values.into_iter().collect())
    }

    /// Whether the value depends on breakpoint state.
    #[must_use]
    pub fn is_responsive(&self) -> bool {
        matches!(self, Self::PerBreakpoint(_))
    }

    /// Resolve against `screens`.
    ///
    /// A fixed value always resolves. A per-tier table walks
    /// [`RESPONSIVE_ORDER`] and returns the value of the first tier that is
    /// both active and present in the table, or `None`.
    #[must_use]
    pub fn resolve(&self, screens: &BreakpointState) -> Option<T> {
        match self {
            Self::Fixed(value) => Some(value.clone()),
            Self::PerBreakpoint(table) => RESPONSIVE_ORDER
                .iter()
                .filter(|bp| screens.is_active(**bp))
                .find_map(|bp| table.get(bp).cloned()),
        }
    }
}

impl<T> From<T> for Responsive<T> {
    fn from(value: T) -> Self {
        Self::Fixed(value)
    }
}
