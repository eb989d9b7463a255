#![forbid(unsafe_code)]

//! Named viewport-width tiers.
//!
//! Tiers are ordered by width: `Xs < Sm < Md < Lg < Xl < Xxl`. Consumers that
//! resolve a responsive value walk [`RESPONSIVE_ORDER`] (largest first) and
//! take the first active tier.

use std::fmt;
use std::str::FromStr;

/// A named viewport-width tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

/// Breakpoints from largest to smallest.
///
/// Collaborators that pick a per-tier value iterate this and stop at the first
/// active tier that has one.
pub const RESPONSIVE_ORDER: [Breakpoint; 6] = [
    Breakpoint::Xxl,
    Breakpoint::Xl,
    Breakpoint::Lg,
    Breakpoint::Md,
    Breakpoint::Sm,
    Breakpoint::Xs,
];

impl Breakpoint {
    /// All tiers from smallest to largest.
    pub const ALL: [Breakpoint; 6] = [
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::Xxl,
    ];

    /// Short lowercase name (`"xs"`, `"sm"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xxl => "xxl",
        }
    }

    /// Position in [`Breakpoint::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a breakpoint tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointParseError {
    name: String,
}

impl BreakpointParseError {
    /// The rejected input.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for BreakpointParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown breakpoint: {}", self.name)
    }
}

impl std::error::Error for BreakpointParseError {}

impl FromStr for Breakpoint {
    type Err = BreakpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|bp| bp.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| BreakpointParseError {
                name: s.to_string(),
            })
    }
}

impl serde::Serialize for Breakpoint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Breakpoint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
