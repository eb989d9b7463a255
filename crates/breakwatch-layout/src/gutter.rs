#![forbid(unsafe_code)]

//! Grid row gutters.
//!
//! A gutter is written the way grid rows accept it: a single value (horizontal
//! only), a per-tier table, or a `[horizontal, vertical]` pair whose entries are
//! either. Resolution turns it into pixel spacing for the current screens.

use breakwatch_core::BreakpointState;

use crate::responsive::Responsive;

/// Horizontal and vertical spacing between grid cells.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "GutterSpec", into = "GutterSpec")]
pub struct Gutter {
    pub horizontal: Responsive<u32>,
    pub vertical: Responsive<u32>,
}

impl Gutter {
    /// Same horizontal spacing at every tier, no vertical spacing.
    #[must_use]
    pub fn uniform(px: u32) -> Self {
        Self::horizontal(Responsive::Fixed(px))
    }

    /// Horizontal spacing only.
    #[must_use]
    pub fn horizontal(horizontal: Responsive<u32>) -> Self {
        Self {
            horizontal,
            vertical: Responsive::Fixed(0),
        }
    }

    #[must_use]
    pub fn pair(horizontal: Responsive<u32>, vertical: Responsive<u32>) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Whether either axis depends on breakpoint state.
    #[must_use]
    pub fn is_responsive(&self) -> bool {
        self.horizontal.is_responsive() || self.vertical.is_responsive()
    }

    /// `[horizontal, vertical]` in pixels. An axis with no active tier in its
    /// table resolves to 0.
    #[must_use]
    pub fn resolve(&self, screens: &BreakpointState) -> [u32; 2] {
        [
            self.horizontal.resolve(screens).unwrap_or(0),
            self.vertical.resolve(screens).unwrap_or(0),
        ]
    }
}

/// Wire form: a single value or a `[horizontal, vertical]` pair.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum GutterSpec {
    Single(Responsive<u32>),
    Pair([Responsive<u32>; 2]),
}

impl From<GutterSpec> for Gutter {
    fn from(spec: GutterSpec) -> Self {
        match spec {
            GutterSpec::Single(horizontal) => Self::horizontal(horizontal),
            GutterSpec::Pair([horizontal, vertical]) => Self::pair(horizontal, vertical),
        }
    }
}

impl From<Gutter> for GutterSpec {
    fn from(gutter: Gutter) -> Self {
        if gutter.vertical == Responsive::Fixed(0) {
            Self::Single(gutter.horizontal)
        } else {
            Self::Pair([gutter.horizontal, gutter.vertical])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakwatch_core::{Breakpoint, ResponsiveMap};
    use pretty_assertions::assert_eq;

    #[test]
    fn uniform_gutter() {
        let gutter = Gutter::uniform(16);
        assert_eq!(gutter.resolve(&BreakpointState::new()), [16, 0]);
        assert!(!gutter.is_responsive());
    }

    #[test]
    fn responsive_pair() {
        let gutter = Gutter::pair(
            Responsive::per_breakpoint([(Breakpoint::Xs, 8), (Breakpoint::Lg, 32)]),
            Responsive::Fixed(24),
        );
        assert!(gutter.is_responsive());

        let map = ResponsiveMap::default();
        assert_eq!(gutter.resolve(&map.matching(400)), [8, 24]);
        // sm and md are active but have no entry, and xs is off.
        assert_eq!(gutter.resolve(&map.matching(800)), [0, 24]);
        assert_eq!(gutter.resolve(&map.matching(1000)), [32, 24]);
    }

    #[test]
    fn before_first_dispatch_tables_resolve_to_zero() {
        let gutter = Gutter::horizontal(Responsive::per_breakpoint([(Breakpoint::Md, 16)]));
        assert_eq!(gutter.resolve(&BreakpointState::new()), [0, 0]);
    }

    #[test]
    fn deserializes_all_prop_shapes() {
        let single: Gutter = serde_json::from_str("16").unwrap();
        assert_eq!(single, Gutter::uniform(16));

        let table: Gutter = serde_json::from_str(r#"{"sm":8,"md":16}"#).unwrap();
        assert_eq!(
            table,
            Gutter::horizontal(Responsive::per_breakpoint([
                (Breakpoint::Sm, 8),
                (Breakpoint::Md, 16)
            ]))
        );

        let pair: Gutter = serde_json::from_str(r#"[{"lg":24},12]"#).unwrap();
        assert_eq!(
            pair,
            Gutter::pair(
                Responsive::per_breakpoint([(Breakpoint::Lg, 24)]),
                Responsive::Fixed(12)
            )
        );
    }

    #[test]
    fn serializes_compactly() {
        assert_eq!(serde_json::to_string(&Gutter::uniform(8)).unwrap(), "8");
        assert_eq!(
            serde_json::to_string(&Gutter::pair(Responsive::Fixed(8), Responsive::Fixed(4)))
                .unwrap(),
            "[8,4]"
        );
    }
}
