#![forbid(unsafe_code)]

//! Responsive layout modes and mode-keyed values.
//!
//! [`LayoutMode`] classifies a viewport width into one of three tiers.
//! [`Responsive<T>`] maps those tiers to values, inheriting from the next
//! smaller tier when a value is not set.
//!
//! # Invariants
//!
//! 1. Mode boundaries are closed below and open above:
//!    `[0, 900)` narrow, `[900, 1280)` medium, `[1280, ∞)` wide.
//! 2. `Narrow` always has a value in a [`Responsive`] (set via `new()`).
//! 3. `resolve()` never fails.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Smallest viewport width that lays cards out in two columns.
pub const MEDIUM_MIN_WIDTH: f64 = 900.0;
/// Smallest viewport width that lays cards out in three columns.
pub const WIDE_MIN_WIDTH: f64 = 1280.0;

/// Responsive tier selected from the viewport width.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// One column. Cards flow normally and are not draggable.
    #[default]
    Narrow = 0,
    /// Two absolutely positioned columns.
    Medium = 1,
    /// Three absolutely positioned columns.
    Wide = 2,
}

impl LayoutMode {
    /// All modes, smallest first.
    pub const ALL: [LayoutMode; 3] = [LayoutMode::Narrow, LayoutMode::Medium, LayoutMode::Wide];

    /// Classify a viewport width using the default breakpoints.
    #[must_use]
    pub fn from_viewport_width(width: f64) -> Self {
        Self::with_breakpoints(width, MEDIUM_MIN_WIDTH, WIDE_MIN_WIDTH)
    }

    /// Classify a viewport width using explicit breakpoints.
    ///
    /// A NaN width classifies as `Narrow`.
    #[must_use]
    pub fn with_breakpoints(width: f64, medium_min: f64, wide_min: f64) -> Self {
        if width >= wide_min {
            Self::Wide
        } else if width >= medium_min {
            Self::Medium
        } else {
            Self::Narrow
        }
    }

    /// Whether cards in this mode are absolutely positioned (and therefore
    /// draggable and in need of a synthetic container height).
    #[must_use]
    pub const fn is_positioned(self) -> bool {
        !matches!(self, Self::Narrow)
    }

    /// Stable lowercase label for logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Narrow => "narrow",
            Self::Medium => "medium",
            Self::Wide => "wide",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A mode-aware value with inheritance from smaller modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Responsive<T> {
    base: T,
    /// Overrides for `Medium` and `Wide`, indexed by ordinal - 1.
    overrides: [Option<T>; 2],
}

impl<T: Clone> Responsive<T> {
    /// Create a responsive value with a base value for `Narrow`.
    #[must_use]
    pub fn new(base: T) -> Self {
        Self {
            base,
            overrides: [None, None],
        }
    }

    /// Set the value for a specific mode (builder pattern).
    #[must_use]
    pub fn at(mut self, mode: LayoutMode, value: T) -> Self {
        self.set(mode, value);
        self
    }

    /// Set the value for a specific mode (mutating).
    pub fn set(&mut self, mode: LayoutMode, value: T) {
        match mode {
            LayoutMode::Narrow => self.base = value,
            other => self.overrides[other as usize - 1] = Some(value),
        }
    }

    /// Resolve the value for a mode, walking down to `Narrow`.
    #[must_use]
    pub fn resolve(&self, mode: LayoutMode) -> &T {
        let idx = mode as usize;
        self.overrides[..idx]
            .iter()
            .rev()
            .find_map(Option::as_ref)
            .unwrap_or(&self.base)
    }
}

impl<T: Clone + Default> Default for Responsive<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundaries_are_closed_below() {
        assert_eq!(LayoutMode::from_viewport_width(899.99), LayoutMode::Narrow);
        assert_eq!(LayoutMode::from_viewport_width(900.0), LayoutMode::Medium);
        assert_eq!(LayoutMode::from_viewport_width(1279.5), LayoutMode::Medium);
        assert_eq!(LayoutMode::from_viewport_width(1280.0), LayoutMode::Wide);
        assert_eq!(LayoutMode::from_viewport_width(f64::NAN), LayoutMode::Narrow);
    }

    #[test]
    fn only_narrow_flows_in_the_document() {
        assert!(!LayoutMode::Narrow.is_positioned());
        assert!(LayoutMode::Medium.is_positioned());
        assert!(LayoutMode::Wide.is_positioned());
    }

    #[test]
    fn responsive_inherits_from_smaller_modes() {
        let r = Responsive::new(16.0).at(LayoutMode::Medium, 80.0);
        assert_eq!(r.resolve(LayoutMode::Narrow), &16.0);
        assert_eq!(r.resolve(LayoutMode::Medium), &80.0);
        assert_eq!(r.resolve(LayoutMode::Wide), &80.0);
    }

    #[test]
    fn responsive_set_overrides() {
        let mut r = Responsive::new(1);
        r.set(LayoutMode::Wide, 3);
        assert_eq!(r.resolve(LayoutMode::Medium), &1);
        assert_eq!(r.resolve(LayoutMode::Wide), &3);
    }

    proptest! {
        #[test]
        fn mode_is_monotonic_in_width(a in 0.0f64..4000.0, b in 0.0f64..4000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let narrower = LayoutMode::from_viewport_width(lo);
            prop_assert!(narrower <= LayoutMode::from_viewport_width(hi));
        }
    }
}
