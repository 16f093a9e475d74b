#![forbid(unsafe_code)]

//! Column sizing derived from the viewport width.

use notedesk_core::geometry::round_half_up;
use serde::{Deserialize, Serialize};

use crate::mode::{LayoutMode, MEDIUM_MIN_WIDTH, WIDE_MIN_WIDTH};

/// Tunable layout constants.
///
/// Defaults reproduce the reference desk exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal gap between columns.
    pub gap: f64,
    /// Left margin before the first column.
    pub margin: f64,
    /// Column width floor on narrow viewports.
    pub narrow_min_column_width: f64,
    /// Column width floor on medium/wide viewports.
    pub min_column_width: f64,
    /// Column width ceiling on medium/wide viewports.
    pub max_column_width: f64,
    /// Fraction of the viewport a medium/wide column aims for.
    pub column_fraction: f64,
    /// Smallest two-column viewport width.
    pub medium_min_width: f64,
    /// Smallest three-column viewport width.
    pub wide_min_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap: 28.0,
            margin: 40.0,
            narrow_min_column_width: 280.0,
            min_column_width: 360.0,
            max_column_width: 560.0,
            column_fraction: 0.30,
            medium_min_width: MEDIUM_MIN_WIDTH,
            wide_min_width: WIDE_MIN_WIDTH,
        }
    }
}

impl LayoutConfig {
    /// Classify a viewport width with this config's breakpoints.
    #[must_use]
    pub fn mode_for(&self, viewport_width: f64) -> LayoutMode {
        LayoutMode::with_breakpoints(viewport_width, self.medium_min_width, self.wide_min_width)
    }

    /// Range violations, empty when valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.gap.is_finite() || self.gap < 0.0 {
            errors.push(format!("layout.gap must be >= 0, got {}", self.gap));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            errors.push(format!("layout.margin must be >= 0, got {}", self.margin));
        }
        if self.min_column_width <= 0.0 || self.min_column_width > self.max_column_width {
            errors.push(format!(
                "layout.min_column_width must be in (0, max_column_width], got {}",
                self.min_column_width
            ));
        }
        if self.column_fraction <= 0.0 || self.column_fraction > 1.0 {
            errors.push(format!(
                "layout.column_fraction must be in (0, 1], got {}",
                self.column_fraction
            ));
        }
        if self.medium_min_width >= self.wide_min_width {
            errors.push(format!(
                "layout.medium_min_width ({}) must be below wide_min_width ({})",
                self.medium_min_width, self.wide_min_width
            ));
        }
        errors
    }
}

/// Resolved column geometry for one viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetrics {
    pub mode: LayoutMode,
    pub column_width: f64,
    pub gap: f64,
    pub margin: f64,
}

impl ColumnMetrics {
    /// Size columns for a viewport.
    ///
    /// Narrow viewports fill the width minus both margins (never below the
    /// narrow floor). Wider viewports take a fixed fraction of the width,
    /// clamped to `[min_column_width, max_column_width]`. The result is
    /// rounded to a whole pixel.
    #[must_use]
    pub fn for_viewport(viewport_width: f64, config: &LayoutConfig) -> Self {
        let mode = config.mode_for(viewport_width);
        let raw = if mode == LayoutMode::Narrow {
            (viewport_width - 2.0 * config.margin).max(config.narrow_min_column_width)
        } else {
            (viewport_width * config.column_fraction)
                .max(config.min_column_width)
                .min(config.max_column_width)
        };
        Self {
            mode,
            column_width: round_half_up(raw),
            gap: config.gap,
            margin: config.margin,
        }
    }

    /// Left edge of column `index`.
    #[must_use]
    pub fn column_x(&self, index: usize) -> f64 {
        column_x(index, self.column_width, self.gap, self.margin)
    }
}

/// `margin + index * (column_width + gap)`.
#[inline]
#[must_use]
pub fn column_x(index: usize, column_width: f64, gap: f64, margin: f64) -> f64 {
    margin + index as f64 * (column_width + gap)
}
