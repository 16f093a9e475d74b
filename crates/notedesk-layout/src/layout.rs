#![forbid(unsafe_code)]

//! Initial card placement per responsive mode.
//!
//! Each mode hardcodes an assignment of cards to `(column, y)` slots. The
//! vertical offsets are tuned for the reference content and are not derived
//! from measured card heights: a card whose content grows taller than its
//! allowance overlaps the card below it in the same column. Users can also
//! drag cards on top of each other. Neither case is prevented.

use notedesk_core::geometry::Point;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::card::CardId;
use crate::metrics::{ColumnMetrics, column_x};
use crate::mode::LayoutMode;

/// First card's top edge in every mode.
pub const LAYOUT_TOP: f64 = 100.0;

/// Fun-fact note inset from its card's top-left corner.
pub const FUN_FACT_INSET: Point = Point::new(10.0, 14.0);
/// Fun-fact note width is the column width minus this, floored below.
pub const FUN_FACT_WIDTH_SHRINK: f64 = 24.0;
pub const FUN_FACT_MIN_WIDTH: f64 = 240.0;

const WIDE_SLOTS: [(CardId, usize, f64); 8] = [
    (CardId::TitleContact, 0, 100.0),
    (CardId::Education, 0, 540.0),
    (CardId::Projects, 0, 900.0),
    (CardId::Experience, 1, 100.0),
    (CardId::Skills, 2, 100.0),
    (CardId::Leadership, 2, 820.0),
    (CardId::LoveCenter, 1, 1250.0),
    (CardId::LoveRight, 2, 1200.0),
];

const MEDIUM_SLOTS: [(CardId, usize, f64); 8] = [
    (CardId::TitleContact, 0, 100.0),
    (CardId::Education, 0, 620.0),
    (CardId::Projects, 0, 1100.0),
    (CardId::Experience, 1, 100.0),
    (CardId::Skills, 1, 1280.0),
    (CardId::Leadership, 1, 1720.0),
    (CardId::LoveCenter, 1, 980.0),
    (CardId::LoveRight, 1, 2100.0),
];

/// Narrow stack: card and the vertical allowance reserved before the next.
const NARROW_STACK: [(CardId, f64); 8] = [
    (CardId::TitleContact, 500.0),
    (CardId::Experience, 680.0),
    (CardId::LoveCenter, 380.0),
    (CardId::Skills, 560.0),
    (CardId::Leadership, 460.0),
    (CardId::LoveRight, 380.0),
    (CardId::Education, 460.0),
    (CardId::Projects, 0.0),
];

const NARROW_RENDER_ORDER: [CardId; 8] = [
    CardId::TitleContact,
    CardId::Experience,
    CardId::Education,
    CardId::Projects,
    CardId::Leadership,
    CardId::Skills,
    CardId::LoveCenter,
    CardId::LoveRight,
];

const POSITIONED_RENDER_ORDER: [CardId; 8] = [
    CardId::TitleContact,
    CardId::Skills,
    CardId::Experience,
    CardId::LoveCenter,
    CardId::Education,
    CardId::Leadership,
    CardId::LoveRight,
    CardId::Projects,
];

/// Initial card positions for one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeskLayout {
    mode: LayoutMode,
    column_width: f64,
    positions: FxHashMap<CardId, Point>,
}

impl DeskLayout {
    /// Mode these positions were computed for.
    #[must_use]
    pub const fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Column width the positions assume.
    #[must_use]
    pub const fn column_width(&self) -> f64 {
        self.column_width
    }

    /// Initial position of a card, or `None` if the card is not laid out.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    /// Number of placed cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Placed cards with positions, in host render order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, Point)> + '_ {
        render_order(self.mode)
            .iter()
            .filter_map(|&id| self.get(id).map(|p| (id, p)))
    }

    /// Fun-fact notes tucked behind each card. Empty on narrow viewports.
    #[must_use]
    pub fn fun_fact_notes(&self) -> Vec<FunFactNote> {
        if !self.mode.is_positioned() {
            return Vec::new();
        }
        let width = (self.column_width - FUN_FACT_WIDTH_SHRINK).max(FUN_FACT_MIN_WIDTH);
        CardId::FUN_FACT_TARGETS
            .iter()
            .filter_map(|&card| {
                self.get(card).map(|p| FunFactNote {
                    card,
                    position: p + FUN_FACT_INSET,
                    width,
                })
            })
            .collect()
    }
}

/// Placement of one fun-fact note.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FunFactNote {
    /// Card the note hides behind.
    pub card: CardId,
    pub position: Point,
    pub width: f64,
}

/// Compute initial card positions for a viewport.
///
/// Pure and deterministic: `wide` for widths ≥ 1280, `medium` for
/// `[900, 1280)`, `narrow` below.
#[must_use]
pub fn compute_layout(viewport_width: f64, column_width: f64, gap: f64, margin: f64) -> DeskLayout {
    compute_layout_for_mode(
        LayoutMode::from_viewport_width(viewport_width),
        column_width,
        gap,
        margin,
    )
}

/// Compute initial card positions from resolved column metrics.
#[must_use]
pub fn compute_layout_with_metrics(metrics: &ColumnMetrics) -> DeskLayout {
    compute_layout_for_mode(
        metrics.mode,
        metrics.column_width,
        metrics.gap,
        metrics.margin,
    )
}

/// Compute initial card positions for an already classified mode.
#[must_use]
pub fn compute_layout_for_mode(
    mode: LayoutMode,
    column_width: f64,
    gap: f64,
    margin: f64,
) -> DeskLayout {
    let x = |col: usize| column_x(col, column_width, gap, margin);
    let mut positions = FxHashMap::default();
    match mode {
        LayoutMode::Wide | LayoutMode::Medium => {
            let slots = if mode == LayoutMode::Wide {
                &WIDE_SLOTS
            } else {
                &MEDIUM_SLOTS
            };
            for &(id, col, y) in slots {
                positions.insert(id, Point::new(x(col), y));
            }
        }
        LayoutMode::Narrow => {
            let mut y = LAYOUT_TOP;
            for &(id, allowance) in &NARROW_STACK {
                positions.insert(id, Point::new(x(0), y));
                y += allowance;
            }
        }
    }
    DeskLayout {
        mode,
        column_width,
        positions,
    }
}

/// Host render order for a mode.
///
/// Narrow viewports flow cards in document order, so this is also their
/// visual order there.
#[must_use]
pub fn render_order(mode: LayoutMode) -> &'static [CardId] {
    match mode {
        LayoutMode::Narrow => &NARROW_RENDER_ORDER,
        LayoutMode::Medium | LayoutMode::Wide => &POSITIONED_RENDER_ORDER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn wide_mode_uses_three_columns() {
        let l = compute_layout(1440.0, 432.0, 28.0, 40.0);
        assert_eq!(l.mode(), LayoutMode::Wide);
        assert_eq!(l.get(CardId::TitleContact), Some(p(40.0, 100.0)));
        assert_eq!(l.get(CardId::Experience), Some(p(500.0, 100.0)));
        assert_eq!(l.get(CardId::Skills), Some(p(960.0, 100.0)));
        assert_eq!(l.get(CardId::Leadership), Some(p(960.0, 820.0)));
        assert_eq!(l.get(CardId::LoveCenter), Some(p(500.0, 1250.0)));
    }

    #[test]
    fn medium_mode_uses_two_columns() {
        let l = compute_layout(1000.0, 360.0, 28.0, 40.0);
        assert_eq!(l.mode(), LayoutMode::Medium);
        assert_eq!(l.get(CardId::Skills), Some(p(428.0, 1280.0)));
        assert_eq!(l.get(CardId::LoveRight), Some(p(428.0, 2100.0)));
        assert!(l.iter().all(|(_, pt)| pt.x == 40.0 || pt.x == 428.0));
    }

    #[test]
    fn narrow_mode_stacks_with_fixed_allowances() {
        let l = compute_layout(420.0, 340.0, 28.0, 40.0);
        assert_eq!(l.mode(), LayoutMode::Narrow);
        assert_eq!(l.get(CardId::TitleContact), Some(p(40.0, 100.0)));
        assert_eq!(l.get(CardId::Experience), Some(p(40.0, 600.0)));
        assert_eq!(l.get(CardId::LoveCenter), Some(p(40.0, 1280.0)));
        assert_eq!(l.get(CardId::Skills), Some(p(40.0, 1660.0)));
        assert_eq!(l.get(CardId::Projects), Some(p(40.0, 3520.0)));
    }

    #[test]
    fn every_mode_places_each_card_exactly_once() {
        for mode in LayoutMode::ALL {
            let l = compute_layout_for_mode(mode, 400.0, 28.0, 40.0);
            assert_eq!(l.len(), CardId::PLACED.len(), "{mode}");
            for id in CardId::PLACED {
                assert!(l.get(id).is_some(), "{mode} missing {id}");
            }
        }
    }

    #[test]
    fn nav_card_is_never_laid_out() {
        for mode in LayoutMode::ALL {
            assert_eq!(compute_layout_for_mode(mode, 400.0, 28.0, 40.0).get(CardId::Nav), None);
        }
    }

    #[test]
    fn columns_are_vertically_increasing_in_wide_mode() {
        let l = compute_layout_for_mode(LayoutMode::Wide, 432.0, 28.0, 40.0);
        for col in 0..3 {
            let x = column_x(col, 432.0, 28.0, 40.0);
            let ys: Vec<f64> = WIDE_SLOTS
                .iter()
                .filter(|(_, c, _)| *c == col)
                .filter_map(|(id, _, _)| l.get(*id))
                .inspect(|pt| assert_eq!(pt.x, x))
                .map(|pt| pt.y)
                .collect();
            assert!(ys.windows(2).all(|w| w[0] < w[1]), "column {col}: {ys:?}");
        }
    }

    #[test]
    fn render_order_differs_between_narrow_and_positioned() {
        assert_eq!(render_order(LayoutMode::Narrow)[1], CardId::Experience);
        assert_eq!(render_order(LayoutMode::Wide)[1], CardId::Skills);
        assert_eq!(render_order(LayoutMode::Medium), render_order(LayoutMode::Wide));
        for mode in LayoutMode::ALL {
            let mut sorted = render_order(mode).to_vec();
            sorted.sort();
            let mut placed = CardId::PLACED.to_vec();
            placed.sort();
            assert_eq!(sorted, placed);
        }
    }

    #[test]
    fn fun_fact_notes_follow_cards() {
        let l = compute_layout(1440.0, 432.0, 28.0, 40.0);
        let notes = l.fun_fact_notes();
        assert_eq!(notes.len(), 8);
        let skills = notes.iter().find(|n| n.card == CardId::Skills).unwrap();
        assert_eq!(skills.position, p(970.0, 114.0));
        assert_eq!(skills.width, 408.0);
    }

    #[test]
    fn fun_fact_width_has_floor_and_narrow_has_none() {
        let l = compute_layout_for_mode(LayoutMode::Medium, 250.0, 28.0, 40.0);
        assert!(l.fun_fact_notes().iter().all(|n| n.width == 240.0));
        let narrow = compute_layout(420.0, 340.0, 28.0, 40.0);
        assert!(narrow.fun_fact_notes().is_empty());
    }
}
