#![forbid(unsafe_code)]

//! Responsive card placement for the notedesk.
//!
//! The layout engine is a pure function of viewport geometry: it classifies
//! the viewport into a [`LayoutMode`], sizes columns with [`ColumnMetrics`],
//! and returns a [`DeskLayout`] holding one initial position per card.
//! Positions after that point belong to the cards themselves (see
//! `notedesk-runtime`); nothing here observes drags.

pub mod card;
pub mod layout;
pub mod metrics;
pub mod mode;

pub use card::{CardId, Tab, UnknownIdentifier};
pub use layout::{
    DeskLayout, FunFactNote, compute_layout, compute_layout_for_mode, compute_layout_with_metrics,
    render_order,
};
pub use metrics::{ColumnMetrics, LayoutConfig};
pub use mode::{LayoutMode, MEDIUM_MIN_WIDTH, Responsive, WIDE_MIN_WIDTH};
