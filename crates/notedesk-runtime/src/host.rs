#![forbid(unsafe_code)]

//! Host seam: what the desk asks of the embedding environment, and what it
//! tells the environment to do.
//!
//! Measurements flow in through [`DeskHost`] (read-only queries answered from
//! the live DOM or a pushed snapshot). Effects flow out as [`HostCommand`]
//! values the host applies in order. The desk never mutates host state
//! directly.

use notedesk_core::event::InputSource;
use notedesk_core::geometry::{Point, Rect};
use notedesk_layout::{CardId, FunFactNote, LayoutMode, Tab};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which element a scroll targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Scroller {
    /// The designated desk container (`.notebook`).
    Container,
    /// The window / viewport.
    Window,
}

impl Scroller {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Window => "window",
        }
    }
}

/// Live measurements of the scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContainerMetrics {
    /// Bounding rect relative to the viewport.
    pub rect: Rect,
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ContainerMetrics {
    /// Whether the container's content overflows its visible height.
    #[must_use]
    pub fn overflows(&self) -> bool {
        self.scroll_height > self.client_height
    }
}

/// Read-only measurement queries answered by the host.
pub trait DeskHost {
    /// Bounding rect of a rendered card, relative to the viewport.
    /// `None` if the card is not currently rendered.
    fn card_rect(&self, card: CardId) -> Option<Rect>;

    /// The desk container, if rendered.
    fn container(&self) -> Option<ContainerMetrics>;

    /// Current `window.scrollY`.
    fn window_scroll_y(&self) -> f64;

    /// Height of the navigation card, if rendered.
    fn nav_height(&self) -> Option<f64> {
        self.card_rect(CardId::Nav).map(|r| r.height)
    }

    /// Current offset of a scroller.
    fn scroll_top(&self, scroller: Scroller) -> f64 {
        match scroller {
            Scroller::Window => self.window_scroll_y(),
            Scroller::Container => self.container().map_or(0.0, |c| c.scroll_top),
        }
    }

    /// Rects of every rendered positioned card (the nav card excluded).
    fn placed_card_rects(&self) -> Vec<(CardId, Rect)> {
        CardId::PLACED
            .iter()
            .filter_map(|&id| self.card_rect(id).map(|r| (id, r)))
            .collect()
    }
}

/// An effect the host must apply.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum HostCommand {
    /// Recreate every card with a fresh key at its layout position.
    RebuildCards {
        mode: LayoutMode,
        column_width: f64,
        generation: u64,
    },
    /// Replace the fun-fact notes behind the cards. Empty clears them.
    PlaceFunFacts { notes: Vec<FunFactNote> },
    /// Move a card (`left`/`top`).
    SetPosition { card: CardId, position: Point },
    /// Raise a card (`z-index`).
    SetZIndex { card: CardId, z: u32 },
    /// Set the `--lift-rot` tilt in degrees.
    SetLiftRotation { card: CardId, degrees: f64 },
    /// Toggle the `is-dragging` class.
    SetDragging { card: CardId, dragging: bool },
    /// Toggle `document.body.style.userSelect`.
    SetUserSelect { enabled: bool },
    /// Attach document-level move/up listeners for one drag session.
    SubscribeDocument {
        card: CardId,
        pointer_id: u32,
        source: InputSource,
    },
    /// Detach the listeners attached by the matching `SubscribeDocument`.
    UnsubscribeDocument {
        card: CardId,
        pointer_id: u32,
        source: InputSource,
    },
    /// Call `preventDefault()` on the move event being handled.
    PreventDefault { pointer_id: u32 },
    /// Layout changed after a drag release (`cards:layout`).
    LayoutChanged,
    /// Start a smooth (or instant) scroll.
    ScrollTo {
        scroller: Scroller,
        top: f64,
        smooth: bool,
    },
    /// Remove the `wiggle` class, force a reflow, and add it back.
    RestartWiggle { card: CardId },
    /// Resize the container spacer.
    SetContainerHeight { height: f64 },
    /// Menu mount/visibility flags.
    SetMenu { mounted: bool, open: bool },
    /// Lock or unlock body scrolling (`overflow: hidden`).
    LockBodyScroll { locked: bool },
    /// Show or hide the drag hint dialog.
    SetHintVisible { visible: bool },
    /// Highlight the active navigation tab.
    SetActiveTab { tab: Tab },
}

#[cfg(test)]
pub(crate) mod test_host {
    //! In-memory host used by unit tests.

    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Clone, Default)]
    pub struct MockHost {
        pub cards: HashMap<CardId, Rect>,
        pub container: Option<ContainerMetrics>,
        pub window_scroll_y: f64,
    }

    impl MockHost {
        pub fn with_card(mut self, id: CardId, rect: Rect) -> Self {
            self.cards.insert(id, rect);
            self
        }

        pub fn with_container(mut self, container: ContainerMetrics) -> Self {
            self.container = Some(container);
            self
        }
    }

    impl DeskHost for MockHost {
        fn card_rect(&self, card: CardId) -> Option<Rect> {
            self.cards.get(&card).copied()
        }

        fn container(&self) -> Option<ContainerMetrics> {
            self.container
        }

        fn window_scroll_y(&self) -> f64 {
            self.window_scroll_y
        }
    }
}
