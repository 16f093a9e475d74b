#![forbid(unsafe_code)]

//! Container height synchronization.
//!
//! Positioned cards are absolutely placed, so the container does not grow
//! with them. After every change that can move a card's bottom edge the desk
//! measures the rendered cards and sizes the container to fit the lowest one
//! plus a cushion. Narrow viewports flow cards in the document and skip this.
//!
//! Triggers are coalesced: any number of them between two host frames
//! results in one measurement on the next frame, after the host has applied
//! the position commands that caused them.

use notedesk_layout::LayoutMode;

use crate::host::{DeskHost, HostCommand};

/// Space kept below the lowest card.
pub const DEFAULT_HEIGHT_CUSHION: f64 = 24.0;

/// What asked for a recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightTrigger {
    Mount,
    Resize,
    LayoutChanged,
}

impl HeightTrigger {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::Resize => "resize",
            Self::LayoutChanged => "layout_changed",
        }
    }
}

/// Height that fits every card bottom, in document coordinates.
///
/// `ceil(max(0, max_bottom - container_top) + cushion)`, where `max_bottom`
/// starts at zero.
#[must_use]
pub fn required_height(
    container_top: f64,
    bottoms: impl IntoIterator<Item = f64>,
    cushion: f64,
) -> f64 {
    let max_bottom = bottoms.into_iter().fold(0.0_f64, f64::max);
    ((max_bottom - container_top).max(0.0) + cushion).ceil()
}

/// Tracks pending triggers and the last height sent to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightSync {
    cushion: f64,
    pending: Option<HeightTrigger>,
    coalesced: u32,
    last: Option<f64>,
}

impl Default for HeightSync {
    fn default() -> Self {
        Self::new(DEFAULT_HEIGHT_CUSHION)
    }
}

impl HeightSync {
    #[must_use]
    pub const fn new(cushion: f64) -> Self {
        Self {
            cushion,
            pending: None,
            coalesced: 0,
            last: None,
        }
    }

    /// Request a recompute on the next flush.
    pub fn schedule(&mut self, trigger: HeightTrigger) {
        if self.pending.is_some() {
            self.coalesced = self.coalesced.saturating_add(1);
        }
        self.pending = Some(trigger);
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Last height emitted.
    #[must_use]
    pub const fn last_height(&self) -> Option<f64> {
        self.last
    }

    /// Run a scheduled recompute, if any.
    pub fn flush<H: DeskHost + ?Sized>(
        &mut self,
        mode: LayoutMode,
        host: &H,
    ) -> Option<HostCommand> {
        let trigger = self.pending.take()?;
        let coalesced = std::mem::take(&mut self.coalesced);
        tracing::trace!(trigger = trigger.label(), coalesced, "height flush");
        self.recompute(mode, host)
    }

    /// Measure now. Emits a command only when the height changed.
    pub fn recompute<H: DeskHost + ?Sized>(
        &mut self,
        mode: LayoutMode,
        host: &H,
    ) -> Option<HostCommand> {
        if !mode.is_positioned() {
            return None;
        }
        let container = host.container()?;
        let scroll_y = host.window_scroll_y();
        let top = container.rect.top() + scroll_y;
        let height = required_height(
            top,
            host.placed_card_rects()
                .into_iter()
                .map(|(_, rect)| rect.bottom() + scroll_y),
            self.cushion,
        );
        if self.last == Some(height) {
            return None;
        }
        tracing::debug!(mode = mode.label(), height, "container height");
        self.last = Some(height);
        Some(HostCommand::SetContainerHeight { height })
    }
}
