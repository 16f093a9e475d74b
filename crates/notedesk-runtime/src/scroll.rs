#![forbid(unsafe_code)]

//! Scroll a card into view, optionally wiggling it once the scroll settles.
//!
//! Targets are computed from the card's *rendered* rect, so a card that was
//! dragged somewhere else is found where it is now, not where the layout
//! first put it. Smooth scrolling is the host's job; the desk only learns
//! whether it arrived by sampling the scroller offset once per frame through
//! a [`SettlePoll`].
//!
//! # Settle bounds
//!
//! A smooth scroll that the user interrupts, or one whose target lies past
//! the end of the document, never gets within tolerance. The poll therefore
//! gives up after `max_frames` samples or `max_elapsed` host time, whichever
//! comes first, and reports why.

use core::time::Duration;

use notedesk_layout::{CardId, LayoutMode, Responsive};

use crate::host::{DeskHost, HostCommand, Scroller};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How far above a card the scroll should stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollOffset {
    /// Clear the fixed navigation card plus `extra` pixels.
    BelowNav { extra: f64 },
    /// A constant number of pixels.
    Fixed(f64),
}

impl ScrollOffset {
    /// Resolve to pixels against the current host measurements.
    #[must_use]
    pub fn resolve<H: DeskHost + ?Sized>(self, host: &H) -> f64 {
        match self {
            Self::BelowNav { extra } => host.nav_height().unwrap_or(0.0) + extra,
            Self::Fixed(px) => px,
        }
    }
}

/// Scroll-navigation tunables.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollConfig {
    /// Extra clearance below the nav card on narrow viewports.
    pub nav_extra: f64,
    /// Fixed top offset on medium and wide viewports.
    pub positioned_offset: f64,
    /// Offset distance considered "arrived".
    pub settle_tolerance: f64,
    /// Most frames one settle poll may sample.
    pub settle_max_frames: u32,
    /// Most host time one settle poll may run, in milliseconds.
    pub settle_max_elapsed_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            nav_extra: 16.0,
            positioned_offset: 80.0,
            settle_tolerance: 2.0,
            settle_max_frames: 240,
            settle_max_elapsed_ms: 4_000,
        }
    }
}

impl ScrollConfig {
    /// Per-mode top offsets.
    #[must_use]
    pub fn offsets(&self) -> Responsive<ScrollOffset> {
        Responsive::new(ScrollOffset::BelowNav {
            extra: self.nav_extra,
        })
        .at(LayoutMode::Medium, ScrollOffset::Fixed(self.positioned_offset))
    }

    #[must_use]
    pub const fn settle_max_elapsed(&self) -> Duration {
        Duration::from_millis(self.settle_max_elapsed_ms)
    }

    /// Range violations, empty when valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.nav_extra.is_finite() {
            errors.push(format!("scroll.nav_extra must be finite, got {}", self.nav_extra));
        }
        if !self.positioned_offset.is_finite() {
            errors.push(format!(
                "scroll.positioned_offset must be finite, got {}",
                self.positioned_offset
            ));
        }
        if !self.settle_tolerance.is_finite() || self.settle_tolerance <= 0.0 {
            errors.push(format!(
                "scroll.settle_tolerance must be > 0, got {}",
                self.settle_tolerance
            ));
        }
        if self.settle_max_frames == 0 {
            errors.push("scroll.settle_max_frames must be > 0".to_string());
        }
        if self.settle_max_elapsed_ms == 0 {
            errors.push("scroll.settle_max_elapsed_ms must be > 0".to_string());
        }
        errors
    }
}

/// A resolved scroll: where to go and on which element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub card: CardId,
    pub scroller: Scroller,
    pub top: f64,
    /// Offset that was subtracted from the card's top.
    pub offset: f64,
}

impl ScrollRequest {
    /// Host command starting a smooth scroll.
    #[must_use]
    pub const fn command(&self) -> HostCommand {
        HostCommand::ScrollTo {
            scroller: self.scroller,
            top: self.top,
            smooth: true,
        }
    }
}

/// Resolve the scroll that brings `card` into view.
///
/// Returns `None` when the card is not rendered. The container scrolls when
/// its content overflows; otherwise the window does. Window targets are not
/// clamped, container targets never go below zero.
#[must_use]
pub fn scroll_to_card<H: DeskHost + ?Sized>(
    card: CardId,
    mode: LayoutMode,
    host: &H,
    config: &ScrollConfig,
) -> Option<ScrollRequest> {
    let rect = host.card_rect(card)?;
    let offset = config.offsets().resolve(mode).resolve(host);

    let request = match host.container().filter(|c| c.overflows()) {
        Some(container) => ScrollRequest {
            card,
            scroller: Scroller::Container,
            top: (rect.top() - container.rect.top() + container.scroll_top - offset).max(0.0),
            offset,
        },
        None => ScrollRequest {
            card,
            scroller: Scroller::Window,
            top: rect.top() + host.window_scroll_y() - offset,
            offset,
        },
    };

    tracing::debug!(
        card = %card,
        mode = mode.label(),
        scroller = request.scroller.label(),
        target = request.top,
        offset,
        "scroll to card"
    );
    Some(request)
}

/// Why a settle poll stopped without converging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleGiveUp {
    Timeout,
    FrameLimit,
    CardUnmounted,
    /// Superseded by a newer navigation or torn down.
    Cancelled,
}

impl SettleGiveUp {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::FrameLimit => "frame_limit",
            Self::CardUnmounted => "card_unmounted",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Terminal result of a settle poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Arrived within tolerance after `frames` samples.
    Converged { frames: u32 },
    GaveUp(SettleGiveUp),
}

/// Per-frame poll status.
#[derive(Debug, Clone, PartialEq)]
pub enum SettleStep {
    Pending,
    /// Terminal. `command` is the wiggle restart on convergence.
    Done {
        outcome: SettleOutcome,
        command: Option<HostCommand>,
    },
}

/// Waits for a smooth scroll to arrive, then restarts the card's wiggle.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlePoll {
    card: CardId,
    scroller: Scroller,
    target: f64,
    tolerance: f64,
    max_frames: u32,
    max_elapsed: Duration,
    started: Duration,
    frames: u32,
    outcome: Option<SettleOutcome>,
}

impl SettlePoll {
    /// Start polling for `request`, with `started` as the current host time.
    #[must_use]
    pub fn new(request: &ScrollRequest, config: &ScrollConfig, started: Duration) -> Self {
        Self {
            card: request.card,
            scroller: request.scroller,
            target: request.top,
            tolerance: config.settle_tolerance,
            max_frames: config.settle_max_frames,
            max_elapsed: config.settle_max_elapsed(),
            started,
            frames: 0,
            outcome: None,
        }
    }

    #[must_use]
    pub const fn card(&self) -> CardId {
        self.card
    }

    #[must_use]
    pub const fn target(&self) -> f64 {
        self.target
    }

    /// Frames sampled so far.
    #[must_use]
    pub const fn frames(&self) -> u32 {
        self.frames
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<SettleOutcome> {
        self.outcome
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Sample the scroller once. Call once per host frame.
    pub fn poll<H: DeskHost + ?Sized>(&mut self, now: Duration, host: &H) -> SettleStep {
        if let Some(outcome) = self.outcome {
            return SettleStep::Done {
                outcome,
                command: None,
            };
        }
        self.frames = self.frames.saturating_add(1);

        if host.card_rect(self.card).is_none() {
            return self.give_up(SettleGiveUp::CardUnmounted);
        }
        let offset = host.scroll_top(self.scroller);
        if (offset - self.target).abs() < self.tolerance {
            let outcome = SettleOutcome::Converged {
                frames: self.frames,
            };
            self.outcome = Some(outcome);
            tracing::debug!(card = %self.card, frames = self.frames, "scroll settled");
            return SettleStep::Done {
                outcome,
                command: Some(HostCommand::RestartWiggle { card: self.card }),
            };
        }
        if self.frames >= self.max_frames {
            return self.give_up(SettleGiveUp::FrameLimit);
        }
        if now.saturating_sub(self.started) >= self.max_elapsed {
            return self.give_up(SettleGiveUp::Timeout);
        }
        SettleStep::Pending
    }

    /// Stop polling. No-op once finished.
    pub fn cancel(&mut self) -> SettleOutcome {
        match self.outcome {
            Some(outcome) => outcome,
            None => {
                let reason = SettleGiveUp::Cancelled;
                self.outcome = Some(SettleOutcome::GaveUp(reason));
                tracing::debug!(card = %self.card, frames = self.frames, "scroll settle cancelled");
                SettleOutcome::GaveUp(reason)
            }
        }
    }

    fn give_up(&mut self, reason: SettleGiveUp) -> SettleStep {
        let outcome = SettleOutcome::GaveUp(reason);
        self.outcome = Some(outcome);
        tracing::warn!(
            card = %self.card,
            reason = reason.label(),
            frames = self.frames,
            target = self.target,
            "scroll never settled"
        );
        SettleStep::Done {
            outcome,
            command: None,
        }
    }
}
