#![forbid(unsafe_code)]

//! Free-form card dragging with grid snap on release.
//!
//! A [`DraggableCard`] owns its position. Pick-up records where the pointer
//! went down and where the card was; every move places the card at
//! `pointer - origin + offset`; release snaps each axis to the grid. The
//! card asks the host for document-level listeners only for the lifetime of
//! one session, and every dispatch returns a [`DragLogEntry`] so hosts can
//! trace stale or mismatched pointer traffic without guessing.
//!
//! Only one session exists per card. A second pick-up while a session is
//! live is ignored, which also collapses the `pointerdown` + `touchstart`
//! pair that touch browsers fire for a single contact.

use notedesk_core::event::InputSource;
use notedesk_core::geometry::Point;
use notedesk_layout::CardId;
use rand::Rng;

use crate::host::HostCommand;
use crate::z_order::ZOrderCounter;

/// Default snap grid in pixels.
pub const DEFAULT_GRID_SIZE: f64 = 26.0;
/// Maximum magnitude of the picked-up tilt, in degrees.
pub const DEFAULT_LIFT_ROTATION: f64 = 2.0;

/// Whether a card reacts to pointer input at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    Draggable,
    /// Static card: no listeners, no state changes.
    Fixed,
}

/// State captured at pick-up; lives until release or teardown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub pointer_id: u32,
    pub source: InputSource,
    /// Pointer position at pick-up.
    pub origin: Point,
    /// Card position at pick-up.
    pub offset: Point,
}

impl DragSession {
    /// Card position for a pointer at `current`.
    #[must_use]
    pub fn position_for(&self, current: Point) -> Point {
        current - self.origin + self.offset
    }
}

/// Lifecycle phase recorded for one drag dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    PointerDown,
    PointerMove,
    PointerUp,
    Cancel,
}

impl DragPhase {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PointerDown => "pointer_down",
            Self::PointerMove => "pointer_move",
            Self::PointerUp => "pointer_up",
            Self::Cancel => "cancel",
        }
    }
}

/// Why an incoming drag signal was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragIgnoredReason {
    NotDraggable,
    SessionAlreadyActive,
    NoActiveSession,
    PointerMismatch,
    NonFinitePosition,
}

impl DragIgnoredReason {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotDraggable => "not_draggable",
            Self::SessionAlreadyActive => "session_already_active",
            Self::NoActiveSession => "no_active_session",
            Self::PointerMismatch => "pointer_mismatch",
            Self::NonFinitePosition => "non_finite_position",
        }
    }
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Started,
    Moved,
    Released,
    Cancelled,
    Ignored(DragIgnoredReason),
}

impl DragOutcome {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Moved => "moved",
            Self::Released => "released",
            Self::Cancelled => "cancelled",
            Self::Ignored(_) => "ignored",
        }
    }

    #[must_use]
    pub const fn is_ignored(self) -> bool {
        matches!(self, Self::Ignored(_))
    }
}

/// Structured record for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragLogEntry {
    pub phase: DragPhase,
    pub card: CardId,
    pub pointer_id: Option<u32>,
    pub source: Option<InputSource>,
    pub position: Option<Point>,
    pub outcome: DragOutcome,
}

/// Result of one pointer lifecycle dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct DragDispatch {
    pub commands: Vec<HostCommand>,
    /// The card came to rest somewhere new; height consumers should re-measure.
    pub layout_changed: bool,
    pub log: DragLogEntry,
}

impl DragDispatch {
    fn ignored(
        phase: DragPhase,
        card: CardId,
        reason: DragIgnoredReason,
        pointer_id: Option<u32>,
        position: Option<Point>,
    ) -> Self {
        Self {
            commands: Vec::new(),
            layout_changed: false,
            log: DragLogEntry {
                phase,
                card,
                pointer_id,
                source: None,
                position,
                outcome: DragOutcome::Ignored(reason),
            },
        }
    }

    /// Whether the dispatch changed card state.
    #[must_use]
    pub const fn accepted(&self) -> bool {
        !self.log.outcome.is_ignored()
    }
}

/// One positioned card on the desk.
#[derive(Debug, Clone, PartialEq)]
pub struct DraggableCard {
    id: CardId,
    position: Point,
    width: f64,
    mode: DragMode,
    grid_size: f64,
    lift_rotation: f64,
    z_index: Option<u32>,
    tilt: Option<f64>,
    session: Option<DragSession>,
}

impl DraggableCard {
    /// Create a card resting at `initial`.
    #[must_use]
    pub fn new(id: CardId, initial: Point, width: f64, mode: DragMode, grid_size: f64) -> Self {
        Self {
            id,
            position: initial,
            width,
            mode,
            grid_size,
            lift_rotation: DEFAULT_LIFT_ROTATION,
            z_index: None,
            tilt: None,
            session: None,
        }
    }

    /// Override the maximum picked-up tilt magnitude.
    #[must_use]
    pub fn with_lift_rotation(mut self, degrees: f64) -> Self {
        self.lift_rotation = degrees.abs();
        self
    }

    #[must_use]
    pub const fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub const fn mode(&self) -> DragMode {
        self.mode
    }

    #[must_use]
    pub const fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Z-index from the latest pick-up, `None` if never lifted.
    #[must_use]
    pub const fn z_index(&self) -> Option<u32> {
        self.z_index
    }

    /// Tilt from the latest pick-up, in degrees.
    #[must_use]
    pub const fn tilt(&self) -> Option<f64> {
        self.tilt
    }

    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Pick the card up.
    pub fn pointer_down<R: Rng>(
        &mut self,
        pointer_id: u32,
        source: InputSource,
        position: Point,
        z_order: &mut ZOrderCounter,
        rng: &mut R,
    ) -> DragDispatch {
        let phase = DragPhase::PointerDown;
        if self.mode == DragMode::Fixed {
            return DragDispatch::ignored(
                phase,
                self.id,
                DragIgnoredReason::NotDraggable,
                Some(pointer_id),
                Some(position),
            );
        }
        if self.session.is_some() {
            return DragDispatch::ignored(
                phase,
                self.id,
                DragIgnoredReason::SessionAlreadyActive,
                Some(pointer_id),
                Some(position),
            );
        }
        if !position.is_finite() {
            return DragDispatch::ignored(
                phase,
                self.id,
                DragIgnoredReason::NonFinitePosition,
                Some(pointer_id),
                None,
            );
        }

        self.session = Some(DragSession {
            pointer_id,
            source,
            origin: position,
            offset: self.position,
        });
        let z = z_order.raise();
        let tilt = lift_tilt(rng, self.lift_rotation);
        self.z_index = Some(z);
        self.tilt = Some(tilt);

        tracing::debug!(
            card = %self.id,
            pointer_id,
            source = source.label(),
            z,
            x = self.position.x,
            y = self.position.y,
            "card picked up"
        );

        DragDispatch {
            commands: vec![
                HostCommand::SetDragging {
                    card: self.id,
                    dragging: true,
                },
                HostCommand::SetUserSelect { enabled: false },
                HostCommand::SetZIndex { card: self.id, z },
                HostCommand::SetLiftRotation {
                    card: self.id,
                    degrees: tilt,
                },
                HostCommand::SubscribeDocument {
                    card: self.id,
                    pointer_id,
                    source,
                },
            ],
            layout_changed: false,
            log: DragLogEntry {
                phase,
                card: self.id,
                pointer_id: Some(pointer_id),
                source: Some(source),
                position: Some(position),
                outcome: DragOutcome::Started,
            },
        }
    }

    /// Follow the pointer.
    pub fn pointer_move(&mut self, pointer_id: u32, position: Point) -> DragDispatch {
        let phase = DragPhase::PointerMove;
        let Some(session) = self.session else {
            return DragDispatch::ignored(
                phase,
                self.id,
                DragIgnoredReason::NoActiveSession,
                Some(pointer_id),
                Some(position),
            );
        };
        if session.pointer_id != pointer_id {
            return DragDispatch::ignored(
                phase,
                self.id,
                DragIgnoredReason::PointerMismatch,
                Some(pointer_id),
                Some(position),
            );
        }
        if !position.is_finite() {
            return DragDispatch::ignored(
                phase,
                self.id,
                DragIgnoredReason::NonFinitePosition,
                Some(pointer_id),
                None,
            );
        }

        self.position = session.position_for(position);
        tracing::trace!(
            card = %self.id,
            pointer_id,
            x = self.position.x,
            y = self.position.y,
            "card moved"
        );

        DragDispatch {
            commands: vec![
                HostCommand::PreventDefault { pointer_id },
                HostCommand::SetPosition {
                    card: self.id,
                    position: self.position,
                },
            ],
            layout_changed: false,
            log: DragLogEntry {
                phase,
                card: self.id,
                pointer_id: Some(pointer_id),
                source: Some(session.source),
                position: Some(position),
                outcome: DragOutcome::Moved,
            },
        }
    }

    /// Drop the card and snap it to the grid.
    pub fn pointer_up(&mut self, pointer_id: u32) -> DragDispatch {
        let phase = DragPhase::PointerUp;
        let Some(session) = self.session else {
            return DragDispatch::ignored(
                phase,
                self.id,
                DragIgnoredReason::NoActiveSession,
                Some(pointer_id),
                None,
            );
        };
        if session.pointer_id != pointer_id {
            return DragDispatch::ignored(
                phase,
                self.id,
                DragIgnoredReason::PointerMismatch,
                Some(pointer_id),
                None,
            );
        }

        self.session = None;
        self.position = self.position.snapped(self.grid_size);
        tracing::debug!(
            card = %self.id,
            pointer_id,
            x = self.position.x,
            y = self.position.y,
            "card released"
        );

        DragDispatch {
            commands: vec![
                HostCommand::SetDragging {
                    card: self.id,
                    dragging: false,
                },
                HostCommand::SetPosition {
                    card: self.id,
                    position: self.position,
                },
                HostCommand::SetUserSelect { enabled: true },
                HostCommand::UnsubscribeDocument {
                    card: self.id,
                    pointer_id,
                    source: session.source,
                },
                HostCommand::LayoutChanged,
            ],
            layout_changed: true,
            log: DragLogEntry {
                phase,
                card: self.id,
                pointer_id: Some(pointer_id),
                source: Some(session.source),
                position: Some(self.position),
                outcome: DragOutcome::Released,
            },
        }
    }

    /// Tear down a live session without snapping (unmount, rebuild).
    pub fn cancel(&mut self) -> DragDispatch {
        let phase = DragPhase::Cancel;
        let Some(session) = self.session.take() else {
            return DragDispatch::ignored(
                phase,
                self.id,
                DragIgnoredReason::NoActiveSession,
                None,
                None,
            );
        };
        tracing::debug!(card = %self.id, pointer_id = session.pointer_id, "drag cancelled");

        DragDispatch {
            commands: vec![
                HostCommand::SetDragging {
                    card: self.id,
                    dragging: false,
                },
                HostCommand::SetUserSelect { enabled: true },
                HostCommand::UnsubscribeDocument {
                    card: self.id,
                    pointer_id: session.pointer_id,
                    source: session.source,
                },
            ],
            layout_changed: false,
            log: DragLogEntry {
                phase,
                card: self.id,
                pointer_id: Some(session.pointer_id),
                source: Some(session.source),
                position: Some(self.position),
                outcome: DragOutcome::Cancelled,
            },
        }
    }
}

/// Uniform tilt in `[-max, max)`, kept to two decimals.
fn lift_tilt<R: Rng>(rng: &mut R, max: f64) -> f64 {
    if !(max.is_finite() && max > 0.0) {
        return 0.0;
    }
    let raw: f64 = rng.random_range(-max..max);
    (raw * 100.0).round() / 100.0
}
