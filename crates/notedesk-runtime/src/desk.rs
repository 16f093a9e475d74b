#![forbid(unsafe_code)]

//! The desk: cards, navigation and container sizing behind one host-driven API.
//!
//! [`Desk`] is the only stateful entry point a host needs. Input arrives
//! through the event methods, time and measurements through
//! [`Desk::frame`], and every effect leaves through [`Desk::take_commands`]
//! in the order it must be applied.
//!
//! # Frame order
//!
//! 1. Menu timers (`Opening` becomes `Open`, expired `Closing` unmounts).
//! 2. The active settle poll samples the scroller once.
//! 3. Pending height triggers are flushed into one measurement.
//!
//! # Rebuilds
//!
//! Cards are keyed by column width. When a resize changes the column width
//! or the mode, every card is recreated at its new layout position and any
//! drag in progress is cancelled, so user offsets do not survive a rebuild.
//! The z-order counter does survive it.

use core::time::Duration;

use notedesk_core::event::{InputSource, KeyEvent};
use notedesk_core::geometry::Point;
use notedesk_layout::{
    CardId, ColumnMetrics, DeskLayout, LayoutMode, Tab, compute_layout_with_metrics, render_order,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::DeskConfig;
use crate::drag::{DragDispatch, DragLogEntry, DragMode, DragOutcome, DraggableCard};
use crate::height::{HeightSync, HeightTrigger};
use crate::hint::DragHint;
use crate::host::{DeskHost, HostCommand};
use crate::menu::{MenuController, MenuState};
use crate::nav::NavigationState;
use crate::scroll::{SettleOutcome, SettlePoll, SettleStep};
use crate::z_order::ZOrderCounter;

/// Viewport width assumed before the host reports one.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1440.0;
/// Tilt seed used by [`Desk::new`].
pub const DEFAULT_SEED: u64 = 0x6E6F_7465_6465_736B;

/// Host-driven desk state.
#[derive(Debug, Clone)]
pub struct Desk {
    config: DeskConfig,
    viewport_width: f64,
    metrics: ColumnMetrics,
    layout: DeskLayout,
    generation: u64,
    cards: Vec<DraggableCard>,
    z_order: ZOrderCounter,
    rng: SmallRng,
    nav: NavigationState,
    hint: DragHint,
    height: HeightSync,
    settle: Option<SettlePoll>,
    last_settle: Option<SettleOutcome>,
    now: Duration,
    mounted: bool,
    commands: Vec<HostCommand>,
    drag_log: Vec<DragLogEntry>,
}

impl Desk {
    /// Create an unmounted desk with the default tilt seed.
    #[must_use]
    pub fn new(config: DeskConfig) -> Self {
        Self::with_seed(config, DEFAULT_SEED)
    }

    /// Create an unmounted desk whose pick-up tilts come from `seed`.
    #[must_use]
    pub fn with_seed(config: DeskConfig, seed: u64) -> Self {
        let metrics = ColumnMetrics::for_viewport(DEFAULT_VIEWPORT_WIDTH, &config.layout);
        let layout = compute_layout_with_metrics(&metrics);
        Self {
            nav: NavigationState::new(MenuController::new(config.menu.exit_delay())),
            height: HeightSync::new(config.height.cushion),
            config,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            metrics,
            layout,
            generation: 0,
            cards: Vec::new(),
            z_order: ZOrderCounter::new(),
            rng: SmallRng::seed_from_u64(seed),
            hint: DragHint::new(),
            settle: None,
            last_settle: None,
            now: Duration::ZERO,
            mounted: false,
            commands: Vec::new(),
            drag_log: Vec::new(),
        }
    }

    // --- accessors -------------------------------------------------------

    #[must_use]
    pub const fn config(&self) -> &DeskConfig {
        &self.config
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub const fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    #[must_use]
    pub const fn mode(&self) -> LayoutMode {
        self.metrics.mode
    }

    #[must_use]
    pub const fn metrics(&self) -> &ColumnMetrics {
        &self.metrics
    }

    /// Initial positions for the current generation.
    #[must_use]
    pub const fn layout(&self) -> &DeskLayout {
        &self.layout
    }

    /// Bumped on every card rebuild.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Live cards in host render order.
    #[must_use]
    pub fn cards(&self) -> &[DraggableCard] {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&DraggableCard> {
        self.cards.iter().find(|c| c.id() == id)
    }

    #[must_use]
    pub const fn z_order(&self) -> &ZOrderCounter {
        &self.z_order
    }

    #[must_use]
    pub const fn active_tab(&self) -> Tab {
        self.nav.active_tab()
    }

    #[must_use]
    pub const fn menu_state(&self) -> MenuState {
        self.nav.menu().state()
    }

    #[must_use]
    pub const fn hint_visible(&self) -> bool {
        self.hint.is_visible()
    }

    /// Whether a wiggle is waiting for its scroll to settle.
    #[must_use]
    pub fn settle_pending(&self) -> bool {
        self.settle.as_ref().is_some_and(|p| !p.is_finished())
    }

    /// Outcome of the most recently finished settle poll.
    #[must_use]
    pub const fn last_settle_outcome(&self) -> Option<SettleOutcome> {
        self.last_settle
    }

    /// Latest host time seen.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Last height sent to the host.
    #[must_use]
    pub const fn container_height(&self) -> Option<f64> {
        self.height.last_height()
    }

    // --- lifecycle -------------------------------------------------------

    /// First render at `viewport_width`.
    pub fn mount(&mut self, viewport_width: f64) {
        self.viewport_width = sanitize_width(viewport_width);
        self.metrics = ColumnMetrics::for_viewport(self.viewport_width, &self.config.layout);
        self.mounted = true;
        tracing::debug!(
            width = self.viewport_width,
            mode = self.mode().label(),
            column_width = self.metrics.column_width,
            "desk mounted"
        );
        self.rebuild_cards();
        let hint = self.hint.on_mode(self.mode());
        self.commands.extend(hint);
        self.height.schedule(HeightTrigger::Mount);
    }

    /// Viewport resized.
    pub fn resize(&mut self, viewport_width: f64) {
        if !self.mounted {
            self.mount(viewport_width);
            return;
        }
        let width = sanitize_width(viewport_width);
        let previous = self.metrics;
        self.viewport_width = width;
        self.metrics = ColumnMetrics::for_viewport(width, &self.config.layout);

        if self.metrics.mode != previous.mode
            || self.metrics.column_width != previous.column_width
        {
            tracing::debug!(
                width,
                from = previous.mode.label(),
                to = self.metrics.mode.label(),
                column_width = self.metrics.column_width,
                "breakpoint rebuild"
            );
            self.cancel_drags();
            self.rebuild_cards();
        }
        if self.metrics.mode != previous.mode {
            let hint = self.hint.on_mode(self.mode());
            self.commands.extend(hint);
            if self.mode().is_positioned() {
                let now = self.now;
                let close = self.nav.menu_mut().close(now);
                self.commands.extend(close);
            }
        }
        self.height.schedule(HeightTrigger::Resize);
    }

    // --- pointer input ---------------------------------------------------

    /// `pointerdown` on a card.
    pub fn pointer_down(
        &mut self,
        card: CardId,
        pointer_id: u32,
        position: Point,
    ) -> Option<DragLogEntry> {
        self.card_down(card, pointer_id, InputSource::Pointer, position)
    }

    /// Document `pointermove`.
    pub fn pointer_move(&mut self, pointer_id: u32, position: Point) -> Option<DragLogEntry> {
        self.document_move(pointer_id, InputSource::Pointer, position)
    }

    /// Document `pointerup`.
    pub fn pointer_up(&mut self, pointer_id: u32) -> Option<DragLogEntry> {
        self.document_up(pointer_id, InputSource::Pointer)
    }

    /// `touchstart` on a card, `touch_id` being the first touch's identifier.
    pub fn touch_start(
        &mut self,
        card: CardId,
        touch_id: u32,
        position: Point,
    ) -> Option<DragLogEntry> {
        self.card_down(card, touch_id, InputSource::Touch, position)
    }

    /// Document `touchmove`.
    pub fn touch_move(&mut self, touch_id: u32, position: Point) -> Option<DragLogEntry> {
        self.document_move(touch_id, InputSource::Touch, position)
    }

    /// Document `touchend`.
    pub fn touch_end(&mut self, touch_id: u32) -> Option<DragLogEntry> {
        self.document_up(touch_id, InputSource::Touch)
    }

    /// `pointercancel` / `touchcancel`: drop the session without snapping.
    pub fn pointer_cancel(&mut self, pointer_id: u32, source: InputSource) -> Option<DragLogEntry> {
        let idx = self.session_index(pointer_id, source)?;
        let dispatch = self.cards[idx].cancel();
        Some(self.apply_dispatch(dispatch))
    }

    fn card_down(
        &mut self,
        card: CardId,
        pointer_id: u32,
        source: InputSource,
        position: Point,
    ) -> Option<DragLogEntry> {
        let idx = self.cards.iter().position(|c| c.id() == card)?;
        let dispatch = self.cards[idx].pointer_down(
            pointer_id,
            source,
            position,
            &mut self.z_order,
            &mut self.rng,
        );
        Some(self.apply_dispatch(dispatch))
    }

    fn document_move(
        &mut self,
        pointer_id: u32,
        source: InputSource,
        position: Point,
    ) -> Option<DragLogEntry> {
        let idx = self.route(pointer_id, source)?;
        let dispatch = self.cards[idx].pointer_move(pointer_id, position);
        Some(self.apply_dispatch(dispatch))
    }

    fn document_up(&mut self, pointer_id: u32, source: InputSource) -> Option<DragLogEntry> {
        let idx = self.route(pointer_id, source)?;
        let dispatch = self.cards[idx].pointer_up(pointer_id);
        Some(self.apply_dispatch(dispatch))
    }

    /// Card that should see a document event.
    ///
    /// Prefers the session that owns `pointer_id`. Otherwise a card dragged
    /// from the same input source receives it so the mismatch is logged.
    /// Without any session of that source the host has no listener attached
    /// and the event is dropped.
    fn route(&self, pointer_id: u32, source: InputSource) -> Option<usize> {
        self.session_index(pointer_id, source).or_else(|| {
            self.cards
                .iter()
                .position(|c| c.session().is_some_and(|s| s.source == source))
        })
    }

    fn session_index(&self, pointer_id: u32, source: InputSource) -> Option<usize> {
        self.cards.iter().position(|c| {
            c.session()
                .is_some_and(|s| s.pointer_id == pointer_id && s.source == source)
        })
    }

    fn apply_dispatch(&mut self, dispatch: DragDispatch) -> DragLogEntry {
        if let DragOutcome::Ignored(reason) = dispatch.log.outcome {
            tracing::trace!(
                card = %dispatch.log.card,
                phase = dispatch.log.phase.label(),
                reason = reason.label(),
                "drag dispatch ignored"
            );
        }
        if dispatch.layout_changed {
            self.height.schedule(HeightTrigger::LayoutChanged);
        }
        self.commands.extend(dispatch.commands);
        self.drag_log.push(dispatch.log);
        dispatch.log
    }

    fn cancel_drags(&mut self) {
        let mut dispatches = Vec::new();
        for card in &mut self.cards {
            if card.is_dragging() {
                dispatches.push(card.cancel());
            }
        }
        for dispatch in dispatches {
            self.apply_dispatch(dispatch);
        }
    }

    fn rebuild_cards(&mut self) {
        self.layout = compute_layout_with_metrics(&self.metrics);
        self.generation = self.generation.wrapping_add(1);
        let mode = if self.metrics.mode.is_positioned() {
            DragMode::Draggable
        } else {
            DragMode::Fixed
        };
        let drag = &self.config.drag;
        self.cards = render_order(self.metrics.mode)
            .iter()
            .filter_map(|&id| {
                self.layout.get(id).map(|p| {
                    DraggableCard::new(id, p, self.metrics.column_width, mode, drag.grid_size)
                        .with_lift_rotation(drag.lift_rotation)
                })
            })
            .collect();

        self.commands.push(HostCommand::RebuildCards {
            mode: self.metrics.mode,
            column_width: self.metrics.column_width,
            generation: self.generation,
        });
        self.commands.extend(self.cards.iter().map(|c| HostCommand::SetPosition {
            card: c.id(),
            position: c.position(),
        }));
        self.commands.push(HostCommand::PlaceFunFacts {
            notes: self.layout.fun_fact_notes(),
        });
    }

    // --- keyboard and navigation -----------------------------------------

    /// Document `keydown`. Escape dismisses the hint and closes the menu.
    pub fn key(&mut self, key: KeyEvent) {
        if !key.is_escape() {
            return;
        }
        let hint = self.hint.dismiss();
        self.commands.extend(hint);
        let now = self.now;
        let close = self.nav.menu_mut().close(now);
        self.commands.extend(close);
    }

    /// Nav item clicked.
    ///
    /// Any wiggle still waiting on an earlier scroll is cancelled first.
    pub fn select_tab<H: DeskHost + ?Sized>(&mut self, tab: Tab, host: &H) {
        if let Some(mut previous) = self.settle.take() {
            if !previous.is_finished() {
                self.last_settle = Some(previous.cancel());
            }
        }
        let selection = self
            .nav
            .select_tab(tab, self.mode(), self.now, host, &self.config.scroll);
        self.commands.extend(selection.commands);
        if selection.wiggle {
            if let Some(request) = selection.request {
                self.settle = Some(SettlePoll::new(&request, &self.config.scroll, self.now));
            }
        }
    }

    /// Hamburger button. Narrow viewports only.
    pub fn toggle_menu(&mut self) {
        if self.mode().is_positioned() {
            return;
        }
        let now = self.now;
        let cmd = self.nav.menu_mut().toggle(now);
        self.commands.extend(cmd);
    }

    /// Narrow viewports only.
    pub fn open_menu(&mut self) {
        if self.mode().is_positioned() {
            return;
        }
        let cmd = self.nav.menu_mut().open();
        self.commands.extend(cmd);
    }

    /// Close button or overlay click.
    pub fn close_menu(&mut self) {
        let now = self.now;
        let cmd = self.nav.menu_mut().close(now);
        self.commands.extend(cmd);
    }

    /// Drag hint's dismiss button.
    pub fn dismiss_hint(&mut self) {
        let cmds = self.hint.dismiss();
        self.commands.extend(cmds);
    }

    // --- frame -----------------------------------------------------------

    /// Move the desk clock forward without running a frame.
    ///
    /// Hosts that batch input call this first so menu timers started by
    /// that input count from the event's time. Going backwards is ignored.
    pub fn set_time(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    /// One host animation frame at monotonic time `now`.
    pub fn frame<H: DeskHost + ?Sized>(&mut self, now: Duration, host: &H) {
        self.set_time(now);
        let now = self.now;

        let menu = self.nav.menu_mut().tick(now);
        self.commands.extend(menu);

        if let Some(poll) = self.settle.as_mut() {
            if let SettleStep::Done { outcome, command } = poll.poll(now, host) {
                self.commands.extend(command);
                self.last_settle = Some(outcome);
                self.settle = None;
            }
        }

        let height = self.height.flush(self.mode(), host);
        self.commands.extend(height);
    }

    /// Drain queued host commands.
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Drain drag dispatch records.
    pub fn take_drag_log(&mut self) -> Vec<DragLogEntry> {
        std::mem::take(&mut self.drag_log)
    }
}

fn sanitize_width(width: f64) -> f64 {
    if width.is_finite() && width >= 0.0 {
        width
    } else {
        0.0
    }
}
