#![forbid(unsafe_code)]

//! Platform-independent core of the browser runner.
//!
//! [`RunnerCore`] owns a [`Desk`], a deterministic clock, the last pushed
//! [`HostSnapshot`] and a queue of decoded inputs. The JS glue drives it with
//! a fixed rhythm per animation frame:
//!
//! 1. push measurements (`set_snapshot_json`) and queued DOM events
//!    (`push_encoded_input`),
//! 2. set the clock from the rAF timestamp (`set_time_ms`),
//! 3. `step()`,
//! 4. apply `take_commands_json()` and forward `take_logs()` to the console.
//!
//! The host applies commands only after `step()` returns, so a snapshot
//! reflects them no earlier than the next step. Each step therefore runs the
//! desk frame (menu timers, settle polling, height measurement) before it
//! applies that step's inputs: work scheduled by input in step `n` is
//! measured in step `n + 1`. The desk itself mounts lazily on the first
//! step for the same reason.
//!
//! Everything here compiles natively so the wasm surface is tested without a
//! browser.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};

use notedesk_core::clock::{Clock, DeterministicClock, duration_from_ms};
use notedesk_core::event::InputSource;
use notedesk_runtime::{ConfigError, Desk, DeskConfig, DragLogEntry, DragOutcome, HostCommand};

use crate::input_parser::{DeskInput, MenuAction, PointerPhase, parse_encoded_input};
use crate::snapshot::HostSnapshot;

/// Summary of one [`RunnerCore::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Inputs drained from the queue.
    pub inputs_processed: u32,
    /// Host commands produced during this step.
    pub commands: usize,
    /// A navigation is still waiting for its scroll to settle.
    pub settle_pending: bool,
    pub frame_idx: u64,
}

/// Host-driven desk runner shared by the wasm bindings and native tests.
pub struct RunnerCore {
    desk: Desk,
    clock: DeterministicClock,
    snapshot: HostSnapshot,
    pending: VecDeque<DeskInput>,
    commands: Vec<HostCommand>,
    logs: Vec<String>,
    viewport_width: f64,
    frame_idx: u64,
}

impl RunnerCore {
    /// Default desk that mounts at `viewport_width` on the first step,
    /// seeding the tilt RNG.
    #[must_use]
    pub fn new(viewport_width: f64, seed: u64) -> Self {
        Self::with_config(DeskConfig::default(), viewport_width, seed)
    }

    /// Desk with an explicit configuration.
    #[must_use]
    pub fn with_config(config: DeskConfig, viewport_width: f64, seed: u64) -> Self {
        Self {
            desk: Desk::with_seed(config, seed),
            clock: DeterministicClock::new(),
            snapshot: HostSnapshot::default(),
            pending: VecDeque::new(),
            commands: Vec::new(),
            logs: Vec::new(),
            viewport_width,
            frame_idx: 0,
        }
    }

    /// Desk from a JSON configuration, rejecting out-of-range values.
    pub fn from_config_json(
        json: &str,
        viewport_width: f64,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let config = DeskConfig::from_json_str(json)?.validated()?;
        Ok(Self::with_config(config, viewport_width, seed))
    }

    #[must_use]
    pub const fn desk(&self) -> &Desk {
        &self.desk
    }

    #[must_use]
    pub const fn snapshot(&self) -> &HostSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub const fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    #[must_use]
    pub fn pending_inputs(&self) -> usize {
        self.pending.len()
    }

    // --- time ------------------------------------------------------------

    /// Advance the clock by `dt_ms`. Non-finite and negative deltas are
    /// ignored.
    pub fn advance_time_ms(&mut self, dt_ms: f64) {
        self.clock.advance_ms(dt_ms);
    }

    /// Set the clock to an absolute rAF timestamp in milliseconds.
    ///
    /// Non-finite, negative and backwards timestamps are ignored.
    pub fn set_time_ms(&mut self, ts_ms: f64) {
        if let Some(now) = duration_from_ms(ts_ms) {
            self.clock.set(now);
        }
    }

    // --- input -----------------------------------------------------------

    /// Parse a JSON-encoded DOM event and queue it for the next step.
    ///
    /// Returns `true` if the event was queued, `false` if it was malformed or
    /// of a kind the desk ignores. Malformed input is reported in the logs.
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        match parse_encoded_input(json) {
            Ok(Some(input)) => {
                self.pending.push_back(input);
                true
            }
            Ok(None) => false,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %err, "encoded input rejected");
                self.logs.push(format!("input_parse_error: {err}"));
                false
            }
        }
    }

    /// Queue an already decoded input.
    pub fn push_input(&mut self, input: DeskInput) {
        self.pending.push_back(input);
    }

    /// Replace the host measurements used by the next step.
    ///
    /// A malformed snapshot keeps the previous one and is reported in the
    /// logs.
    pub fn set_snapshot_json(&mut self, json: &str) -> bool {
        match HostSnapshot::from_json(json) {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                true
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %err, "host snapshot rejected");
                self.logs.push(format!("snapshot_parse_error: {err}"));
                false
            }
        }
    }

    pub fn set_snapshot(&mut self, snapshot: HostSnapshot) {
        self.snapshot = snapshot;
    }

    // --- step ------------------------------------------------------------

    /// Run one desk frame against the pushed snapshot, then apply queued
    /// inputs at the current time.
    ///
    /// The first step mounts the desk after its frame, so the mount height
    /// is measured on the second step.
    pub fn step(&mut self) -> StepResult {
        let now = self.clock.now_mono();
        self.desk.frame(now, &self.snapshot);
        self.frame_idx = self.frame_idx.saturating_add(1);

        if !self.desk.is_mounted() {
            self.desk.mount(self.viewport_width);
        }
        let mut inputs_processed = 0u32;
        while let Some(input) = self.pending.pop_front() {
            self.apply(input);
            inputs_processed = inputs_processed.saturating_add(1);
        }

        for entry in self.desk.take_drag_log() {
            self.logs.push(format_drag_log_entry(&entry));
        }
        let produced = self.desk.take_commands();
        let commands = produced.len();
        self.commands.extend(produced);

        StepResult {
            inputs_processed,
            commands,
            settle_pending: self.desk.settle_pending(),
            frame_idx: self.frame_idx,
        }
    }

    fn apply(&mut self, input: DeskInput) {
        match input {
            DeskInput::Pointer {
                source,
                phase,
                pointer_id,
                card,
                position,
            } => {
                match (phase, source) {
                    (PointerPhase::Down, InputSource::Pointer) => {
                        if let Some(card) = card {
                            self.desk.pointer_down(card, pointer_id, position);
                        }
                    }
                    (PointerPhase::Down, InputSource::Touch) => {
                        if let Some(card) = card {
                            self.desk.touch_start(card, pointer_id, position);
                        }
                    }
                    (PointerPhase::Move, InputSource::Pointer) => {
                        self.desk.pointer_move(pointer_id, position);
                    }
                    (PointerPhase::Move, InputSource::Touch) => {
                        self.desk.touch_move(pointer_id, position);
                    }
                    (PointerPhase::Up, InputSource::Pointer) => {
                        self.desk.pointer_up(pointer_id);
                    }
                    (PointerPhase::Up, InputSource::Touch) => {
                        self.desk.touch_end(pointer_id);
                    }
                    (PointerPhase::Cancel, source) => {
                        self.desk.pointer_cancel(pointer_id, source);
                    }
                };
            }
            DeskInput::Key(key) => self.desk.key(key),
            DeskInput::Resize { width } => self.desk.resize(width),
            DeskInput::Tab(tab) => self.desk.select_tab(tab, &self.snapshot),
            DeskInput::Menu(MenuAction::Open) => self.desk.open_menu(),
            DeskInput::Menu(MenuAction::Close) => self.desk.close_menu(),
            DeskInput::Menu(MenuAction::Toggle) => self.desk.toggle_menu(),
            DeskInput::DismissHint => self.desk.dismiss_hint(),
        }
    }

    // --- output ----------------------------------------------------------

    /// Drain pending host commands.
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Drain pending host commands as a JSON array.
    pub fn take_commands_json(&mut self) -> String {
        let commands = self.take_commands();
        match serde_json::to_string(&commands) {
            Ok(json) => json,
            Err(err) => {
                self.logs.push(format!("command_encode_error: {err}"));
                "[]".to_owned()
            }
        }
    }

    /// Drain log lines accumulated since the last call.
    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }
}

/// One-line rendering of a drag dispatch record.
#[must_use]
pub fn format_drag_log_entry(entry: &DragLogEntry) -> String {
    let mut line = format!(
        "drag_pointer phase={} card={}",
        entry.phase.label(),
        entry.card
    );
    match entry.pointer_id {
        Some(id) => {
            let _ = write!(line, " pointer={id}");
        }
        None => line.push_str(" pointer=-"),
    }
    if let Some(source) = entry.source {
        let _ = write!(line, " source={}", source.label());
    }
    if let Some(p) = entry.position {
        let _ = write!(line, " x={} y={}", p.x, p.y);
    }
    match entry.outcome {
        DragOutcome::Ignored(reason) => {
            let _ = write!(line, " outcome=ignored:{}", reason.label());
        }
        other => {
            let _ = write!(line, " outcome={}", other.label());
        }
    }
    line
}

/// Console line for a panic raised inside the desk runner.
#[must_use]
pub fn format_panic_report(location: Option<(&str, u32)>, detail: &dyn fmt::Display) -> String {
    match location {
        Some((file, line)) => format!("notedesk: desk runner panicked at {file}:{line}: {detail}"),
        None => format!("notedesk: desk runner panicked: {detail}"),
    }
}
