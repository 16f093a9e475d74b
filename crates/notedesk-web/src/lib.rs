#![forbid(unsafe_code)]

//! Browser runner for the notedesk engine.
//!
//! This crate provides [`runner_core::RunnerCore`], which drives a
//! `notedesk_runtime::Desk` from JSON-encoded DOM events and JSON-pushed
//! measurements, and on `wasm32` exports it to JavaScript as
//! `NotebookDesk`.
//!
//! # Key Components
//!
//! - [`input_parser`] - JSON event decoding into [`input_parser::DeskInput`]
//! - [`snapshot::HostSnapshot`] - Pushed measurements answering `DeskHost`
//! - [`runner_core::RunnerCore`] - Queue, clock and frame stepping
//!
//! The host applies the returned commands to the DOM. Nothing in this crate
//! touches the DOM itself.

pub mod input_parser;
pub mod runner_core;
pub mod snapshot;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::NotebookDesk;

pub use input_parser::{DeskInput, InputParseError, MenuAction, PointerPhase, parse_encoded_input};
pub use runner_core::{RunnerCore, StepResult, format_drag_log_entry, format_panic_report};
pub use snapshot::HostSnapshot;
