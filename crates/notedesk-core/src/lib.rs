#![forbid(unsafe_code)]

//! Core: geometry, input events, and host time for the notedesk engine.
//!
//! # Role in notedesk
//! `notedesk-core` is the leaf crate. It defines the pixel-space geometry
//! that layouts and drags operate on, the input vocabulary the host pushes
//! in, and the deterministic clock that drives timers.
//!
//! # How it fits in the system
//! `notedesk-layout` places cards using [`geometry::Point`];
//! `notedesk-runtime` consumes [`event`] values and [`clock::Clock`] time;
//! `notedesk-web` decodes host JSON into these same types.

pub mod clock;
pub mod event;
pub mod geometry;

pub use clock::{Clock, DeterministicClock};
pub use event::{InputSource, KeyCode, KeyEvent, Modifiers};
pub use geometry::{Point, Rect, snap_to_grid};
