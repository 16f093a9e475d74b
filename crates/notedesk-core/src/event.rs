#![forbid(unsafe_code)]

//! Canonical input types pushed by the host.
//!
//! Pointer and touch input share one shape: the host picks the
//! [`InputSource`] and forwards `clientX`/`clientY` of the first touch point
//! for touch events, exactly like a mouse pointer.

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which DOM listener family produced an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InputSource {
    /// `pointerdown` / `pointermove` / `pointerup`.
    #[default]
    Pointer,
    /// `touchstart` / `touchmove` / `touchend`.
    Touch,
}

impl InputSource {
    /// Stable lowercase label for logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::Touch => "touch",
        }
    }
}

/// Key codes the desk reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KeyCode {
    Escape,
    Enter,
    Tab,
    Char(char),
    /// Any other key; carried only so hosts can forward everything.
    Other,
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const META  = 0b1000;
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key event without modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this is the Escape key, regardless of modifiers.
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.code == KeyCode::Escape
    }
}
