#![forbid(unsafe_code)]

//! Card and tab identifiers.
//!
//! String forms match the `data-id` attributes the host renders, so a host
//! can round-trip identifiers through `FromStr`/`as_str` without a lookup
//! table of its own.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of one card on the desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardId {
    TitleContact,
    Experience,
    Skills,
    Education,
    Projects,
    Leadership,
    LoveCenter,
    LoveRight,
    /// The fixed navigation card. Never laid out, never dragged, and never
    /// counted towards the container height.
    Nav,
}

impl CardId {
    /// Every card that receives a layout position.
    pub const PLACED: [CardId; 8] = [
        CardId::TitleContact,
        CardId::Experience,
        CardId::Skills,
        CardId::Education,
        CardId::Projects,
        CardId::Leadership,
        CardId::LoveCenter,
        CardId::LoveRight,
    ];

    /// Cards that carry a fun-fact note, in fact-assignment order.
    pub const FUN_FACT_TARGETS: [CardId; 8] = [
        CardId::TitleContact,
        CardId::Skills,
        CardId::Experience,
        CardId::Education,
        CardId::Projects,
        CardId::Leadership,
        CardId::LoveCenter,
        CardId::LoveRight,
    ];

    /// The host-side `data-id`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TitleContact => "titleContact",
            Self::Experience => "experience",
            Self::Skills => "skills",
            Self::Education => "education",
            Self::Projects => "projects",
            Self::Leadership => "leadership",
            Self::LoveCenter => "loveCenter",
            Self::LoveRight => "loveRight",
            Self::Nav => "nav",
        }
    }

    /// Whether this card is positioned by the layout engine.
    #[must_use]
    pub const fn is_placed(self) -> bool {
        !matches!(self, Self::Nav)
    }

    /// Index into a host-supplied fun-fact list of length `fact_count`.
    ///
    /// Facts are assigned round-robin over [`CardId::FUN_FACT_TARGETS`].
    /// Returns `None` for cards without a note or an empty list.
    #[must_use]
    pub fn fun_fact_index(self, fact_count: usize) -> Option<usize> {
        if fact_count == 0 {
            return None;
        }
        Self::FUN_FACT_TARGETS
            .iter()
            .position(|&id| id == self)
            .map(|i| i % fact_count)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known card or tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownIdentifier(pub String);

impl fmt::Display for UnknownIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown identifier: {}", self.0)
    }
}

impl std::error::Error for UnknownIdentifier {}

impl FromStr for CardId {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PLACED
            .iter()
            .chain(core::iter::once(&CardId::Nav))
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownIdentifier(s.to_owned()))
    }
}

/// A navigation tab. Each tab mirrors exactly one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    About,
    Skills,
    Experience,
    Education,
    Projects,
    Leadership,
}

impl Tab {
    /// Tabs in menu order.
    pub const ALL: [Tab; 6] = [
        Tab::About,
        Tab::Skills,
        Tab::Experience,
        Tab::Education,
        Tab::Projects,
        Tab::Leadership,
    ];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Skills => "Skills",
            Self::Experience => "Experience",
            Self::Education => "Education",
            Self::Projects => "Projects",
            Self::Leadership => "Leadership",
        }
    }

    /// The card this tab scrolls to.
    #[must_use]
    pub const fn card(self) -> CardId {
        match self {
            Self::About => CardId::TitleContact,
            Self::Skills => CardId::Skills,
            Self::Experience => CardId::Experience,
            Self::Education => CardId::Education,
            Self::Projects => CardId::Projects,
            Self::Leadership => CardId::Leadership,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = UnknownIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|tab| tab.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownIdentifier(s.to_owned()))
    }
}
