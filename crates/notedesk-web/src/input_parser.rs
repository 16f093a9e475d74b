#![forbid(unsafe_code)]

//! JSON input parser for host-encoded desk events.
//!
//! The browser glue serializes each DOM event it forwards as a flat JSON
//! object tagged by `kind`:
//!
//! ```json
//! {"kind":"pointer","phase":"down","id":1,"card":"skills","x":40,"y":120}
//! {"kind":"touch","phase":"move","id":0,"x":44,"y":131}
//! {"kind":"key","key":"Escape","mods":0}
//! {"kind":"resize","width":1280}
//! {"kind":"tab","tab":"Projects"}
//! {"kind":"menu","action":"toggle"}
//! {"kind":"hint","action":"dismiss"}
//! ```
//!
//! [`parse_encoded_input`] turns one such object into a [`DeskInput`].
//! Kinds the desk does not react to return `Ok(None)` so hosts can forward
//! everything without filtering.

use notedesk_core::event::{InputSource, KeyCode, KeyEvent, Modifiers};
use notedesk_core::geometry::Point;
use notedesk_layout::{CardId, Tab};
use serde::Deserialize;

/// Errors from parsing encoded input JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// Unknown pointer phase.
    UnknownPhase(String),
    /// Unknown menu or hint action.
    UnknownAction(String),
    /// `card` names no desk card.
    UnknownCard(String),
    /// `tab` names no navigation tab.
    UnknownTab(String),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownPhase(phase) => write!(f, "unknown phase: {phase}"),
            Self::UnknownAction(action) => write!(f, "unknown action: {action}"),
            Self::UnknownCard(card) => write!(f, "unknown card: {card}"),
            Self::UnknownTab(tab) => write!(f, "unknown tab: {tab}"),
        }
    }
}

impl std::error::Error for InputParseError {}

/// Lifecycle phase of a forwarded pointer or touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Menu requests from the hamburger button and the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Open,
    Close,
    Toggle,
}

/// One decoded host event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeskInput {
    /// Pointer or touch lifecycle event. `card` is set on `Down` only.
    Pointer {
        source: InputSource,
        phase: PointerPhase,
        pointer_id: u32,
        card: Option<CardId>,
        position: Point,
    },
    Key(KeyEvent),
    /// New viewport width.
    Resize { width: f64 },
    /// A navigation tab was clicked.
    Tab(Tab),
    Menu(MenuAction),
    /// The drag hint's close button.
    DismissHint,
}

/// Internal deserialization target.
#[derive(Debug, Deserialize)]
struct RawInput {
    kind: String,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    card: Option<String>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    mods: Option<i32>,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    tab: Option<String>,
    #[serde(default)]
    action: Option<String>,
}

/// Parse one JSON-encoded host event.
///
/// Returns `Ok(None)` for kinds the desk ignores (wheel, focus, ...).
/// Returns `Err` for malformed JSON, missing fields, or unknown names.
pub fn parse_encoded_input(json: &str) -> Result<Option<DeskInput>, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    match raw.kind.as_str() {
        "pointer" => parse_pointer(&raw, InputSource::Pointer).map(Some),
        "touch" => parse_pointer(&raw, InputSource::Touch).map(Some),
        "key" => parse_key(&raw).map(Some),
        "resize" => parse_resize(&raw).map(Some),
        "tab" => parse_tab(&raw).map(Some),
        "menu" => parse_menu(&raw).map(Some),
        "hint" => parse_hint(&raw).map(Some),
        _ => Ok(None),
    }
}

fn parse_phase(phase: &str) -> Result<PointerPhase, InputParseError> {
    match phase {
        "down" | "start" => Ok(PointerPhase::Down),
        "move" => Ok(PointerPhase::Move),
        "up" | "end" => Ok(PointerPhase::Up),
        "cancel" => Ok(PointerPhase::Cancel),
        other => Err(InputParseError::UnknownPhase(other.to_owned())),
    }
}

fn parse_position(raw: &RawInput) -> Result<Point, InputParseError> {
    let x = raw.x.ok_or(InputParseError::MissingField("x"))?;
    let y = raw.y.ok_or(InputParseError::MissingField("y"))?;
    Ok(Point::new(x, y))
}

fn parse_pointer(raw: &RawInput, source: InputSource) -> Result<DeskInput, InputParseError> {
    let phase = parse_phase(
        raw.phase
            .as_deref()
            .ok_or(InputParseError::MissingField("phase"))?,
    )?;
    let pointer_id = raw.id.ok_or(InputParseError::MissingField("id"))?;

    let card = match phase {
        PointerPhase::Down => {
            let name = raw
                .card
                .as_deref()
                .ok_or(InputParseError::MissingField("card"))?;
            Some(
                name.parse::<CardId>()
                    .map_err(|e| InputParseError::UnknownCard(e.0))?,
            )
        }
        _ => None,
    };

    // Release and cancel carry no coordinates the desk needs.
    let position = match phase {
        PointerPhase::Down | PointerPhase::Move => parse_position(raw)?,
        PointerPhase::Up | PointerPhase::Cancel => Point::ZERO,
    };

    Ok(DeskInput::Pointer {
        source,
        phase,
        pointer_id,
        card,
        position,
    })
}

fn parse_modifiers(mods: Option<i32>) -> Modifiers {
    let bits = mods.unwrap_or(0).clamp(0, i32::from(u8::MAX)) as u8;
    Modifiers::from_bits_truncate(bits)
}

fn parse_key_code(key: &str) -> KeyCode {
    match key {
        "Escape" | "Esc" => KeyCode::Escape,
        "Enter" => KeyCode::Enter,
        "Tab" => KeyCode::Tab,
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => KeyCode::Other,
            }
        }
    }
}

fn parse_key(raw: &RawInput) -> Result<DeskInput, InputParseError> {
    let key = raw
        .key
        .as_deref()
        .ok_or(InputParseError::MissingField("key"))?;
    Ok(DeskInput::Key(
        KeyEvent::new(parse_key_code(key)).with_modifiers(parse_modifiers(raw.mods)),
    ))
}

fn parse_resize(raw: &RawInput) -> Result<DeskInput, InputParseError> {
    let width = raw.width.ok_or(InputParseError::MissingField("width"))?;
    Ok(DeskInput::Resize { width })
}

fn parse_tab(raw: &RawInput) -> Result<DeskInput, InputParseError> {
    let name = raw
        .tab
        .as_deref()
        .ok_or(InputParseError::MissingField("tab"))?;
    name.parse::<Tab>()
        .map(DeskInput::Tab)
        .map_err(|e| InputParseError::UnknownTab(e.0))
}

fn parse_menu(raw: &RawInput) -> Result<DeskInput, InputParseError> {
    let action = raw
        .action
        .as_deref()
        .ok_or(InputParseError::MissingField("action"))?;
    let action = match action {
        "open" => MenuAction::Open,
        // The overlay behind the open menu closes it.
        "close" | "overlay" => MenuAction::Close,
        "toggle" => MenuAction::Toggle,
        other => return Err(InputParseError::UnknownAction(other.to_owned())),
    };
    Ok(DeskInput::Menu(action))
}

fn parse_hint(raw: &RawInput) -> Result<DeskInput, InputParseError> {
    match raw.action.as_deref() {
        None | Some("dismiss") => Ok(DeskInput::DismissHint),
        Some(other) => Err(InputParseError::UnknownAction(other.to_owned())),
    }
}
