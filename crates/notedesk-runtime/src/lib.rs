#![forbid(unsafe_code)]

//! notedesk runtime
//!
//! Stateful behavior of the desk on top of the pure layout in
//! `notedesk-layout`: draggable cards, scroll navigation with a bounded
//! settle poll, container height sync, the narrow-viewport menu and the drag
//! hint.
//!
//! # Key Components
//!
//! - [`Desk`] - Orchestrator a host drives with input, frames and measurements
//! - [`DraggableCard`] - One card's drag session and grid snap
//! - [`DeskHost`] - Measurement queries the host answers
//! - [`HostCommand`] - Effects the host applies
//! - [`DeskConfig`] - Every tunable, loadable from TOML/JSON with `config`
//!
//! # How it fits in the system
//! Nothing here touches a DOM, spawns a thread or reads a clock. A host
//! (`notedesk-web` in a browser, plain tests natively) forwards events, calls
//! [`Desk::frame`] once per animation frame with its monotonic time, and
//! applies whatever [`Desk::take_commands`] returns.

pub mod config;
pub mod desk;
pub mod drag;
pub mod height;
pub mod hint;
pub mod host;
pub mod menu;
pub mod nav;
pub mod scroll;
pub mod z_order;

pub use config::{ConfigError, DeskConfig, DragConfig, HeightConfig, MenuConfig};
pub use desk::Desk;
pub use drag::{
    DragDispatch, DragIgnoredReason, DragLogEntry, DragMode, DragOutcome, DragPhase,
    DragSession, DraggableCard,
};
pub use height::{HeightSync, HeightTrigger, required_height};
pub use hint::DragHint;
pub use host::{ContainerMetrics, DeskHost, HostCommand, Scroller};
pub use menu::{MenuController, MenuState};
pub use nav::{NavigationState, TabSelection};
pub use scroll::{
    ScrollConfig, ScrollOffset, ScrollRequest, SettleGiveUp, SettleOutcome, SettlePoll, SettleStep,
    scroll_to_card,
};
pub use z_order::ZOrderCounter;
