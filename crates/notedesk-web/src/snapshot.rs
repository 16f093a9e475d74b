#![forbid(unsafe_code)]

//! Measurements pushed from the browser.
//!
//! The JS glue cannot answer [`DeskHost`] queries synchronously from inside
//! the engine, so it measures once per frame (card rects, the `.notebook`
//! container, `window.scrollY`) and pushes the result as JSON:
//!
//! ```json
//! {
//!   "cards": { "skills": { "x": 960, "y": 100, "width": 432, "height": 500 } },
//!   "container": {
//!     "rect": { "x": 0, "y": 0, "width": 1440, "height": 900 },
//!     "scroll_top": 0, "scroll_height": 900, "client_height": 900
//!   },
//!   "window_scroll_y": 0
//! }
//! ```
//!
//! Missing fields default to "not rendered".

use std::collections::BTreeMap;

use notedesk_core::geometry::Rect;
use notedesk_layout::CardId;
use notedesk_runtime::{ContainerMetrics, DeskHost};
use serde::{Deserialize, Serialize};

/// Last measurements the host pushed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSnapshot {
    /// Viewport-relative rect of every rendered card.
    pub cards: BTreeMap<CardId, Rect>,
    pub container: Option<ContainerMetrics>,
    pub window_scroll_y: f64,
}

impl HostSnapshot {
    /// Decode a snapshot pushed by the host.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_card(mut self, card: CardId, rect: Rect) -> Self {
        self.cards.insert(card, rect);
        self
    }

    #[must_use]
    pub fn with_container(mut self, container: ContainerMetrics) -> Self {
        self.container = Some(container);
        self
    }

    #[must_use]
    pub const fn with_window_scroll_y(mut self, y: f64) -> Self {
        self.window_scroll_y = y;
        self
    }
}

impl DeskHost for HostSnapshot {
    fn card_rect(&self, card: CardId) -> Option<Rect> {
        self.cards.get(&card).copied()
    }

    fn container(&self) -> Option<ContainerMetrics> {
        self.container
    }

    fn window_scroll_y(&self) -> f64 {
        self.window_scroll_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notedesk_runtime::Scroller;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_host_json() {
        let snapshot = HostSnapshot::from_json(
            r#"{
                "cards": { "loveCenter": { "x": 10, "y": 20, "width": 300, "height": 180 } },
                "container": {
                    "rect": { "x": 0, "y": -40, "width": 1440, "height": 900 },
                    "scroll_top": 12, "scroll_height": 2400, "client_height": 900
                },
                "window_scroll_y": 40
            }"#,
        )
        .expect("valid snapshot");

        assert_eq!(
            snapshot.card_rect(CardId::LoveCenter),
            Some(Rect::new(10.0, 20.0, 300.0, 180.0))
        );
        assert_eq!(snapshot.card_rect(CardId::Skills), None);
        assert_eq!(snapshot.scroll_top(Scroller::Container), 12.0);
        assert_eq!(snapshot.scroll_top(Scroller::Window), 40.0);
        assert!(snapshot.container().is_some_and(|c| c.overflows()));
    }

    #[test]
    fn empty_object_is_nothing_rendered() {
        let snapshot = HostSnapshot::from_json("{}").expect("valid snapshot");
        assert_eq!(snapshot, HostSnapshot::default());
        assert_eq!(snapshot.nav_height(), None);
        assert!(snapshot.placed_card_rects().is_empty());
    }

    #[test]
    fn nav_height_comes_from_nav_card() {
        let snapshot =
            HostSnapshot::default().with_card(CardId::Nav, Rect::new(28.0, 8.0, 334.0, 56.0));
        assert_eq!(snapshot.nav_height(), Some(56.0));
    }

    #[test]
    fn unknown_card_key_is_rejected() {
        assert!(HostSnapshot::from_json(r#"{"cards":{"footer":{}}}"#).is_err());
    }
}
