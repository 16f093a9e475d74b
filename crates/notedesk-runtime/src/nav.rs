#![forbid(unsafe_code)]

//! Tab navigation.

use core::time::Duration;

use notedesk_layout::{LayoutMode, Tab};

use crate::host::{DeskHost, HostCommand};
use crate::menu::MenuController;
use crate::scroll::{ScrollConfig, ScrollRequest, scroll_to_card};

/// Effects of one tab selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabSelection {
    pub commands: Vec<HostCommand>,
    /// The scroll that was started, if the tab's card is rendered.
    pub request: Option<ScrollRequest>,
    /// Whether the card should wiggle once the scroll settles.
    pub wiggle: bool,
}

/// Active tab plus the narrow-viewport menu.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavigationState {
    active: Tab,
    menu: MenuController,
}

impl NavigationState {
    #[must_use]
    pub fn new(menu: MenuController) -> Self {
        Self {
            active: Tab::default(),
            menu,
        }
    }

    #[must_use]
    pub const fn active_tab(&self) -> Tab {
        self.active
    }

    #[must_use]
    pub const fn menu(&self) -> &MenuController {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut MenuController {
        &mut self.menu
    }

    /// Activate `tab` and bring its card into view.
    ///
    /// Narrow viewports scroll below the nav card and close the menu.
    /// Positioned viewports scroll to a fixed offset and ask for a wiggle.
    pub fn select_tab<H: DeskHost + ?Sized>(
        &mut self,
        tab: Tab,
        mode: LayoutMode,
        now: Duration,
        host: &H,
        scroll: &ScrollConfig,
    ) -> TabSelection {
        self.active = tab;
        tracing::debug!(tab = tab.label(), mode = mode.label(), "tab selected");

        let mut selection = TabSelection {
            commands: vec![HostCommand::SetActiveTab { tab }],
            ..TabSelection::default()
        };
        let request = scroll_to_card(tab.card(), mode, host, scroll);
        if let Some(request) = &request {
            selection.commands.push(request.command());
        }
        selection.request = request;

        if mode.is_positioned() {
            selection.wiggle = request.is_some();
        } else if let Some(cmd) = self.menu.close(now) {
            selection.commands.push(cmd);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Scroller;
    use crate::host::test_host::MockHost;
    use crate::menu::MenuState;
    use notedesk_core::geometry::Rect;
    use notedesk_layout::CardId;

    fn host() -> MockHost {
        MockHost::default()
            .with_card(CardId::Projects, Rect::new(40.0, 1500.0, 340.0, 400.0))
            .with_card(CardId::Nav, Rect::new(28.0, 8.0, 364.0, 48.0))
    }

    #[test]
    fn narrow_selection_scrolls_and_closes_menu() {
        let mut nav = NavigationState::default();
        nav.menu_mut().open();
        nav.menu_mut().tick(Duration::ZERO);

        let sel = nav.select_tab(
            Tab::Projects,
            LayoutMode::Narrow,
            Duration::from_millis(50),
            &host(),
            &ScrollConfig::default(),
        );
        assert_eq!(nav.active_tab(), Tab::Projects);
        assert!(!sel.wiggle);
        assert_eq!(
            sel.commands,
            vec![
                HostCommand::SetActiveTab { tab: Tab::Projects },
                HostCommand::ScrollTo {
                    scroller: Scroller::Window,
                    top: 1500.0 - 64.0,
                    smooth: true,
                },
                HostCommand::SetMenu {
                    mounted: true,
                    open: false,
                },
            ]
        );
        assert_eq!(
            nav.menu().state(),
            MenuState::Closing {
                until: Duration::from_millis(350)
            }
        );
    }

    #[test]
    fn positioned_selection_requests_wiggle() {
        let mut nav = NavigationState::default();
        let sel = nav.select_tab(
            Tab::Projects,
            LayoutMode::Wide,
            Duration::ZERO,
            &host(),
            &ScrollConfig::default(),
        );
        assert!(sel.wiggle);
        assert_eq!(sel.request.map(|r| r.top), Some(1420.0));
        assert_eq!(nav.menu().state(), MenuState::Closed);
    }

    #[test]
    fn unrendered_card_only_updates_active_tab() {
        let mut nav = NavigationState::default();
        let sel = nav.select_tab(
            Tab::Leadership,
            LayoutMode::Wide,
            Duration::ZERO,
            &host(),
            &ScrollConfig::default(),
        );
        assert_eq!(nav.active_tab(), Tab::Leadership);
        assert!(!sel.wiggle);
        assert_eq!(sel.commands, vec![HostCommand::SetActiveTab { tab: Tab::Leadership }]);
    }
}
