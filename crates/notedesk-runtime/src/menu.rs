#![forbid(unsafe_code)]

//! Narrow-viewport menu with enter and exit transitions.
//!
//! The menu element is mounted before it is shown so the host's CSS
//! transition has a start state, and it stays mounted for an exit delay
//! after it is hidden so the closing transition can finish.
//!
//! ```text
//! Closed --open--> Opening --frame--> Open --close--> Closing --delay--> Closed
//!                     ^                                  |
//!                     +---------------open---------------+
//! ```

use core::time::Duration;

use crate::host::HostCommand;

/// Time the menu stays mounted after it starts closing.
pub const DEFAULT_EXIT_DELAY: Duration = Duration::from_millis(300);

/// Menu lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    /// Mounted, becomes visible on the next frame.
    Opening,
    Open,
    /// Hidden, unmounts once `until` has passed.
    Closing { until: Duration },
}

impl MenuState {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing { .. } => "closing",
        }
    }

    #[must_use]
    pub const fn is_mounted(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether the menu is visually open.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    const fn command(self) -> HostCommand {
        HostCommand::SetMenu {
            mounted: self.is_mounted(),
            open: self.is_open(),
        }
    }
}

/// Drives [`MenuState`] from user actions and host frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuController {
    state: MenuState,
    exit_delay: Duration,
}

impl Default for MenuController {
    fn default() -> Self {
        Self::new(DEFAULT_EXIT_DELAY)
    }
}

impl MenuController {
    #[must_use]
    pub const fn new(exit_delay: Duration) -> Self {
        Self {
            state: MenuState::Closed,
            exit_delay,
        }
    }

    #[must_use]
    pub const fn state(&self) -> MenuState {
        self.state
    }

    #[must_use]
    pub const fn exit_delay(&self) -> Duration {
        self.exit_delay
    }

    /// Mount the menu. Re-opening while closing cancels the pending unmount.
    pub fn open(&mut self) -> Option<HostCommand> {
        match self.state {
            MenuState::Closed | MenuState::Closing { .. } => self.transition(MenuState::Opening),
            MenuState::Opening | MenuState::Open => None,
        }
    }

    /// Hide the menu now and schedule the unmount.
    pub fn close(&mut self, now: Duration) -> Option<HostCommand> {
        match self.state {
            MenuState::Opening | MenuState::Open => self.transition(MenuState::Closing {
                until: now.saturating_add(self.exit_delay),
            }),
            MenuState::Closed | MenuState::Closing { .. } => None,
        }
    }

    /// Hamburger button: close when open, open otherwise.
    pub fn toggle(&mut self, now: Duration) -> Option<HostCommand> {
        if self.state.is_open() {
            self.close(now)
        } else {
            self.open()
        }
    }

    /// Advance frame- and timer-driven transitions.
    pub fn tick(&mut self, now: Duration) -> Option<HostCommand> {
        match self.state {
            MenuState::Opening => self.transition(MenuState::Open),
            MenuState::Closing { until } if now >= until => self.transition(MenuState::Closed),
            _ => None,
        }
    }

    fn transition(&mut self, next: MenuState) -> Option<HostCommand> {
        tracing::debug!(from = self.state.label(), to = next.label(), "menu transition");
        self.state = next;
        Some(next.command())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn set_menu(mounted: bool, open: bool) -> Option<HostCommand> {
        Some(HostCommand::SetMenu { mounted, open })
    }

    #[test]
    fn open_mounts_then_shows_on_next_frame() {
        let mut menu = MenuController::default();
        assert_eq!(menu.open(), set_menu(true, false));
        assert_eq!(menu.state(), MenuState::Opening);
        assert_eq!(menu.tick(ms(16)), set_menu(true, true));
        assert_eq!(menu.state(), MenuState::Open);
        assert_eq!(menu.tick(ms(32)), None);
    }

    #[test]
    fn close_hides_now_and_unmounts_after_delay() {
        let mut menu = MenuController::default();
        menu.open();
        menu.tick(ms(0));
        assert_eq!(menu.close(ms(1_000)), set_menu(true, false));
        assert_eq!(menu.state(), MenuState::Closing { until: ms(1_300) });
        assert_eq!(menu.tick(ms(1_299)), None);
        assert!(menu.state().is_mounted());
        assert_eq!(menu.tick(ms(1_300)), set_menu(false, false));
        assert_eq!(menu.state(), MenuState::Closed);
    }

    #[test]
    fn reopening_while_closing_cancels_unmount() {
        let mut menu = MenuController::default();
        menu.open();
        menu.tick(ms(0));
        menu.close(ms(100));
        assert_eq!(menu.open(), set_menu(true, false));
        assert_eq!(menu.tick(ms(200)), set_menu(true, true));
        assert_eq!(menu.tick(ms(500)), None);
        assert_eq!(menu.state(), MenuState::Open);
    }

    #[test]
    fn redundant_requests_are_no_ops() {
        let mut menu = MenuController::default();
        assert_eq!(menu.close(ms(0)), None);
        menu.open();
        assert_eq!(menu.open(), None);
        menu.close(ms(0));
        assert_eq!(menu.close(ms(50)), None);
        assert_eq!(menu.state(), MenuState::Closing { until: ms(300) });
    }

    #[test]
    fn toggle_follows_visual_state() {
        let mut menu = MenuController::default();
        menu.toggle(ms(0));
        assert_eq!(menu.state(), MenuState::Opening);
        menu.toggle(ms(0));
        assert_eq!(menu.state(), MenuState::Opening);
        menu.tick(ms(16));
        menu.toggle(ms(20));
        assert_eq!(menu.state(), MenuState::Closing { until: ms(320) });
    }
}
