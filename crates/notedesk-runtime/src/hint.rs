#![forbid(unsafe_code)]

//! "Drag the cards around" hint shown on positioned viewports.
//!
//! The dialog is modal: body scrolling stays locked for as long as it is
//! visible. It reappears each time the viewport crosses from narrow into a
//! positioned mode, and never shows on narrow viewports.

use notedesk_layout::LayoutMode;

use crate::host::HostCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragHint {
    visible: bool,
    positioned: Option<bool>,
}

impl DragHint {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            visible: false,
            positioned: None,
        }
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// React to the current mode (mount or resize).
    ///
    /// Shows the hint when entering a positioned mode from narrow or from
    /// nothing; hides it when the viewport turns narrow. Moving between
    /// medium and wide leaves it alone.
    pub fn on_mode(&mut self, mode: LayoutMode) -> Vec<HostCommand> {
        let positioned = mode.is_positioned();
        if self.positioned == Some(positioned) {
            return Vec::new();
        }
        self.positioned = Some(positioned);
        if positioned {
            self.show()
        } else {
            self.dismiss()
        }
    }

    pub fn show(&mut self) -> Vec<HostCommand> {
        self.set_visible(true)
    }

    /// Button or Escape.
    pub fn dismiss(&mut self) -> Vec<HostCommand> {
        self.set_visible(false)
    }

    fn set_visible(&mut self, visible: bool) -> Vec<HostCommand> {
        if self.visible == visible {
            return Vec::new();
        }
        self.visible = visible;
        tracing::debug!(visible, "drag hint");
        vec![
            HostCommand::SetHintVisible { visible },
            HostCommand::LockBodyScroll { locked: visible },
        ]
    }
}
