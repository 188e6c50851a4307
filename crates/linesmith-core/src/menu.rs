//! Dropdown menus and the toolbar shown for the active line.

use crate::shapes::SerializableColor;
use serde::{Deserialize, Serialize};

/// Dropdown menus of the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuId {
    WidthDropdown,
    ColorPalette,
}

/// Which dropdown (if any) is open. At most one is open at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: Option<MenuId>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `menu`, closing any other; toggling the open menu closes it.
    pub fn toggle(&mut self, menu: MenuId) {
        self.open = if self.open == Some(menu) {
            None
        } else {
            Some(menu)
        };
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn open(&self) -> Option<MenuId> {
        self.open
    }

    pub fn is_open(&self, menu: MenuId) -> bool {
        self.open == Some(menu)
    }
}

/// What the toolbar shows. Visible only while a line is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarState {
    /// Color swatch of the active line.
    pub swatch: SerializableColor,
    pub width: u32,
    pub locked: bool,
    pub open_menu: Option<MenuId>,
}
