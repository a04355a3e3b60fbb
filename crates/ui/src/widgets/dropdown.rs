use serde::{Deserialize, Serialize};

use crate::history::{MenuAction, MenuVisibilityController};

pub const DEFAULT_SIDE_OFFSET: u16 = 5;

/// Horizontal alignment of the overlay against its trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuAlign {
    Start,
    Center,
    #[default]
    End,
}

impl MenuAlign {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "center" => Some(Self::Center),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuPlacement {
    pub align: MenuAlign,
    pub side_offset: u16,
}

impl Default for MenuPlacement {
    fn default() -> Self {
        Self {
            align: MenuAlign::default(),
            side_offset: DEFAULT_SIDE_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemTone {
    #[default]
    Normal,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownItem {
    pub label: &'static str,
    pub action: MenuAction,
    pub tone: ItemTone,
}

impl DropdownItem {
    pub fn new(action: MenuAction) -> Self {
        Self {
            label: action.label(),
            action,
            tone: ItemTone::Normal,
        }
    }

    pub fn destructive(mut self) -> Self {
        self.tone = ItemTone::Destructive;
        self
    }
}

/// Anchored overlay menu: a trigger, a list of entries and an open flag.
///
/// Picking an entry or interacting outside the overlay dismisses it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dropdown {
    items: Vec<DropdownItem>,
    placement: MenuPlacement,
    visibility: MenuVisibilityController,
}

impl Dropdown {
    pub fn new(items: Vec<DropdownItem>, placement: MenuPlacement) -> Self {
        Self {
            items,
            placement,
            visibility: MenuVisibilityController::new(),
        }
    }

    pub fn items(&self) -> &[DropdownItem] {
        &self.items
    }

    pub fn placement(&self) -> MenuPlacement {
        self.placement
    }

    pub fn visibility(&self) -> &MenuVisibilityController {
        &self.visibility
    }

    pub fn visibility_mut(&mut self) -> &mut MenuVisibilityController {
        &mut self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    pub fn trigger(&mut self) {
        self.visibility.toggle();
    }

    pub fn dismiss_outside(&mut self) {
        self.visibility.set_open(false);
    }

    /// Returns the chosen action and closes the overlay. Selecting while
    /// closed or past the end yields `None`.
    pub fn select(&mut self, index: usize) -> Option<MenuAction> {
        if !self.visibility.is_open() {
            return None;
        }

        let action = self.items.get(index).map(|item| item.action)?;
        self.visibility.set_open(false);
        Some(action)
    }

    pub fn position_of(&self, action: MenuAction) -> Option<usize> {
        self.items.iter().position(|item| item.action == action)
    }
}
