use chat_sidebar_storage::{ChatId, UrlId};
use serde::{Deserialize, Serialize};

/// Pointer or keyboard activation forwarded from the rendering layer.
///
/// Mirrors the two flags a DOM-style event exposes so the toolkit adapter can
/// decide whether to follow the underlying link and whether ancestors see the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivationEvent {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl ActivationEvent {
    pub const fn new() -> Self {
        Self {
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Key input delivered to the rename field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    /// Any other key; carries the field value after the key was applied.
    Input(String),
}

/// What a primary activation ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    Navigated { href: String },
    SelectionToggled(ChatId),
    Ignored,
}

/// Result of leaving edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The trimmed draft was written and is now the description.
    Committed(String),
    /// The draft was blank, so the previous description stays.
    Reverted,
    NotEditing,
}

/// Emitted to the delete capability; the caller owns confirmation and undo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeleteRequested {
    pub chat_id: ChatId,
}

/// Entries offered by the per-item overflow menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    Download,
    Share,
    Duplicate,
    Rename,
    Delete,
}

impl MenuAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Download => "Download",
            Self::Share => "Share",
            Self::Duplicate => "Duplicate",
            Self::Rename => "Rename",
            Self::Delete => "Delete",
        }
    }
}

/// Per-render inputs owned by the caller, read fresh on every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemProps {
    pub selection_mode: bool,
    pub is_selected: bool,
}

/// Render-ready snapshot of one history row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub chat_id: ChatId,
    pub url_id: UrlId,
    pub href: String,
    pub description: String,
    pub editing: bool,
    pub draft_text: Option<String>,
    pub menu_open: bool,
    pub is_selected: bool,
    pub is_active: bool,
    pub selectable: bool,
}
