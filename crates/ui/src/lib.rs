#![deny(unsafe_code)]

/// Headless interaction controllers for a chat sidebar.
///
/// The crate holds the state machines behind the history list (inline rename,
/// selection gating, overflow menu visibility) and a few small widgets. It
/// draws nothing; a toolkit adapter feeds events in and renders snapshots.
pub mod history;
/// Scripted replay of sidebar events against the in-memory store.
pub mod replay;
/// Settings persistence.
pub mod settings;
pub mod widgets;

pub use history::{
    ActivationEvent, ActivationOutcome, CommitOutcome, EditKey, HistorySidebar,
    ItemCapabilities, ItemEnvironment, ItemProps, ItemView, ListItemController, MenuAction,
};
pub use settings::{SettingsStore, SidebarSettings};
