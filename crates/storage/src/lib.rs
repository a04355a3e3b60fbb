pub mod error;
pub mod ids;
pub mod memory;
pub mod types;

pub use error::{PersistenceError, PersistenceResult};
pub use ids::{ChatId, UrlId};
pub use memory::{DescriptionWrite, MemoryChatStore, MemoryNavigation};
pub use types::{ChatHistoryItem, DEFAULT_CHAT_DESCRIPTION};

/// Process-wide chat store the sidebar writes renames into.
///
/// Implementations are driven from the UI event loop only, so no method takes
/// `&mut self`; interior mutability is the implementor's concern.
pub trait ChatStore {
    fn update_description(&self, chat_id: &ChatId, description: &str) -> PersistenceResult<()>;

    /// Returns the chat currently open in the main view, if any.
    fn current_chat_id(&self) -> Option<ChatId>;

    /// Mirrors a rename onto the title of the chat open in the main view.
    fn publish_current_description(&self, description: &str);
}

/// Read-only view of the surrounding router.
pub trait Navigation {
    fn current_route_id(&self) -> Option<UrlId>;
}
