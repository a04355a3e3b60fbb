use std::cell::{Cell, RefCell};

use snafu::OptionExt;

use super::error::{NotFoundSnafu, PersistenceResult, WriteRejectedSnafu};
use super::ids::{ChatId, UrlId};
use super::types::ChatHistoryItem;
use super::{ChatStore, Navigation};

/// One accepted `update_description` call, kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionWrite {
    pub chat_id: ChatId,
    pub description: String,
}

/// In-memory `ChatStore` used by tests and the replay tool.
#[derive(Debug, Default)]
pub struct MemoryChatStore {
    chats: RefCell<Vec<ChatHistoryItem>>,
    current_chat_id: RefCell<Option<ChatId>>,
    current_description: RefCell<Option<String>>,
    writes: RefCell<Vec<DescriptionWrite>>,
    pending_failures: Cell<usize>,
}

impl MemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chats(chats: impl IntoIterator<Item = ChatHistoryItem>) -> Self {
        let store = Self::new();
        for chat in chats {
            store.insert(chat);
        }
        store
    }

    /// Inserts or replaces a chat, keeping insertion order for new ids.
    pub fn insert(&self, chat: ChatHistoryItem) {
        let mut chats = self.chats.borrow_mut();
        match chats.iter_mut().find(|existing| existing.id == chat.id) {
            Some(existing) => *existing = chat,
            None => chats.push(chat),
        }
    }

    pub fn list_chats(&self) -> Vec<ChatHistoryItem> {
        self.chats.borrow().clone()
    }

    pub fn get_chat(&self, chat_id: &ChatId) -> Option<ChatHistoryItem> {
        self.chats
            .borrow()
            .iter()
            .find(|chat| &chat.id == chat_id)
            .cloned()
    }

    pub fn set_current_chat(&self, chat_id: Option<ChatId>) {
        *self.current_chat_id.borrow_mut() = chat_id;
    }

    /// Title most recently published for the chat in the main view.
    pub fn current_description(&self) -> Option<String> {
        self.current_description.borrow().clone()
    }

    pub fn writes(&self) -> Vec<DescriptionWrite> {
        self.writes.borrow().clone()
    }

    /// Makes the next `count` description writes fail with `WriteRejected`.
    pub fn fail_next_writes(&self, count: usize) {
        self.pending_failures.set(count);
    }
}

impl ChatStore for MemoryChatStore {
    fn update_description(&self, chat_id: &ChatId, description: &str) -> PersistenceResult<()> {
        let pending_failures = self.pending_failures.get();
        if pending_failures > 0 {
            self.pending_failures.set(pending_failures - 1);
            return WriteRejectedSnafu {
                stage: "update-description",
                id: chat_id.to_string(),
                details: "injected failure".to_string(),
            }
            .fail();
        }

        let mut chats = self.chats.borrow_mut();
        let chat = chats
            .iter_mut()
            .find(|chat| &chat.id == chat_id)
            .context(NotFoundSnafu {
                stage: "update-description",
                id: chat_id.to_string(),
            })?;
        chat.description = description.to_string();

        self.writes.borrow_mut().push(DescriptionWrite {
            chat_id: chat_id.clone(),
            description: description.to_string(),
        });
        tracing::debug!("stored description for chat {chat_id}");
        Ok(())
    }

    fn current_chat_id(&self) -> Option<ChatId> {
        self.current_chat_id.borrow().clone()
    }

    fn publish_current_description(&self, description: &str) {
        *self.current_description.borrow_mut() = Some(description.to_string());
    }
}

/// Router stand-in holding the id of the currently viewed chat route.
#[derive(Debug, Default)]
pub struct MemoryNavigation {
    route: RefCell<Option<UrlId>>,
}

impl MemoryNavigation {
    pub fn new(route: Option<UrlId>) -> Self {
        Self {
            route: RefCell::new(route),
        }
    }

    pub fn navigate_to(&self, url_id: Option<UrlId>) {
        *self.route.borrow_mut() = url_id;
    }
}

impl Navigation for MemoryNavigation {
    fn current_route_id(&self) -> Option<UrlId> {
        self.route.borrow().clone()
    }
}
