use chat_sidebar_storage::{ChatId, ChatStore, PersistenceResult};

use crate::history::events::{CommitOutcome, EditKey};

/// Buffered text for one in-progress rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    draft_text: String,
}

impl EditSession {
    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }
}

/// Edit/view toggle for one history item's label.
///
/// Losing focus commits like Enter does; there is no discard path, so typed
/// input is never dropped. Commits are optimistic: the local description is
/// replaced before the store write, and a failed write is returned to the
/// caller without rolling the label back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionEditController {
    chat_id: ChatId,
    description: String,
    session: Option<EditSession>,
}

impl DescriptionEditController {
    pub fn new(chat_id: ChatId, description: impl Into<String>) -> Self {
        Self {
            chat_id,
            description: description.into(),
            session: None,
        }
    }

    pub fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    /// Last committed description.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn draft_text(&self) -> Option<&str> {
        self.session.as_ref().map(EditSession::draft_text)
    }

    /// Label the rendering layer should show right now.
    pub fn current_text(&self) -> &str {
        self.draft_text().unwrap_or(self.description.as_str())
    }

    pub fn enter_edit(&mut self) {
        if self.session.is_some() {
            return;
        }

        tracing::debug!("entering edit mode for chat {}", self.chat_id);
        self.session = Some(EditSession {
            draft_text: self.description.clone(),
        });
    }

    pub fn update_draft(&mut self, text: impl Into<String>) {
        match self.session.as_mut() {
            Some(session) => session.draft_text = text.into(),
            None => tracing::debug!(
                "ignoring draft update for chat {} outside edit mode",
                self.chat_id
            ),
        }
    }

    pub fn commit(
        &mut self,
        store: &dyn ChatStore,
        sync_with_global_store: bool,
    ) -> PersistenceResult<CommitOutcome> {
        let Some(session) = self.session.take() else {
            tracing::debug!("commit for chat {} ignored outside edit mode", self.chat_id);
            return Ok(CommitOutcome::NotEditing);
        };

        let trimmed = session.draft_text.trim();
        if trimmed.is_empty() {
            tracing::debug!(
                "blank description for chat {} reverted to '{}'",
                self.chat_id,
                self.description
            );
            return Ok(CommitOutcome::Reverted);
        }

        let description = trimmed.to_string();
        self.description = description.clone();

        if let Err(error) = store.update_description(&self.chat_id, &description) {
            tracing::error!(
                "failed to persist description for chat {}: {error}",
                self.chat_id
            );
            return Err(error);
        }

        // The global title only follows writes the store accepted.
        if sync_with_global_store {
            store.publish_current_description(&description);
        }

        Ok(CommitOutcome::Committed(description))
    }

    /// Focus left the field while editing; treated as a submit.
    pub fn cancel_via_blur(
        &mut self,
        store: &dyn ChatStore,
        sync_with_global_store: bool,
    ) -> PersistenceResult<CommitOutcome> {
        self.commit(store, sync_with_global_store)
    }

    /// Explicit submit button next to the field.
    pub fn submit(
        &mut self,
        store: &dyn ChatStore,
        sync_with_global_store: bool,
    ) -> PersistenceResult<CommitOutcome> {
        self.commit(store, sync_with_global_store)
    }

    /// Returns `None` when the key only changed the draft.
    pub fn handle_key(
        &mut self,
        key: EditKey,
        store: &dyn ChatStore,
        sync_with_global_store: bool,
    ) -> PersistenceResult<Option<CommitOutcome>> {
        match key {
            EditKey::Enter => self.commit(store, sync_with_global_store).map(Some),
            EditKey::Input(text) => {
                self.update_draft(text);
                Ok(None)
            }
        }
    }

    /// Enters edit mode when idle, commits when editing.
    pub fn toggle_edit(
        &mut self,
        store: &dyn ChatStore,
        sync_with_global_store: bool,
    ) -> PersistenceResult<Option<CommitOutcome>> {
        if self.is_editing() {
            return self.commit(store, sync_with_global_store).map(Some);
        }

        self.enter_edit();
        Ok(None)
    }

    /// Accepts a description changed outside this item. An open draft is left alone.
    pub fn sync_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }
}
