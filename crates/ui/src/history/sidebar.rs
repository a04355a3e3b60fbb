use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use chat_sidebar_storage::{ChatHistoryItem, ChatId};

use crate::history::capabilities::ItemCapabilities;
use crate::history::events::{ActivationEvent, ActivationOutcome, ItemProps, ItemView};
use crate::history::item::{ItemEnvironment, ListItemController};

type SelectionSet = Rc<RefCell<BTreeSet<ChatId>>>;

/// Conversation list with its collapse flag and multi-select state.
///
/// This is the caller the item controllers expect: it owns the selection set
/// and the selection-mode flag and hands both to the items per event.
pub struct HistorySidebar {
    environment: ItemEnvironment,
    items: Vec<ListItemController>,
    selection: SelectionSet,
    selection_mode: bool,
    open: bool,
    search_query: String,
}

impl HistorySidebar {
    pub fn new(environment: ItemEnvironment) -> Self {
        Self {
            environment,
            items: Vec::new(),
            selection: Rc::new(RefCell::new(BTreeSet::new())),
            selection_mode: false,
            open: true,
            search_query: String::new(),
        }
    }

    pub fn environment(&self) -> &ItemEnvironment {
        &self.environment
    }

    /// Adds a row. The sidebar installs its own selection handler, replacing
    /// any toggle capability passed in.
    pub fn push_item(&mut self, item: ChatHistoryItem, capabilities: ItemCapabilities) {
        if self.items.iter().any(|existing| *existing.chat_id() == item.id) {
            tracing::warn!("chat {} is already listed; ignoring duplicate row", item.id);
            return;
        }

        let selection = Rc::clone(&self.selection);
        let capabilities = capabilities
            .with_toggle_selection(move |chat_id| toggle_membership(&selection, chat_id));
        let mut controller = ListItemController::new(item, &self.environment, capabilities);
        controller.on_container_visibility_changed(self.open);
        self.items.push(controller);
    }

    pub fn items(&self) -> &[ListItemController] {
        &self.items
    }

    pub fn item(&self, chat_id: &ChatId) -> Option<&ListItemController> {
        self.items.iter().find(|item| item.chat_id() == chat_id)
    }

    pub fn item_mut(&mut self, chat_id: &ChatId) -> Option<&mut ListItemController> {
        self.items.iter_mut().find(|item| item.chat_id() == chat_id)
    }

    pub fn remove(&mut self, chat_id: &ChatId) -> Option<ListItemController> {
        let index = self.items.iter().position(|item| item.chat_id() == chat_id)?;
        self.selection.borrow_mut().remove(chat_id);
        Some(self.items.remove(index))
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        if self.open == open {
            return;
        }

        self.open = open;
        tracing::debug!("sidebar {}", if open { "expanded" } else { "collapsed" });
        for item in &mut self.items {
            item.on_container_visibility_changed(open);
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.set_open(!self.open);
    }

    pub fn selection_mode(&self) -> bool {
        self.selection_mode
    }

    /// Leaving selection mode drops the current selection.
    pub fn set_selection_mode(&mut self, enabled: bool) {
        self.selection_mode = enabled;
        if !enabled {
            self.clear_selection();
        }
    }

    pub fn toggle_selection(&mut self, chat_id: &ChatId) {
        toggle_membership(&self.selection, chat_id);
    }

    pub fn select_all(&mut self) {
        let mut selection = self.selection.borrow_mut();
        for item in &self.items {
            selection.insert(item.chat_id().clone());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.borrow_mut().clear();
    }

    pub fn is_selected(&self, chat_id: &ChatId) -> bool {
        self.selection.borrow().contains(chat_id)
    }

    pub fn selected_ids(&self) -> Vec<ChatId> {
        self.selection.borrow().iter().cloned().collect()
    }

    pub fn props_for(&self, chat_id: &ChatId) -> ItemProps {
        ItemProps {
            selection_mode: self.selection_mode,
            is_selected: self.is_selected(chat_id),
        }
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Click on a row, routed with the current selection mode.
    pub fn activate(
        &mut self,
        chat_id: &ChatId,
        event: &mut ActivationEvent,
    ) -> Option<ActivationOutcome> {
        let selection_mode = self.selection_mode;
        let item = self.item_mut(chat_id)?;
        Some(item.on_activate(event, selection_mode))
    }

    /// Snapshots of the rows whose committed description matches the search
    /// query, in list order. Drafts in progress do not affect filtering.
    pub fn views(&self) -> Vec<ItemView> {
        let normalized_query = self.search_query.trim().to_lowercase();

        self.items
            .iter()
            .map(|item| item.current_view(self.props_for(item.chat_id())))
            .filter(|view| matches_query(view, &normalized_query))
            .collect()
    }
}

fn toggle_membership(selection: &SelectionSet, chat_id: &ChatId) {
    let mut selection = selection.borrow_mut();
    if !selection.remove(chat_id) {
        selection.insert(chat_id.clone());
    }
}

fn matches_query(view: &ItemView, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    view.description.to_lowercase().contains(query)
}
