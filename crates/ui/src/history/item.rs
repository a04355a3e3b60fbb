use std::rc::Rc;

use chat_sidebar_storage::{
    ChatHistoryItem, ChatId, ChatStore, Navigation, PersistenceResult, UrlId,
};

use crate::history::capabilities::ItemCapabilities;
use crate::history::edit::DescriptionEditController;
use crate::history::events::{
    ActivationEvent, ActivationOutcome, CommitOutcome, DeleteRequested, EditKey, ItemProps,
    ItemView, MenuAction,
};
use crate::history::selection::SelectionGate;
use crate::settings::SidebarSettings;
use crate::widgets::dropdown::{Dropdown, DropdownItem, MenuPlacement};

pub const DEFAULT_ROUTE_PREFIX: &str = "/chat";

/// Collaborators shared by every item in one sidebar.
#[derive(Clone)]
pub struct ItemEnvironment {
    pub store: Rc<dyn ChatStore>,
    pub navigation: Rc<dyn Navigation>,
    pub route_prefix: String,
    pub menu_placement: MenuPlacement,
}

impl ItemEnvironment {
    pub fn new(store: Rc<dyn ChatStore>, navigation: Rc<dyn Navigation>) -> Self {
        Self {
            store,
            navigation,
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            menu_placement: MenuPlacement::default(),
        }
    }

    pub fn with_settings(mut self, settings: &SidebarSettings) -> Self {
        self.route_prefix = settings.route_prefix.clone();
        self.menu_placement = settings.menu_placement();
        self
    }

    pub fn href_for(&self, url_id: &UrlId) -> String {
        format!("{}/{}", self.route_prefix.trim_end_matches('/'), url_id)
    }
}

/// Interaction controller for one row of the chat history list.
///
/// Owns the rename session and the overflow menu. Selection membership and
/// the selection-mode flag stay with the caller and arrive through
/// [`ItemProps`] or per-event arguments.
pub struct ListItemController {
    url_id: UrlId,
    edit: DescriptionEditController,
    gate: SelectionGate,
    menu: Dropdown,
    store: Rc<dyn ChatStore>,
    navigation: Rc<dyn Navigation>,
    capabilities: ItemCapabilities,
}

impl ListItemController {
    pub fn new(
        item: ChatHistoryItem,
        environment: &ItemEnvironment,
        capabilities: ItemCapabilities,
    ) -> Self {
        let href = environment.href_for(&item.url_id);
        let menu = Dropdown::new(menu_entries(&capabilities), environment.menu_placement);

        Self {
            gate: SelectionGate::new(item.id.clone(), href),
            edit: DescriptionEditController::new(item.id, item.description),
            url_id: item.url_id,
            menu,
            store: Rc::clone(&environment.store),
            navigation: Rc::clone(&environment.navigation),
            capabilities,
        }
    }

    pub fn chat_id(&self) -> &ChatId {
        self.edit.chat_id()
    }

    pub fn url_id(&self) -> &UrlId {
        &self.url_id
    }

    pub fn href(&self) -> &str {
        self.gate.href()
    }

    pub fn description(&self) -> &str {
        self.edit.description()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_editing()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn menu(&self) -> &Dropdown {
        &self.menu
    }

    pub fn capabilities(&self) -> &ItemCapabilities {
        &self.capabilities
    }

    /// True when this row is the chat shown in the main view.
    ///
    /// The router wins when it reports a route; otherwise the store's current
    /// chat decides.
    pub fn is_active(&self) -> bool {
        match self.navigation.current_route_id() {
            Some(route_id) => route_id == self.url_id,
            None => self.store.current_chat_id().as_ref() == Some(self.chat_id()),
        }
    }

    pub fn current_view(&self, props: ItemProps) -> ItemView {
        ItemView {
            chat_id: self.chat_id().clone(),
            url_id: self.url_id.clone(),
            href: self.href().to_string(),
            description: self.edit.description().to_string(),
            editing: self.edit.is_editing(),
            draft_text: self.edit.draft_text().map(str::to_string),
            menu_open: self.menu.is_open(),
            is_selected: props.is_selected,
            is_active: self.is_active(),
            selectable: props.selection_mode,
        }
    }

    pub fn on_activate(
        &mut self,
        event: &mut ActivationEvent,
        selection_mode: bool,
    ) -> ActivationOutcome {
        // The link is swapped for the rename field while editing.
        if !selection_mode && self.edit.is_editing() {
            return ActivationOutcome::Ignored;
        }

        let capabilities = &mut self.capabilities;
        self.gate.handle_primary_activation(
            event,
            selection_mode,
            |chat_id| {
                if !capabilities.toggle_selection(chat_id) {
                    tracing::debug!("no selection handler for chat {chat_id}");
                }
            },
            |href| tracing::debug!("following history link {href}"),
        )
    }

    pub fn on_checkbox_toggle(&mut self, event: &mut ActivationEvent) -> ActivationOutcome {
        let capabilities = &mut self.capabilities;
        self.gate.handle_checkbox_toggle(event, |chat_id| {
            capabilities.toggle_selection(chat_id);
        })
    }

    /// Click on the "more" trigger; never reaches the row link.
    pub fn on_menu_trigger(&mut self, event: &mut ActivationEvent) {
        event.prevent_default();
        event.stop_propagation();
        self.menu.trigger();
    }

    /// Open-state change reported by the overlay itself (outside click, escape).
    pub fn on_menu_open_change(&mut self, open: bool) {
        self.menu.visibility_mut().set_open(open);
    }

    pub fn on_container_visibility_changed(&mut self, container_open: bool) {
        self.menu
            .visibility_mut()
            .on_container_visibility_changed(container_open);
    }

    /// Runs the entry at `index` of the open menu.
    pub fn on_menu_select(
        &mut self,
        index: usize,
        event: &mut ActivationEvent,
    ) -> Option<MenuAction> {
        let action = self.menu.select(index)?;
        self.dispatch_menu_action(action, event);
        Some(action)
    }

    /// Dispatches a menu action directly; returns false when the item lacks
    /// the capability behind it.
    pub fn dispatch_menu_action(
        &mut self,
        action: MenuAction,
        event: &mut ActivationEvent,
    ) -> bool {
        match action {
            MenuAction::Download => {
                self.on_export_requested();
                true
            }
            MenuAction::Share => self.on_share_requested(),
            MenuAction::Duplicate => self.on_duplicate_requested(),
            MenuAction::Rename => {
                self.on_rename();
                true
            }
            MenuAction::Delete => self.on_delete_requested(event),
        }
    }

    pub fn on_rename(&mut self) {
        self.menu.visibility_mut().set_open(false);
        self.edit.enter_edit();
    }

    pub fn on_draft_changed(&mut self, text: impl Into<String>) {
        self.edit.update_draft(text);
    }

    pub fn on_key(&mut self, key: EditKey) -> PersistenceResult<Option<CommitOutcome>> {
        let sync = self.is_active();
        self.edit.handle_key(key, self.store.as_ref(), sync)
    }

    pub fn on_blur(&mut self) -> PersistenceResult<CommitOutcome> {
        let sync = self.is_active();
        self.edit.cancel_via_blur(self.store.as_ref(), sync)
    }

    pub fn on_submit(&mut self) -> PersistenceResult<CommitOutcome> {
        let sync = self.is_active();
        self.edit.submit(self.store.as_ref(), sync)
    }

    /// Pushes a description changed elsewhere (another window, a sync job).
    pub fn on_description_synced(&mut self, description: impl Into<String>) {
        self.edit.sync_description(description);
    }

    pub fn on_delete_requested(&mut self, event: &mut ActivationEvent) -> bool {
        event.prevent_default();
        event.stop_propagation();
        self.menu.visibility_mut().set_open(false);

        let request = DeleteRequested {
            chat_id: self.chat_id().clone(),
        };
        self.capabilities.delete(&request)
    }

    pub fn on_duplicate_requested(&mut self) -> bool {
        self.menu.visibility_mut().set_open(false);
        let chat_id = self.chat_id().clone();
        self.capabilities.duplicate(&chat_id)
    }

    pub fn on_export_requested(&mut self) {
        self.menu.visibility_mut().set_open(false);
        let chat_id = self.chat_id().clone();
        self.capabilities.export_chat(&chat_id);
    }

    pub fn on_share_requested(&mut self) -> bool {
        self.menu.visibility_mut().set_open(false);
        let chat_id = self.chat_id().clone();
        self.capabilities.share(&chat_id)
    }
}

fn menu_entries(capabilities: &ItemCapabilities) -> Vec<DropdownItem> {
    let mut entries = vec![DropdownItem::new(MenuAction::Download)];
    if capabilities.supports_share() {
        entries.push(DropdownItem::new(MenuAction::Share));
    }
    if capabilities.supports_duplicate() {
        entries.push(DropdownItem::new(MenuAction::Duplicate));
    }
    entries.push(DropdownItem::new(MenuAction::Rename));
    if capabilities.supports_delete() {
        entries.push(DropdownItem::new(MenuAction::Delete).destructive());
    }
    entries
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chat_sidebar_storage::{DescriptionWrite, MemoryChatStore, MemoryNavigation};

    use super::*;
    use crate::widgets::dropdown::MenuAlign;

    #[derive(Default)]
    struct Effects {
        log: RefCell<Vec<String>>,
    }

    impl Effects {
        fn push(&self, entry: String) {
            self.log.borrow_mut().push(entry);
        }

        fn entries(&self) -> Vec<String> {
            self.log.borrow().clone()
        }
    }

    struct Fixture {
        store: Rc<MemoryChatStore>,
        navigation: Rc<MemoryNavigation>,
        effects: Rc<Effects>,
        item: ListItemController,
    }

    fn trip_plan() -> ChatHistoryItem {
        ChatHistoryItem::new(
            ChatId::parse("a").unwrap(),
            UrlId::parse("u1").unwrap(),
            "Trip plan",
        )
    }

    fn full_capabilities(effects: &Rc<Effects>) -> ItemCapabilities {
        let export = Rc::clone(effects);
        let delete = Rc::clone(effects);
        let duplicate = Rc::clone(effects);
        let share = Rc::clone(effects);
        let toggle = Rc::clone(effects);
        ItemCapabilities::new(move |id| export.push(format!("export:{id}")))
            .with_delete(move |request| delete.push(format!("delete:{}", request.chat_id)))
            .with_duplicate(move |id| duplicate.push(format!("duplicate:{id}")))
            .with_share(move |id| share.push(format!("share:{id}")))
            .with_toggle_selection(move |id| toggle.push(format!("toggle:{id}")))
    }

    fn fixture_with_route(route: Option<&str>) -> Fixture {
        let store = Rc::new(MemoryChatStore::with_chats([trip_plan()]));
        let navigation = Rc::new(MemoryNavigation::new(
            route.map(|raw| UrlId::parse(raw).unwrap()),
        ));
        let effects = Rc::new(Effects::default());
        let environment = ItemEnvironment::new(store.clone(), navigation.clone());
        let item =
            ListItemController::new(trip_plan(), &environment, full_capabilities(&effects));

        Fixture {
            store,
            navigation,
            effects,
            item,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_route(Some("u2"))
    }

    #[test]
    fn rename_via_enter_updates_snapshot_and_store_once() {
        let mut fixture = fixture();

        fixture.item.on_rename();
        fixture.item.on_draft_changed("Trip plan v2");
        let outcome = fixture.item.on_key(EditKey::Enter).unwrap();

        let view = fixture.item.current_view(ItemProps::default());
        assert_eq!(
            outcome,
            Some(CommitOutcome::Committed("Trip plan v2".to_string()))
        );
        assert_eq!(view.description, "Trip plan v2");
        assert!(!view.editing);
        assert_eq!(view.draft_text, None);
        assert_eq!(
            fixture.store.writes(),
            vec![DescriptionWrite {
                chat_id: ChatId::parse("a").unwrap(),
                description: "Trip plan v2".to_string(),
            }]
        );
    }

    #[test]
    fn selection_mode_click_toggles_without_navigation() {
        let mut fixture = fixture();
        let mut event = ActivationEvent::new();
        let props = ItemProps {
            selection_mode: true,
            is_selected: false,
        };

        let outcome = fixture.item.on_activate(&mut event, props.selection_mode);

        assert_eq!(
            outcome,
            ActivationOutcome::SelectionToggled(ChatId::parse("a").unwrap())
        );
        assert_eq!(fixture.effects.entries(), vec!["toggle:a"]);
        assert!(event.is_default_prevented());
        assert!(!fixture.item.current_view(props).is_selected);
    }

    #[test]
    fn browse_mode_click_follows_link() {
        let mut fixture = fixture();
        let mut event = ActivationEvent::new();

        let outcome = fixture.item.on_activate(&mut event, false);

        assert_eq!(
            outcome,
            ActivationOutcome::Navigated {
                href: "/chat/u1".to_string()
            }
        );
        assert!(fixture.effects.entries().is_empty());
        assert!(!event.is_default_prevented());
    }

    #[test]
    fn click_while_renaming_is_ignored_outside_selection_mode() {
        let mut fixture = fixture();
        fixture.item.on_rename();

        let outcome = fixture.item.on_activate(&mut ActivationEvent::new(), false);
        assert_eq!(outcome, ActivationOutcome::Ignored);

        let outcome = fixture.item.on_activate(&mut ActivationEvent::new(), true);
        assert!(matches!(outcome, ActivationOutcome::SelectionToggled(_)));
    }

    #[test]
    fn container_collapse_closes_open_menu() {
        let mut fixture = fixture();
        let mut event = ActivationEvent::new();
        fixture.item.on_menu_trigger(&mut event);
        assert!(fixture.item.current_view(ItemProps::default()).menu_open);
        assert!(event.is_propagation_stopped());

        fixture.item.on_container_visibility_changed(false);
        assert!(!fixture.item.current_view(ItemProps::default()).menu_open);

        fixture.item.on_container_visibility_changed(true);
        assert!(!fixture.item.is_menu_open());
    }

    #[test]
    fn menu_cannot_open_while_container_collapsed() {
        let mut fixture = fixture();
        fixture.item.on_container_visibility_changed(false);

        let mut event = ActivationEvent::new();
        fixture.item.on_menu_trigger(&mut event);
        assert!(!fixture.item.is_menu_open());
        assert!(event.is_default_prevented());

        fixture.item.on_menu_open_change(true);
        assert!(!fixture.item.current_view(ItemProps::default()).menu_open);
        assert_eq!(
            fixture.item.on_menu_select(0, &mut ActivationEvent::new()),
            None
        );
        assert!(fixture.effects.entries().is_empty());
    }

    #[test]
    fn snapshot_keeps_committed_description_apart_from_draft() {
        let mut fixture = fixture();
        fixture.item.on_rename();
        fixture.item.on_draft_changed("zzz");

        let view = fixture.item.current_view(ItemProps::default());
        assert_eq!(view.description, "Trip plan");
        assert_eq!(view.draft_text.as_deref(), Some("zzz"));
        assert!(fixture.store.writes().is_empty());
    }

    #[test]
    fn menu_actions_forward_to_capabilities_and_close_menu() {
        let mut fixture = fixture();

        for action in [
            MenuAction::Download,
            MenuAction::Share,
            MenuAction::Duplicate,
            MenuAction::Delete,
        ] {
            fixture.item.on_menu_open_change(true);
            let index = fixture.item.menu().position_of(action).unwrap();
            let picked = fixture
                .item
                .on_menu_select(index, &mut ActivationEvent::new());
            assert_eq!(picked, Some(action));
            assert!(!fixture.item.is_menu_open());
        }

        assert_eq!(
            fixture.effects.entries(),
            vec!["export:a", "share:a", "duplicate:a", "delete:a"]
        );
    }

    #[test]
    fn rename_entry_starts_editing_with_current_description() {
        let mut fixture = fixture();
        fixture.item.on_menu_open_change(true);
        let index = fixture.item.menu().position_of(MenuAction::Rename).unwrap();

        fixture
            .item
            .on_menu_select(index, &mut ActivationEvent::new());

        let view = fixture.item.current_view(ItemProps::default());
        assert!(view.editing);
        assert_eq!(view.draft_text.as_deref(), Some("Trip plan"));
        assert!(!view.menu_open);
    }

    #[test]
    fn menu_entries_follow_capabilities() {
        let store = Rc::new(MemoryChatStore::with_chats([trip_plan()]));
        let navigation = Rc::new(MemoryNavigation::default());
        let environment = ItemEnvironment::new(store, navigation);
        let item =
            ListItemController::new(trip_plan(), &environment, ItemCapabilities::new(|_| {}));

        let actions = item
            .menu()
            .items()
            .iter()
            .map(|entry| entry.action)
            .collect::<Vec<_>>();
        assert_eq!(actions, vec![MenuAction::Download, MenuAction::Rename]);
        assert!(!item.capabilities().supports_delete());
    }

    #[test]
    fn missing_capability_reports_not_dispatched() {
        let store = Rc::new(MemoryChatStore::with_chats([trip_plan()]));
        let environment = ItemEnvironment::new(store, Rc::new(MemoryNavigation::default()));
        let mut item =
            ListItemController::new(trip_plan(), &environment, ItemCapabilities::new(|_| {}));

        assert!(!item.dispatch_menu_action(MenuAction::Duplicate, &mut ActivationEvent::new()));
        assert!(!item.on_delete_requested(&mut ActivationEvent::new()));
    }

    #[test]
    fn active_rename_updates_global_title() {
        let mut fixture = fixture_with_route(Some("u1"));
        assert!(fixture.item.current_view(ItemProps::default()).is_active);

        fixture.item.on_rename();
        fixture.item.on_draft_changed("Shared title");
        fixture.item.on_blur().unwrap();

        assert_eq!(
            fixture.store.current_description().as_deref(),
            Some("Shared title")
        );
    }

    #[test]
    fn inactive_rename_leaves_global_title_alone() {
        let mut fixture = fixture();
        fixture.item.on_rename();
        fixture.item.on_draft_changed("Local only");
        fixture.item.on_submit().unwrap();

        assert_eq!(fixture.store.current_description(), None);
        assert_eq!(fixture.store.writes().len(), 1);
    }

    #[test]
    fn active_falls_back_to_store_without_route() {
        let fixture = fixture_with_route(None);
        assert!(!fixture.item.is_active());

        fixture
            .store
            .set_current_chat(Some(ChatId::parse("a").unwrap()));
        assert!(fixture.item.is_active());

        fixture
            .navigation
            .navigate_to(Some(UrlId::parse("u9").unwrap()));
        assert!(!fixture.item.is_active());
    }

    #[test]
    fn settings_shape_href_and_menu_placement() {
        let settings = SidebarSettings {
            route_prefix: "/c/".to_string(),
            ..SidebarSettings::default()
        };
        let store = Rc::new(MemoryChatStore::with_chats([trip_plan()]));
        let environment = ItemEnvironment::new(store, Rc::new(MemoryNavigation::default()))
            .with_settings(&settings);
        let item =
            ListItemController::new(trip_plan(), &environment, ItemCapabilities::new(|_| {}));

        assert_eq!(item.href(), "/c/u1");
        assert_eq!(item.menu().placement().align, MenuAlign::Start);
        assert_eq!(item.menu().placement().side_offset, 8);
    }
}
