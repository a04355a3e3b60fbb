use std::fmt;

use chat_sidebar_storage::ChatId;

use crate::history::events::DeleteRequested;

type ChatCallback = Box<dyn FnMut(&ChatId)>;
type DeleteCallback = Box<dyn FnMut(&DeleteRequested)>;

/// Side effects a history item may trigger, each present or absent on its own.
///
/// Export is always available; the rest are opt-in. The item only decides when
/// to call them.
pub struct ItemCapabilities {
    export_chat: ChatCallback,
    on_delete: Option<DeleteCallback>,
    on_duplicate: Option<ChatCallback>,
    on_share: Option<ChatCallback>,
    on_toggle_selection: Option<ChatCallback>,
}

impl ItemCapabilities {
    pub fn new(export_chat: impl FnMut(&ChatId) + 'static) -> Self {
        Self {
            export_chat: Box::new(export_chat),
            on_delete: None,
            on_duplicate: None,
            on_share: None,
            on_toggle_selection: None,
        }
    }

    pub fn with_delete(mut self, on_delete: impl FnMut(&DeleteRequested) + 'static) -> Self {
        self.on_delete = Some(Box::new(on_delete));
        self
    }

    pub fn with_duplicate(mut self, on_duplicate: impl FnMut(&ChatId) + 'static) -> Self {
        self.on_duplicate = Some(Box::new(on_duplicate));
        self
    }

    pub fn with_share(mut self, on_share: impl FnMut(&ChatId) + 'static) -> Self {
        self.on_share = Some(Box::new(on_share));
        self
    }

    pub fn with_toggle_selection(
        mut self,
        on_toggle_selection: impl FnMut(&ChatId) + 'static,
    ) -> Self {
        self.on_toggle_selection = Some(Box::new(on_toggle_selection));
        self
    }

    pub fn supports_delete(&self) -> bool {
        self.on_delete.is_some()
    }

    pub fn supports_duplicate(&self) -> bool {
        self.on_duplicate.is_some()
    }

    pub fn supports_share(&self) -> bool {
        self.on_share.is_some()
    }

    pub fn supports_toggle_selection(&self) -> bool {
        self.on_toggle_selection.is_some()
    }

    pub fn export_chat(&mut self, chat_id: &ChatId) {
        (self.export_chat)(chat_id);
    }

    /// Returns false when the capability is absent.
    pub fn delete(&mut self, request: &DeleteRequested) -> bool {
        invoke(&mut self.on_delete, request)
    }

    pub fn duplicate(&mut self, chat_id: &ChatId) -> bool {
        invoke(&mut self.on_duplicate, chat_id)
    }

    pub fn share(&mut self, chat_id: &ChatId) -> bool {
        invoke(&mut self.on_share, chat_id)
    }

    pub fn toggle_selection(&mut self, chat_id: &ChatId) -> bool {
        invoke(&mut self.on_toggle_selection, chat_id)
    }
}

impl fmt::Debug for ItemCapabilities {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ItemCapabilities")
            .field("delete", &self.supports_delete())
            .field("duplicate", &self.supports_duplicate())
            .field("share", &self.supports_share())
            .field("toggle_selection", &self.supports_toggle_selection())
            .finish()
    }
}

fn invoke<A: ?Sized>(callback: &mut Option<Box<dyn FnMut(&A)>>, argument: &A) -> bool {
    match callback.as_mut() {
        Some(callback) => {
            callback(argument);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn absent_capabilities_report_false() {
        let mut capabilities = ItemCapabilities::new(|_| {});
        let chat_id = ChatId::parse("a").unwrap();

        assert!(!capabilities.duplicate(&chat_id));
        assert!(!capabilities.share(&chat_id));
        assert!(!capabilities.toggle_selection(&chat_id));
        assert!(!capabilities.delete(&DeleteRequested { chat_id }));
    }

    #[test]
    fn present_capabilities_receive_the_chat_id() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let exported = Rc::clone(&seen);
        let duplicated = Rc::clone(&seen);
        let mut capabilities = ItemCapabilities::new(move |id| {
            exported.borrow_mut().push(format!("export:{id}"));
        })
        .with_duplicate(move |id| duplicated.borrow_mut().push(format!("duplicate:{id}")));
        let chat_id = ChatId::parse("a").unwrap();

        capabilities.export_chat(&chat_id);
        assert!(capabilities.duplicate(&chat_id));

        assert_eq!(*seen.borrow(), vec!["export:a", "duplicate:a"]);
        assert!(format!("{capabilities:?}").contains("duplicate: true"));
    }
}
