use chat_sidebar_storage::ChatId;

use crate::history::events::{ActivationEvent, ActivationOutcome};

/// Routes a primary activation to either navigation or selection toggling.
///
/// The mode is passed with every event rather than stored, so a mode switch
/// between two events can never leave a stale decision behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionGate {
    chat_id: ChatId,
    href: String,
}

impl SelectionGate {
    pub fn new(chat_id: ChatId, href: impl Into<String>) -> Self {
        Self {
            chat_id,
            href: href.into(),
        }
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn handle_primary_activation<T, N>(
        &self,
        event: &mut ActivationEvent,
        selection_mode: bool,
        on_toggle: T,
        on_navigate: N,
    ) -> ActivationOutcome
    where
        T: FnOnce(&ChatId),
        N: FnOnce(&str),
    {
        if selection_mode {
            event.prevent_default();
            event.stop_propagation();
            on_toggle(&self.chat_id);
            return ActivationOutcome::SelectionToggled(self.chat_id.clone());
        }

        on_navigate(&self.href);
        ActivationOutcome::Navigated {
            href: self.href.clone(),
        }
    }

    /// The checkbox swallows the event so the row link never sees it.
    pub fn handle_checkbox_toggle<T>(
        &self,
        event: &mut ActivationEvent,
        on_toggle: T,
    ) -> ActivationOutcome
    where
        T: FnOnce(&ChatId),
    {
        event.stop_propagation();
        on_toggle(&self.chat_id);
        ActivationOutcome::SelectionToggled(self.chat_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn gate() -> SelectionGate {
        SelectionGate::new(ChatId::parse("a").unwrap(), "/chat/u1")
    }

    #[derive(Default)]
    struct Calls {
        toggles: RefCell<Vec<ChatId>>,
        navigations: RefCell<Vec<String>>,
    }

    impl Calls {
        fn activate(
            &self,
            gate: &SelectionGate,
            selection_mode: bool,
        ) -> (ActivationEvent, ActivationOutcome) {
            let mut event = ActivationEvent::new();
            let outcome = gate.handle_primary_activation(
                &mut event,
                selection_mode,
                |id| self.toggles.borrow_mut().push(id.clone()),
                |href| self.navigations.borrow_mut().push(href.to_string()),
            );
            (event, outcome)
        }
    }

    #[test]
    fn selection_mode_toggles_and_suppresses_navigation() {
        let calls = Calls::default();
        let (event, outcome) = calls.activate(&gate(), true);

        assert_eq!(
            outcome,
            ActivationOutcome::SelectionToggled(ChatId::parse("a").unwrap())
        );
        assert_eq!(calls.toggles.borrow().len(), 1);
        assert!(calls.navigations.borrow().is_empty());
        assert!(event.is_default_prevented());
        assert!(event.is_propagation_stopped());
    }

    #[test]
    fn browse_mode_navigates_without_toggling() {
        let calls = Calls::default();
        let (event, outcome) = calls.activate(&gate(), false);

        assert_eq!(
            outcome,
            ActivationOutcome::Navigated {
                href: "/chat/u1".to_string()
            }
        );
        assert!(calls.toggles.borrow().is_empty());
        assert_eq!(*calls.navigations.borrow(), vec!["/chat/u1".to_string()]);
        assert!(!event.is_default_prevented());
        assert!(!event.is_propagation_stopped());
    }

    #[test]
    fn mode_is_read_per_event() {
        let calls = Calls::default();
        let gate = gate();

        calls.activate(&gate, true);
        calls.activate(&gate, false);
        calls.activate(&gate, true);

        assert_eq!(calls.toggles.borrow().len(), 2);
        assert_eq!(calls.navigations.borrow().len(), 1);
    }

    #[test]
    fn checkbox_always_toggles_and_stops_propagation() {
        let toggles = RefCell::new(0);
        let mut event = ActivationEvent::new();

        gate().handle_checkbox_toggle(&mut event, |_| *toggles.borrow_mut() += 1);

        assert_eq!(*toggles.borrow(), 1);
        assert!(event.is_propagation_stopped());
        assert!(!event.is_default_prevented());
    }
}
