use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chat_sidebar_storage::{ChatHistoryItem, ChatId, MemoryChatStore, MemoryNavigation, UrlId};
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt, Snafu};

use crate::history::{
    ActivationEvent, EditKey, HistorySidebar, ItemCapabilities, ItemEnvironment, ItemView,
    ListItemController, MenuAction,
};
use crate::settings::SidebarSettings;

/// Scripted session: the initial chats plus the user events to feed through.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub chats: Vec<ChatHistoryItem>,
    #[serde(default)]
    pub current_route: Option<UrlId>,
    #[serde(default)]
    pub current_chat: Option<ChatId>,
    /// Number of description writes the store rejects before accepting again.
    #[serde(default)]
    pub failing_writes: usize,
    pub events: Vec<ReplayEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplayEvent {
    Rename { chat: ChatId },
    Draft { chat: ChatId, text: String },
    Enter { chat: ChatId },
    Blur { chat: ChatId },
    Submit { chat: ChatId },
    Activate { chat: ChatId },
    Checkbox { chat: ChatId },
    MenuTrigger { chat: ChatId },
    MenuDismiss { chat: ChatId },
    Menu { chat: ChatId, action: MenuAction },
    Sidebar { open: bool },
    SelectionMode { enabled: bool },
    Search { query: String },
    Navigate { route: Option<UrlId> },
}

/// State after one replayed event.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayFrame {
    pub step: usize,
    pub outcome: Option<String>,
    pub error: Option<String>,
    pub effects: Vec<String>,
    pub sidebar_open: bool,
    pub selected: Vec<ChatId>,
    pub items: Vec<ItemView>,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ReplayError {
    #[snafu(display("failed to read replay script at {path:?} on `{stage}`: {source}"))]
    ReadScript {
        stage: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("failed to parse replay script on `{stage}`: {source}"))]
    ParseScript {
        stage: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("step {step} references unknown chat '{chat}'"))]
    UnknownChat {
        stage: &'static str,
        step: usize,
        chat: String,
    },
    #[snafu(display("failed to encode replay frame on `{stage}`: {source}"))]
    EncodeFrame {
        stage: &'static str,
        source: serde_json::Error,
    },
}

pub type ReplayResult<T> = Result<T, ReplayError>;

pub fn load_script(path: &Path) -> ReplayResult<ReplayScript> {
    let raw = std::fs::read_to_string(path).context(ReadScriptSnafu {
        stage: "read-replay-script",
        path: path.to_path_buf(),
    })?;
    parse_script(&raw)
}

pub fn parse_script(raw: &str) -> ReplayResult<ReplayScript> {
    serde_json::from_str(raw).context(ParseScriptSnafu {
        stage: "parse-replay-script",
    })
}

pub fn encode_frame(frame: &ReplayFrame) -> ReplayResult<String> {
    serde_json::to_string(frame).context(EncodeFrameSnafu {
        stage: "encode-replay-frame",
    })
}

/// Replays every event against an in-memory store and returns one frame per event.
pub fn run_script(
    script: ReplayScript,
    settings: &SidebarSettings,
) -> ReplayResult<Vec<ReplayFrame>> {
    let store = Rc::new(MemoryChatStore::with_chats(script.chats.clone()));
    store.set_current_chat(script.current_chat);
    store.fail_next_writes(script.failing_writes);
    let navigation = Rc::new(MemoryNavigation::new(script.current_route));
    let environment =
        ItemEnvironment::new(store.clone(), navigation.clone()).with_settings(settings);

    let effects = Rc::new(RefCell::new(Vec::new()));
    let mut sidebar = HistorySidebar::new(environment);
    for chat in script.chats {
        sidebar.push_item(chat, recording_capabilities(&effects));
    }

    let mut frames = Vec::with_capacity(script.events.len());
    for (step, event) in script.events.into_iter().enumerate() {
        tracing::debug!("replaying step {step}: {event:?}");
        let (outcome, error) = apply_event(&mut sidebar, &navigation, step, event)?;
        if let Some(error) = &error {
            tracing::warn!("step {step} failed: {error}");
        }

        frames.push(ReplayFrame {
            step,
            outcome,
            error,
            effects: effects.borrow_mut().drain(..).collect(),
            sidebar_open: sidebar.is_open(),
            selected: sidebar.selected_ids(),
            items: sidebar.views(),
        });
    }

    Ok(frames)
}

type StepResult = (Option<String>, Option<String>);

fn apply_event(
    sidebar: &mut HistorySidebar,
    navigation: &MemoryNavigation,
    step: usize,
    event: ReplayEvent,
) -> ReplayResult<StepResult> {
    let mut activation = ActivationEvent::new();

    let result = match event {
        ReplayEvent::Sidebar { open } => {
            sidebar.set_open(open);
            (None, None)
        }
        ReplayEvent::SelectionMode { enabled } => {
            sidebar.set_selection_mode(enabled);
            (None, None)
        }
        ReplayEvent::Search { query } => {
            sidebar.set_search_query(query);
            (None, None)
        }
        ReplayEvent::Navigate { route } => {
            navigation.navigate_to(route);
            (None, None)
        }
        ReplayEvent::Activate { chat } => {
            let outcome = sidebar
                .activate(&chat, &mut activation)
                .context(UnknownChatSnafu {
                    stage: "replay-activate",
                    step,
                    chat: chat.to_string(),
                })?;
            (Some(format!("{outcome:?}")), None)
        }
        ReplayEvent::Rename { chat } => {
            item(sidebar, &chat, step)?.on_rename();
            (None, None)
        }
        ReplayEvent::Draft { chat, text } => {
            item(sidebar, &chat, step)?.on_draft_changed(text);
            (None, None)
        }
        ReplayEvent::Enter { chat } => {
            describe(item(sidebar, &chat, step)?.on_key(EditKey::Enter))
        }
        ReplayEvent::Blur { chat } => describe(item(sidebar, &chat, step)?.on_blur()),
        ReplayEvent::Submit { chat } => describe(item(sidebar, &chat, step)?.on_submit()),
        ReplayEvent::Checkbox { chat } => {
            let outcome = item(sidebar, &chat, step)?.on_checkbox_toggle(&mut activation);
            (Some(format!("{outcome:?}")), None)
        }
        ReplayEvent::MenuTrigger { chat } => {
            item(sidebar, &chat, step)?.on_menu_trigger(&mut activation);
            (None, None)
        }
        ReplayEvent::MenuDismiss { chat } => {
            item(sidebar, &chat, step)?.on_menu_open_change(false);
            (None, None)
        }
        ReplayEvent::Menu { chat, action } => {
            let dispatched =
                item(sidebar, &chat, step)?.dispatch_menu_action(action, &mut activation);
            (Some(format!("{action:?} dispatched={dispatched}")), None)
        }
    };

    Ok(result)
}

fn item<'a>(
    sidebar: &'a mut HistorySidebar,
    chat: &ChatId,
    step: usize,
) -> ReplayResult<&'a mut ListItemController> {
    sidebar.item_mut(chat).context(UnknownChatSnafu {
        stage: "replay-item-lookup",
        step,
        chat: chat.to_string(),
    })
}

fn describe<T: std::fmt::Debug, E: std::fmt::Display>(result: Result<T, E>) -> StepResult {
    match result {
        Ok(outcome) => (Some(format!("{outcome:?}")), None),
        Err(error) => (None, Some(error.to_string())),
    }
}

fn recording_capabilities(effects: &Rc<RefCell<Vec<String>>>) -> ItemCapabilities {
    let export = Rc::clone(effects);
    let delete = Rc::clone(effects);
    let duplicate = Rc::clone(effects);
    let share = Rc::clone(effects);

    ItemCapabilities::new(move |chat_id| export.borrow_mut().push(format!("export:{chat_id}")))
        .with_delete(move |request| {
            delete
                .borrow_mut()
                .push(format!("delete:{}", request.chat_id))
        })
        .with_duplicate(move |chat_id| {
            duplicate
                .borrow_mut()
                .push(format!("duplicate:{chat_id}"))
        })
        .with_share(move |chat_id| share.borrow_mut().push(format!("share:{chat_id}")))
}
