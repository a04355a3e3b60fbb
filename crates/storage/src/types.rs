use serde::{Deserialize, Serialize};

use super::ids::{ChatId, UrlId};

/// Label shown for chats that never received a description.
pub const DEFAULT_CHAT_DESCRIPTION: &str = "New Chat";

/// One saved conversation as listed in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredChatHistoryItem")]
pub struct ChatHistoryItem {
    pub id: ChatId,
    pub url_id: UrlId,
    pub description: String,
}

/// Wire shape; converted through [`ChatHistoryItem::new`] so blank
/// descriptions get the default label.
#[derive(Deserialize)]
struct StoredChatHistoryItem {
    id: ChatId,
    url_id: UrlId,
    #[serde(default)]
    description: String,
}

impl From<StoredChatHistoryItem> for ChatHistoryItem {
    fn from(stored: StoredChatHistoryItem) -> Self {
        Self::new(stored.id, stored.url_id, stored.description)
    }
}

impl ChatHistoryItem {
    pub fn new(id: ChatId, url_id: UrlId, description: impl Into<String>) -> Self {
        let mut description = description.into();
        if description.trim().is_empty() {
            description = DEFAULT_CHAT_DESCRIPTION.to_string();
        }

        Self {
            id,
            url_id,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_or_missing_description_gets_default_label() {
        for raw in [
            r#"{ "id": "a", "url_id": "u1", "description": "  " }"#,
            r#"{ "id": "a", "url_id": "u1" }"#,
        ] {
            let item: ChatHistoryItem = serde_json::from_str(raw).unwrap();
            assert_eq!(item.description, DEFAULT_CHAT_DESCRIPTION);
        }

        let item: ChatHistoryItem =
            serde_json::from_str(r#"{ "id": "a", "url_id": "u1", "description": "Trip plan" }"#)
                .unwrap();
        assert_eq!(item.description, "Trip plan");
    }
}
