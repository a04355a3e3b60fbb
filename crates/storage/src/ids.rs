use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use snafu::ensure;

use super::error::{InvalidIdSnafu, PersistenceError, PersistenceResult};

// Both ID kinds share one shape so the store and the router agree on parsing rules.
macro_rules! define_chat_id {
    ($name:ident, $id_type:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn parse(raw: &str) -> PersistenceResult<Self> {
                let trimmed = raw.trim();
                ensure!(
                    !trimmed.is_empty(),
                    InvalidIdSnafu {
                        stage: "parse-chat-id",
                        id_type: $id_type,
                        raw: raw.to_string(),
                    }
                );
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = PersistenceError;

            fn from_str(raw: &str) -> PersistenceResult<Self> {
                Self::parse(raw)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

define_chat_id!(ChatId, "chat-id");
define_chat_id!(UrlId, "url-id");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let id = ChatId::parse("  abc ").unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn blank_ids_are_rejected() {
        let error = UrlId::parse("   ").unwrap_err();
        assert!(matches!(
            error,
            PersistenceError::InvalidId {
                id_type: "url-id",
                ..
            }
        ));
    }

    #[test]
    fn deserialize_goes_through_parse() {
        let id: ChatId = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(id.to_string(), "a");
        assert!(serde_json::from_str::<ChatId>("\"\"").is_err());
    }
}
