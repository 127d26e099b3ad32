use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifiers handed to us by the quest/profile source are opaque strings
/// (hex object ids in practice). We never parse or generate them.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(QuestId);
define_id!(ProfileId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = QuestId::from("5936d90786f7742b1420ba5b");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"5936d90786f7742b1420ba5b\"");

        let back: QuestId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn display_matches_inner_value() {
        let id = ProfileId::new("pmc-1");
        assert_eq!(id.to_string(), "pmc-1");
        assert_eq!(id.as_str(), "pmc-1");
    }
}
