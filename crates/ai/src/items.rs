use serde::{Deserialize, Serialize};

/// Item names as sent by a client: either a list or one comma-joined string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeItems {
    List(Vec<String>),
    Joined(String),
}

impl RecipeItems {
    /// Trimmed, non-empty names in their original order.
    pub fn names(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            RecipeItems::List(items) => items.iter().map(String::as_str).collect(),
            RecipeItems::Joined(joined) => joined.split(',').collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl From<Vec<String>> for RecipeItems {
    fn from(value: Vec<String>) -> Self {
        RecipeItems::List(value)
    }
}
