use serde::{Deserialize, Serialize};

/// Stored movie record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: Option<String>,
    pub title: String,
}

impl Movie {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
        }
    }
}
