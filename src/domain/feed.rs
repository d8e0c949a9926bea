use serde::{Deserialize, Serialize};

/// A subscribed feed, keyed by its URL.
///
/// `unread_count` is derived from the current item list and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub unread_count: usize,
}

impl Feed {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            unread_count: 0,
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}
