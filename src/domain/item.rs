use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// An entry of the merged reading list.
///
/// Items are rebuilt on every refresh; `read` and `favorite` are a cache of
/// the status flags persisted under `link`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub feed_title: String,
    pub feed_url_origin: String,
    /// `None` when no date could be resolved; sorts after every real timestamp.
    pub published_time: Option<DateTime<FixedOffset>>,
    /// Display form of the publication date.
    pub published: String,
    pub read: bool,
    pub favorite: bool,
}

impl FeedItem {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> FeedItem {
        FeedItem {
            title: title.into(),
            link: "https://example.com/a".into(),
            description: String::new(),
            feed_title: "Example".into(),
            feed_url_origin: "https://example.com/feed.xml".into(),
            published_time: None,
            published: String::new(),
            read: false,
            favorite: false,
        }
    }

    #[test]
    fn test_display_title_with_title() {
        assert_eq!(item("My Article").display_title(), "My Article");
    }

    #[test]
    fn test_display_title_without_title() {
        assert_eq!(item("").display_title(), "(Untitled)");
    }

    #[test]
    fn test_missing_time_is_minimum() {
        let dated = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").ok();
        assert!(None < dated);
    }
}
