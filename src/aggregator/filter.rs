use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Feed, FeedItem};

/// Top-level read-state selection for the index view.
///
/// The choices are exclusive; there is no "unread favorites" mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFilter {
    #[default]
    All,
    Unread,
    Favorites,
}

impl ReadFilter {
    /// Unknown values select everything.
    pub fn parse(value: &str) -> Self {
        match value {
            "unread" => Self::Unread,
            "favorites" => Self::Favorites,
            _ => Self::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unread => "unread",
            Self::Favorites => "favorites",
        }
    }

    fn keeps(&self, item: &FeedItem) -> bool {
        match self {
            Self::All => true,
            Self::Unread => !item.read,
            Self::Favorites => item.favorite,
        }
    }
}

impl fmt::Display for ReadFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the index page renders.
#[derive(Debug, Clone, Serialize)]
pub struct IndexView {
    pub feeds: Vec<Feed>,
    pub items: Vec<FeedItem>,
    pub filter: ReadFilter,
    pub current_feed_url: Option<String>,
}

/// Select items by origin feed, then by read state, keeping their order.
///
/// An empty `origin` means every feed.
pub fn filter_items(items: &[FeedItem], filter: ReadFilter, origin: Option<&str>) -> Vec<FeedItem> {
    let origin = origin.filter(|u| !u.is_empty());

    items
        .iter()
        .filter(|item| origin.map_or(true, |url| item.feed_url_origin == url))
        .filter(|item| filter.keeps(item))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_A: &str = "https://a.example.com/feed.xml";
    const FEED_B: &str = "https://b.example.com/feed.xml";

    fn item(link: &str, origin: &str, read: bool, favorite: bool) -> FeedItem {
        FeedItem {
            title: link.into(),
            link: link.into(),
            description: String::new(),
            feed_title: String::new(),
            feed_url_origin: origin.into(),
            published_time: None,
            published: String::new(),
            read,
            favorite,
        }
    }

    fn sample() -> Vec<FeedItem> {
        vec![
            item("a1", FEED_A, false, false),
            item("b1", FEED_B, true, true),
            item("a2", FEED_A, true, false),
            item("b2", FEED_B, false, true),
            item("a3", FEED_A, false, true),
        ]
    }

    fn links(items: &[FeedItem]) -> Vec<&str> {
        items.iter().map(|i| i.link.as_str()).collect()
    }

    #[test]
    fn test_all_without_origin_is_identity() {
        let items = sample();
        assert_eq!(filter_items(&items, ReadFilter::All, None), items);
    }

    #[test]
    fn test_unread_keeps_order() {
        let items = sample();
        let filtered = filter_items(&items, ReadFilter::Unread, None);
        assert_eq!(links(&filtered), vec!["a1", "b2", "a3"]);
    }

    #[test]
    fn test_favorites_ignore_read_state() {
        let items = sample();
        let filtered = filter_items(&items, ReadFilter::Favorites, None);
        assert_eq!(links(&filtered), vec!["b1", "b2", "a3"]);
    }

    #[test]
    fn test_origin_only() {
        let items = sample();
        let filtered = filter_items(&items, ReadFilter::All, Some(FEED_A));
        assert_eq!(links(&filtered), vec!["a1", "a2", "a3"]);
    }

    #[test]
    fn test_origin_then_read_state() {
        let items = sample();
        assert_eq!(
            links(&filter_items(&items, ReadFilter::Unread, Some(FEED_B))),
            vec!["b2"]
        );
        assert_eq!(
            links(&filter_items(&items, ReadFilter::Favorites, Some(FEED_A))),
            vec!["a3"]
        );
    }

    #[test]
    fn test_empty_origin_means_all_feeds() {
        let items = sample();
        assert_eq!(filter_items(&items, ReadFilter::All, Some("")).len(), 5);
    }

    #[test]
    fn test_unknown_origin_is_empty() {
        let items = sample();
        assert!(filter_items(&items, ReadFilter::All, Some("https://nope.example.com")).is_empty());
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(ReadFilter::parse("unread"), ReadFilter::Unread);
        assert_eq!(ReadFilter::parse("favorites"), ReadFilter::Favorites);
        assert_eq!(ReadFilter::parse("all"), ReadFilter::All);
        assert_eq!(ReadFilter::parse(""), ReadFilter::All);
        assert_eq!(ReadFilter::parse("Unread"), ReadFilter::All);
    }

    #[test]
    fn test_filter_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReadFilter::Favorites).unwrap(),
            "\"favorites\""
        );
        assert_eq!(ReadFilter::Unread.to_string(), "unread");
    }
}
