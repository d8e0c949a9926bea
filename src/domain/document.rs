use chrono::{DateTime, FixedOffset};

/// A parsed feed as handed over by a [`FeedSource`](crate::fetcher::FeedSource).
#[derive(Debug, Clone, Default)]
pub struct FeedDocument {
    pub title: String,
    pub entries: Vec<SourceEntry>,
}

/// One entry of a [`FeedDocument`], before status is joined onto it.
#[derive(Debug, Clone, Default)]
pub struct SourceEntry {
    pub title: String,
    pub link: String,
    pub description: String,
    pub dates: EntryDates,
}

/// Every date representation a source may expose for an entry.
///
/// Parsers that already understood the timestamp fill the `*_parsed`
/// fields; the raw strings are kept for sources that could not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDates {
    pub published_parsed: Option<DateTime<FixedOffset>>,
    pub updated_parsed: Option<DateTime<FixedOffset>>,
    pub published: Option<String>,
    pub updated: Option<String>,
}
