pub mod dates;
pub mod raw_dates;

use chrono::{DateTime, Utc};
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{BraidError, Result};
use crate::domain::{EntryDates, FeedDocument, SourceEntry};

use self::raw_dates::RawDates;

/// Turns raw RSS/Atom/JSON Feed bytes into a [`FeedDocument`].
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, body: &[u8]) -> Result<FeedDocument> {
        let feed = parser::parse(body).map_err(|e| BraidError::FeedParse(e.to_string()))?;

        let mut raw = raw_dates::extract(&String::from_utf8_lossy(body));
        if raw.len() != feed.entries.len() {
            if !raw.is_empty() {
                tracing::debug!(
                    "Found {} dated elements for {} entries, using parsed dates only",
                    raw.len(),
                    feed.entries.len()
                );
            }
            raw.clear();
        }
        let mut raw = raw.into_iter();

        let title = feed
            .title
            .map(|t| decode_html_entities(&t.content).to_string())
            .unwrap_or_default();

        let entries = feed
            .entries
            .into_iter()
            .map(|entry| {
                let raw = raw.next().unwrap_or_default();
                let description = entry
                    .summary
                    .map(|s| s.content)
                    .or_else(|| entry.content.and_then(|c| c.body))
                    .map(|d| decode_html_entities(&d).to_string())
                    .unwrap_or_default();

                SourceEntry {
                    title: entry
                        .title
                        .map(|t| decode_html_entities(&t.content).to_string())
                        .unwrap_or_default(),
                    link: entry
                        .links
                        .first()
                        .map(|l| l.href.clone())
                        .unwrap_or_default(),
                    description,
                    dates: entry_dates(entry.published, entry.updated, raw),
                }
            })
            .collect();

        Ok(FeedDocument { title, entries })
    }
}

/// Prefer our own reading of the raw text, which keeps the publisher's
/// offset; feed-rs's UTC value covers formats only it understands.
fn entry_dates(
    published: Option<DateTime<Utc>>,
    updated: Option<DateTime<Utc>>,
    raw: RawDates,
) -> EntryDates {
    let reparse = |text: &Option<String>| text.as_deref().and_then(dates::parse_date);

    EntryDates {
        published_parsed: reparse(&raw.published).or(published.map(|dt| dt.fixed_offset())),
        updated_parsed: reparse(&raw.updated).or(updated.map(|dt| dt.fixed_offset())),
        published: raw.published,
        updated: raw.updated,
    }
}
