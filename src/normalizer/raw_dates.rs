//! Raw date text per entry.
//!
//! feed-rs only keeps the timestamps it could parse, converted to UTC. The
//! date resolver needs the text as written, both to keep the publisher's
//! offset and to show unparseable dates verbatim, so it is scanned out of
//! the body here. Entries come back in document order, the same order
//! feed-rs yields them.

use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;

static ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:item|entry)(?:\s[^>]*)?>(.*?)</(?:item|entry)>").expect("valid regex")
});

static PUBLISHED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:pubDate|published|issued|dc:date)(?:\s[^>]*)?>(.*?)</").expect("valid regex")
});

static UPDATED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:updated|modified|atom:updated|dc:modified)(?:\s[^>]*)?>(.*?)</")
        .expect("valid regex")
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDates {
    pub published: Option<String>,
    pub updated: Option<String>,
}

/// One [`RawDates`] per `<item>`/`<entry>` element. Empty for JSON feeds.
pub fn extract(body: &str) -> Vec<RawDates> {
    ENTRY
        .captures_iter(body)
        .map(|entry| {
            let inner = entry.get(1).map_or("", |m| m.as_str());
            RawDates {
                published: element_text(&PUBLISHED, inner),
                updated: element_text(&UPDATED, inner),
            }
        })
        .collect()
}

fn element_text(re: &Regex, inner: &str) -> Option<String> {
    let text = re.captures(inner)?.get(1)?.as_str().trim();
    let text = text
        .strip_prefix("<![CDATA[")
        .and_then(|t| t.strip_suffix("]]>"))
        .unwrap_or(text)
        .trim();

    (!text.is_empty()).then(|| decode_html_entities(text).to_string())
}
