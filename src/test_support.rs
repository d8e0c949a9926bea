//! Stubs shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::aggregator::Aggregator;
use crate::app::{BraidError, Result};
use crate::domain::{Feed, FeedDocument};
use crate::fetcher::{FeedSource, Fetcher, FetchingSource};
use crate::normalizer::Normalizer;
use crate::store::{SqliteStore, Store};

/// Serves canned feed bodies by URL; unknown URLs fail like a 404.
#[derive(Default)]
pub struct StaticFetcher {
    bodies: Mutex<HashMap<String, Vec<u8>>>,
    hits: Mutex<HashMap<String, usize>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(&self, url: &str, body: &str) {
        self.bodies
            .lock()
            .unwrap()
            .insert(url.to_string(), body.as_bytes().to_vec());
    }

    pub fn take_down(&self, url: &str) {
        self.bodies.lock().unwrap().remove(url);
    }

    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        *self.hits.lock().unwrap().entry(url.to_string()).or_default() += 1;
        self.bodies
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| BraidError::FeedParse(format!("no body for {url}")))
    }
}

/// Hands out prepared documents, for entries whose dates only exist as raw strings.
#[derive(Default)]
pub struct DocumentSource {
    documents: Mutex<HashMap<String, FeedDocument>>,
}

impl DocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(&self, url: &str, document: FeedDocument) {
        self.documents
            .lock()
            .unwrap()
            .insert(url.to_string(), document);
    }
}

#[async_trait]
impl FeedSource for DocumentSource {
    async fn fetch_document(&self, url: &str) -> Result<FeedDocument> {
        self.documents
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| BraidError::fetch(url, BraidError::FeedParse("unknown feed".into())))
    }
}

/// SQLite store whose reads and writes can be made to fail on demand.
pub struct FlakyStore {
    inner: SqliteStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    fail_feed_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: SqliteStore::in_memory().unwrap(),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            fail_feed_writes: AtomicBool::new(false),
        }
    }

    pub fn inner(&self) -> &SqliteStore {
        &self.inner
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Status flag writes.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Subscription writes and deletes.
    pub fn fail_feed_writes(&self, fail: bool) {
        self.fail_feed_writes.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            Err(BraidError::Database(rusqlite::Error::InvalidQuery))
        } else {
            Ok(())
        }
    }
}

impl Store for FlakyStore {
    fn load_feeds(&self) -> Result<Vec<Feed>> {
        Self::check(&self.fail_reads)?;
        self.inner.load_feeds()
    }

    fn save_feed(&self, feed: &Feed) -> Result<()> {
        Self::check(&self.fail_feed_writes)?;
        self.inner.save_feed(feed)
    }

    fn remove_feed(&self, url: &str) -> Result<()> {
        Self::check(&self.fail_feed_writes)?;
        self.inner.remove_feed(url)
    }

    fn get_read(&self, link: &str) -> Result<Option<bool>> {
        Self::check(&self.fail_reads)?;
        self.inner.get_read(link)
    }

    fn set_read(&self, link: &str, is_read: bool) -> Result<()> {
        Self::check(&self.fail_writes)?;
        self.inner.set_read(link, is_read)
    }

    fn get_favorite(&self, link: &str) -> Result<Option<bool>> {
        Self::check(&self.fail_reads)?;
        self.inner.get_favorite(link)
    }

    fn set_favorite(&self, link: &str, is_favorite: bool) -> Result<()> {
        Self::check(&self.fail_writes)?;
        self.inner.set_favorite(link, is_favorite)
    }
}

/// Minimal RSS 2.0 document: `(title, link, pubDate)` per item.
pub fn rss(title: &str, items: &[(&str, &str, Option<&str>)]) -> String {
    let items: String = items
        .iter()
        .map(|(title, link, date)| {
            let date = date
                .map(|d| format!("<pubDate>{d}</pubDate>"))
                .unwrap_or_default();
            format!("<item><title>{title}</title><link>{link}</link><guid>{link}</guid>{date}</item>")
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>{title}</title>{items}</channel></rss>"#
    )
}

/// An aggregator over an in-memory store and the given fetcher.
pub async fn aggregator_with(
    store: Arc<dyn Store + Send + Sync>,
    fetcher: Arc<StaticFetcher>,
) -> Aggregator {
    let source = FetchingSource::new(fetcher, Normalizer::new());
    Aggregator::load(store, Arc::new(source)).await.unwrap()
}
