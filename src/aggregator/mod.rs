//! The aggregation engine.
//!
//! [`Aggregator`] owns the subscribed feeds and the merged item list. Items
//! are never persisted: every refresh discards the list and rebuilds it from
//! freshly fetched documents, joining the persisted read/favorite flags back
//! on by link. All methods take `&self`/`&mut self`; share an engine between
//! tasks through [`SharedAggregator`].

pub mod filter;
pub mod shared;

use std::sync::Arc;

use crate::app::{BraidError, Result};
use crate::domain::{Feed, FeedDocument, FeedItem};
use crate::fetcher::FeedSource;
use crate::normalizer::dates;
use crate::store::{StatusStore, Store};

pub use filter::{filter_items, IndexView, ReadFilter};
pub use shared::SharedAggregator;

/// Result of [`Aggregator::subscribe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Added(Feed),
    /// The URL was already subscribed; nothing changed.
    AlreadySubscribed,
}

pub struct Aggregator {
    store: Arc<dyn Store + Send + Sync>,
    status: StatusStore,
    source: Arc<dyn FeedSource + Send + Sync>,
    feeds: Vec<Feed>,
    items: Vec<FeedItem>,
}

impl Aggregator {
    /// Engine over the given subscriptions with an empty item list.
    pub fn new(
        store: Arc<dyn Store + Send + Sync>,
        source: Arc<dyn FeedSource + Send + Sync>,
        feeds: Vec<Feed>,
    ) -> Self {
        Self {
            status: StatusStore::new(store.clone()),
            store,
            source,
            feeds,
            items: Vec::new(),
        }
    }

    /// Load persisted subscriptions and run a first refresh.
    pub async fn load(
        store: Arc<dyn Store + Send + Sync>,
        source: Arc<dyn FeedSource + Send + Sync>,
    ) -> Result<Self> {
        let feeds = store.load_feeds()?;
        tracing::info!("Loaded {} subscriptions", feeds.len());

        let mut aggregator = Self::new(store, source, feeds);
        aggregator.refresh().await;
        Ok(aggregator)
    }

    pub fn feeds(&self) -> &[Feed] {
        &self.feeds
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    /// Rebuild the item list from every subscribed feed, in subscription order.
    ///
    /// A feed that fails to fetch is logged and skipped; its items are absent
    /// until a later refresh succeeds.
    pub async fn refresh(&mut self) {
        let mut items = Vec::new();
        let mut failed = 0;

        for feed in &self.feeds {
            match self.source.fetch_document(&feed.url).await {
                Ok(document) => items.extend(self.materialize(&document, &feed.url)),
                Err(e) => {
                    failed += 1;
                    tracing::warn!("Error refreshing feed {}: {}", feed.url, e);
                }
            }
        }

        self.items = items;
        self.sort_items();
        self.update_unread_counts();

        tracing::info!(
            "Refreshed {} feeds: {} items, {} failed",
            self.feeds.len(),
            self.items.len(),
            failed
        );
    }

    /// Subscribe to `url`.
    ///
    /// If saving the subscription fails the feed stays in memory without
    /// items and the persistence error is returned.
    pub async fn subscribe(&mut self, url: &str) -> Result<SubscribeOutcome> {
        let document = self.source.fetch_document(url).await?;

        if self.feeds.iter().any(|f| f.url == url) {
            tracing::debug!("Already subscribed to {}", url);
            return Ok(SubscribeOutcome::AlreadySubscribed);
        }

        let feed = Feed::new(url, document.title.clone());
        self.feeds.push(feed.clone());

        self.store.save_feed(&feed).map_err(|e| {
            tracing::error!("Error saving feed {}: {}", url, e);
            BraidError::persistence(url, e)
        })?;

        let items = self.materialize(&document, url);
        tracing::info!("Subscribed to {} ({} items)", feed.display_title(), items.len());

        self.items.extend(items);
        self.sort_items();
        self.update_unread_counts();

        let added = self
            .feeds
            .iter()
            .find(|f| f.url == url)
            .cloned()
            .unwrap_or(feed);
        Ok(SubscribeOutcome::Added(added))
    }

    /// Drop the subscription for `url`, then refresh every remaining feed.
    ///
    /// The in-memory removal stands even if the store delete fails; the
    /// error is returned after the refresh.
    pub async fn unsubscribe(&mut self, url: &str) -> Result<()> {
        let mut outcome = Ok(());

        match self.feeds.iter().position(|f| f.url == url) {
            Some(pos) => {
                self.feeds.remove(pos);
                if let Err(e) = self.store.remove_feed(url) {
                    tracing::error!("Error removing feed {} from store: {}", url, e);
                    outcome = Err(BraidError::persistence(url, e));
                } else {
                    tracing::info!("Unsubscribed from {}", url);
                }
            }
            None => tracing::debug!("Not subscribed to {}", url),
        }

        self.refresh().await;
        outcome
    }

    /// Flip the read flag of `link`, returning the new value.
    ///
    /// Memory is only updated once the store accepted the write.
    pub fn toggle_read(&mut self, link: &str) -> Result<bool> {
        let read = !self.status.get_read(link);
        self.status
            .set_read(link, read)
            .map_err(|e| BraidError::persistence(link, e))?;

        if let Some(item) = self.items.iter_mut().find(|i| i.link == link) {
            item.read = read;
        }
        self.update_unread_counts();

        Ok(read)
    }

    /// Flip the favorite flag of `link`, returning the new value.
    pub fn toggle_favorite(&mut self, link: &str) -> Result<bool> {
        let favorite = !self.status.get_favorite(link);
        self.status
            .set_favorite(link, favorite)
            .map_err(|e| BraidError::persistence(link, e))?;

        if let Some(item) = self.items.iter_mut().find(|i| i.link == link) {
            item.favorite = favorite;
        }

        Ok(favorite)
    }

    /// Mark every unread item as read and return how many were flipped.
    ///
    /// A failed write is logged and the item is still marked read in memory.
    pub fn mark_all_read(&mut self) -> usize {
        let mut marked = 0;

        for item in self.items.iter_mut().filter(|i| !i.read) {
            if let Err(e) = self.status.set_read(&item.link, true) {
                tracing::warn!("Error marking {} as read: {}", item.link, e);
            }
            item.read = true;
            marked += 1;
        }

        self.update_unread_counts();
        marked
    }

    /// Feeds plus the filtered item list, as shown by the index page.
    pub fn view(&self, filter: ReadFilter, origin: Option<&str>) -> IndexView {
        let origin = origin.filter(|u| !u.is_empty());
        IndexView {
            feeds: self.feeds.clone(),
            items: filter_items(&self.items, filter, origin),
            filter,
            current_feed_url: origin.map(String::from),
        }
    }

    fn materialize(&self, document: &FeedDocument, origin: &str) -> Vec<FeedItem> {
        document
            .entries
            .iter()
            .map(|entry| {
                let date = dates::resolve(&entry.dates);
                FeedItem {
                    title: entry.title.clone(),
                    link: entry.link.clone(),
                    description: entry.description.clone(),
                    feed_title: document.title.clone(),
                    feed_url_origin: origin.to_string(),
                    published_time: date.time,
                    published: date.display,
                    read: self.status.get_read(&entry.link),
                    favorite: self.status.get_favorite(&entry.link),
                }
            })
            .collect()
    }

    /// Newest first. Equal timestamps keep whatever order the unstable sort leaves.
    fn sort_items(&mut self) {
        self.items
            .sort_unstable_by(|a, b| b.published_time.cmp(&a.published_time));
    }

    fn update_unread_counts(&mut self) {
        for feed in &mut self.feeds {
            feed.unread_count = 0;
        }

        for item in self.items.iter().filter(|i| !i.read) {
            if let Some(feed) = self
                .feeds
                .iter_mut()
                .find(|f| f.url == item.feed_url_origin)
            {
                feed.unread_count += 1;
            }
        }
    }
}
