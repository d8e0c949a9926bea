use std::sync::Arc;

use tokio::sync::Mutex;

use crate::aggregator::{Aggregator, IndexView, ReadFilter, SubscribeOutcome};
use crate::app::Result;
use crate::domain::Feed;

/// Cloneable handle serializing every operation on one [`Aggregator`].
///
/// The lock is held for the whole operation, network fetches included, so
/// callers run strictly one at a time and never observe a half-built list.
#[derive(Clone)]
pub struct SharedAggregator {
    inner: Arc<Mutex<Aggregator>>,
}

impl SharedAggregator {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(aggregator)),
        }
    }

    pub async fn refresh(&self) {
        self.inner.lock().await.refresh().await;
    }

    pub async fn subscribe(&self, url: &str) -> Result<SubscribeOutcome> {
        self.inner.lock().await.subscribe(url).await
    }

    pub async fn unsubscribe(&self, url: &str) -> Result<()> {
        self.inner.lock().await.unsubscribe(url).await
    }

    pub async fn toggle_read(&self, link: &str) -> Result<bool> {
        self.inner.lock().await.toggle_read(link)
    }

    pub async fn toggle_favorite(&self, link: &str) -> Result<bool> {
        self.inner.lock().await.toggle_favorite(link)
    }

    pub async fn mark_all_read(&self) -> usize {
        self.inner.lock().await.mark_all_read()
    }

    pub async fn view(&self, filter: ReadFilter, origin: Option<&str>) -> IndexView {
        self.inner.lock().await.view(filter, origin)
    }

    pub async fn feeds(&self) -> Vec<Feed> {
        self.inner.lock().await.feeds().to_vec()
    }
}
