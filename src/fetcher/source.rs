use std::sync::Arc;

use async_trait::async_trait;

use crate::app::{BraidError, Result};
use crate::domain::FeedDocument;
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;

/// Turns a feed URL into a parsed document.
///
/// Every failure (bad URL, network, HTTP status, unparseable body) is
/// reported as [`BraidError::Fetch`].
#[async_trait]
pub trait FeedSource {
    async fn fetch_document(&self, url: &str) -> Result<FeedDocument>;
}

/// [`FeedSource`] backed by a [`Fetcher`] and the feed-rs [`Normalizer`].
pub struct FetchingSource {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
}

impl FetchingSource {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, normalizer: Normalizer) -> Self {
        Self {
            fetcher,
            normalizer,
        }
    }
}

#[async_trait]
impl FeedSource for FetchingSource {
    async fn fetch_document(&self, url: &str) -> Result<FeedDocument> {
        let body = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|e| BraidError::fetch(url, e))?;

        self.normalizer
            .normalize(&body)
            .map_err(|e| BraidError::fetch(url, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticFetcher;

    #[tokio::test]
    async fn test_fetch_document_parses_body() {
        let fetcher = StaticFetcher::new();
        fetcher.serve(
            "https://example.com/feed.xml",
            &crate::test_support::rss("Example", &[("First", "https://example.com/1", None)]),
        );
        let source = FetchingSource::new(Arc::new(fetcher), Normalizer::new());

        let doc = source
            .fetch_document("https://example.com/feed.xml")
            .await
            .unwrap();
        assert_eq!(doc.title, "Example");
        assert_eq!(doc.entries.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_url_is_fetch_error() {
        let source = FetchingSource::new(Arc::new(StaticFetcher::new()), Normalizer::new());
        let err = source
            .fetch_document("https://example.com/missing.xml")
            .await
            .unwrap_err();
        assert!(err.is_fetch());
    }

    #[tokio::test]
    async fn test_unparseable_body_is_fetch_error() {
        let fetcher = StaticFetcher::new();
        fetcher.serve("https://example.com/feed.xml", "<html>nope</html>");
        let source = FetchingSource::new(Arc::new(fetcher), Normalizer::new());

        let err = source
            .fetch_document("https://example.com/feed.xml")
            .await
            .unwrap_err();
        assert!(err.is_fetch());
    }
}
