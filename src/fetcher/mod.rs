pub mod http_fetcher;
pub mod source;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;
pub use source::{FeedSource, FetchingSource};

/// Retrieves the raw bytes of a feed.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
