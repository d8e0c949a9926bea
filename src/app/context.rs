use std::path::PathBuf;
use std::sync::Arc;

use crate::aggregator::{Aggregator, SharedAggregator};
use crate::app::error::{BraidError, Result};
use crate::config::Config;
use crate::fetcher::{FeedSource, FetchingSource, HttpFetcher};
use crate::normalizer::Normalizer;
use crate::store::{SqliteStore, Store};

/// Wires the store and the feed source together.
pub struct AppContext {
    pub config: Config,
    pub store: Arc<dyn Store + Send + Sync>,
    pub source: Arc<dyn FeedSource + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let db_path = match &config.store.path {
            Some(p) => p.clone(),
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        tracing::debug!("Opened store at {}", db_path.display());
        Self::with_store(config, store)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        Self::with_store(config, Arc::new(SqliteStore::in_memory()?))
    }

    fn with_store(config: Config, store: Arc<dyn Store + Send + Sync>) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(&config.fetcher)?);
        let source = Arc::new(FetchingSource::new(fetcher, Normalizer::new()));

        Ok(Self {
            config,
            store,
            source,
        })
    }

    /// Load subscriptions and run the first refresh.
    pub async fn aggregator(&self) -> Result<SharedAggregator> {
        let aggregator = Aggregator::load(self.store.clone(), self.source.clone()).await?;
        Ok(SharedAggregator::new(aggregator))
    }

    /// Engine over the persisted subscriptions with no items fetched yet.
    ///
    /// For one-shot commands whose own operation fetches what it needs.
    pub fn subscriptions(&self) -> Result<SharedAggregator> {
        let feeds = self.store.load_feeds()?;
        let aggregator = Aggregator::new(self.store.clone(), self.source.clone(), feeds);
        Ok(SharedAggregator::new(aggregator))
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| BraidError::Config("Could not find data directory".into()))?;
        let braid_dir = data_dir.join("braid");
        std::fs::create_dir_all(&braid_dir)?;
        Ok(braid_dir.join("braid.db"))
    }
}
