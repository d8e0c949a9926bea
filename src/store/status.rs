use std::sync::Arc;

use crate::app::Result;
use crate::store::Store;

/// Read/favorite flags keyed by raw item link.
///
/// Getters never fail: an absent key or a storage error both read as
/// `false`, the latter with a warning.
#[derive(Clone)]
pub struct StatusStore {
    store: Arc<dyn Store + Send + Sync>,
}

impl StatusStore {
    pub fn new(store: Arc<dyn Store + Send + Sync>) -> Self {
        Self { store }
    }

    pub fn get_read(&self, link: &str) -> bool {
        match self.store.get_read(link) {
            Ok(flag) => flag.unwrap_or(false),
            Err(e) => {
                tracing::warn!("Error getting read status for {}: {}", link, e);
                false
            }
        }
    }

    pub fn set_read(&self, link: &str, is_read: bool) -> Result<()> {
        self.store.set_read(link, is_read)
    }

    pub fn get_favorite(&self, link: &str) -> bool {
        match self.store.get_favorite(link) {
            Ok(flag) => flag.unwrap_or(false),
            Err(e) => {
                tracing::warn!("Error getting favorite status for {}: {}", link, e);
                false
            }
        }
    }

    pub fn set_favorite(&self, link: &str, is_favorite: bool) -> Result<()> {
        self.store.set_favorite(link, is_favorite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;
    use crate::test_support::FlakyStore;

    #[test]
    fn test_defaults_to_false() {
        let status = StatusStore::new(Arc::new(SqliteStore::in_memory().unwrap()));
        assert!(!status.get_read("https://example.com/1"));
        assert!(!status.get_favorite("https://example.com/1"));
    }

    #[test]
    fn test_set_then_get() {
        let status = StatusStore::new(Arc::new(SqliteStore::in_memory().unwrap()));
        status.set_read("https://example.com/1", true).unwrap();
        status.set_favorite("https://example.com/2", true).unwrap();

        assert!(status.get_read("https://example.com/1"));
        assert!(!status.get_favorite("https://example.com/1"));
        assert!(status.get_favorite("https://example.com/2"));
    }

    #[test]
    fn test_storage_error_reads_as_false() {
        let store = Arc::new(FlakyStore::new());
        store.inner().set_read("https://example.com/1", true).unwrap();
        store.fail_reads(true);

        let status = StatusStore::new(store);
        assert!(!status.get_read("https://example.com/1"));
    }

    #[test]
    fn test_write_error_is_surfaced() {
        let store = Arc::new(FlakyStore::new());
        store.fail_writes(true);

        let status = StatusStore::new(store);
        assert!(status.set_favorite("https://example.com/1", true).is_err());
    }
}
