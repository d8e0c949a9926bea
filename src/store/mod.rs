pub mod sqlite;
pub mod status;

use crate::app::Result;
use crate::domain::Feed;

pub use sqlite::SqliteStore;
pub use status::StatusStore;

/// Persistent key/value contract: feed subscriptions keyed by URL and two
/// independent boolean flags keyed by item link.
///
/// Each call is its own unit of work; nothing spans several keys.
pub trait Store {
    // Subscriptions
    fn load_feeds(&self) -> Result<Vec<Feed>>;
    fn save_feed(&self, feed: &Feed) -> Result<()>;
    fn remove_feed(&self, url: &str) -> Result<()>;

    // Status flags, `None` when never written
    fn get_read(&self, link: &str) -> Result<Option<bool>>;
    fn set_read(&self, link: &str, is_read: bool) -> Result<()>;
    fn get_favorite(&self, link: &str) -> Result<Option<bool>>;
    fn set_favorite(&self, link: &str, is_favorite: bool) -> Result<()>;
}
