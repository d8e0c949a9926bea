pub mod document;
pub mod feed;
pub mod item;

pub use document::{EntryDates, FeedDocument, SourceEntry};
pub use feed::Feed;
pub use item::FeedItem;
