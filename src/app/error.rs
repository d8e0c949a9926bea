use thiserror::Error;

#[derive(Error, Debug)]
pub enum BraidError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The feed could not be retrieved or parsed.
    #[error("Failed to fetch feed {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<BraidError>,
    },

    /// A store write or delete issued by the aggregator failed.
    #[error("Failed to persist {key}: {source}")]
    Persistence {
        key: String,
        #[source]
        source: Box<BraidError>,
    },
}

impl BraidError {
    pub fn fetch(url: &str, source: BraidError) -> Self {
        Self::Fetch {
            url: url.to_string(),
            source: Box::new(source),
        }
    }

    pub fn persistence(key: &str, source: BraidError) -> Self {
        Self::Persistence {
            key: key.to_string(),
            source: Box::new(source),
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }
}

pub type Result<T> = std::result::Result<T, BraidError>;
