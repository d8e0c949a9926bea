//! # Braid
//!
//! Merges many RSS/Atom feeds into a single reading list, newest first,
//! with read and favorite flags that survive restarts.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → FeedSource ─┐
//!                                    ├→ Aggregator → web / cli
//! Store → StatusStore ───────────────┘
//! ```
//!
//! Feed items are never stored. Each refresh fetches every subscribed feed
//! again, rebuilds the list and joins the persisted flags back on by link.
//!
//! ## Quick Start
//!
//! ```bash
//! # Subscribe
//! braid add https://blog.rust-lang.org/feed.xml
//!
//! # Print unread items
//! braid list --filter unread
//!
//! # Serve the web interface
//! braid serve
//! ```

/// The aggregation engine, view filter and the lock guarding them.
///
/// - [`Aggregator`](aggregator::Aggregator): feeds, merged items, status toggles
/// - [`SharedAggregator`](aggregator::SharedAggregator): serialized access
/// - [`filter_items`](aggregator::filter_items): read-only index filtering
pub mod aggregator;

/// Application context and error handling.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/braid/config.toml`.
pub mod config;

/// Core domain models (Feed, FeedItem, FeedDocument).
pub mod domain;

/// Feed retrieval.
///
/// - [`Fetcher`](fetcher::Fetcher): raw bytes over HTTP
/// - [`FeedSource`](fetcher::FeedSource): URL to parsed document
pub mod fetcher;

/// Tracing subscriber setup.
pub mod logging;

/// Feed parsing with feed-rs and publication-date resolution.
pub mod normalizer;

/// SQLite persistence for subscriptions and status flags.
pub mod store;

/// HTTP interface built with axum.
pub mod web;

#[cfg(test)]
mod test_support;
