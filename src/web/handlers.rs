use axum::extract::{Query, State};
use axum::http::header::REFERER;
use axum::http::HeaderMap;
use axum::response::Redirect;
use axum::{Form, Json};
use serde::Deserialize;

use crate::aggregator::{IndexView, ReadFilter, SharedAggregator, SubscribeOutcome};
use crate::web::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub filter: Option<String>,
    #[serde(rename = "feedURL")]
    pub feed_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedForm {
    #[serde(default)]
    pub feed_url: String,
}

#[derive(Debug, Deserialize)]
pub struct LinkForm {
    #[serde(default)]
    pub link: String,
}

/// Back to the referring page, keeping its filters.
fn back(headers: &HeaderMap) -> Redirect {
    let target = headers
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or("/");
    Redirect::to(target)
}

/// GET / - Feeds and the filtered item list.
pub async fn index(
    State(aggregator): State<SharedAggregator>,
    Query(query): Query<IndexQuery>,
) -> Json<IndexView> {
    let filter = query
        .filter
        .as_deref()
        .map(ReadFilter::parse)
        .unwrap_or_default();

    Json(aggregator.view(filter, query.feed_url.as_deref()).await)
}

/// POST /add - Subscribe to a feed.
pub async fn add_feed(
    State(aggregator): State<SharedAggregator>,
    Form(form): Form<FeedForm>,
) -> Result<Redirect, ApiError> {
    if form.feed_url.is_empty() {
        return Err(ApiError::bad_request("Feed URL cannot be empty"));
    }

    match aggregator.subscribe(&form.feed_url).await? {
        SubscribeOutcome::Added(feed) => {
            tracing::info!("Added feed {} via web", feed.url);
        }
        SubscribeOutcome::AlreadySubscribed => {
            tracing::debug!("Feed {} already present", form.feed_url);
        }
    }

    Ok(Redirect::to("/"))
}

/// POST /remove - Unsubscribe from a feed.
pub async fn remove_feed(
    State(aggregator): State<SharedAggregator>,
    headers: HeaderMap,
    Form(form): Form<FeedForm>,
) -> Redirect {
    if !form.feed_url.is_empty() {
        if let Err(e) = aggregator.unsubscribe(&form.feed_url).await {
            tracing::error!("Error removing feed {}: {}", form.feed_url, e);
        }
    }
    back(&headers)
}

/// GET|POST /refresh - Re-fetch every feed.
pub async fn refresh(State(aggregator): State<SharedAggregator>, headers: HeaderMap) -> Redirect {
    aggregator.refresh().await;
    back(&headers)
}

/// POST /toggle-read
pub async fn toggle_read(
    State(aggregator): State<SharedAggregator>,
    headers: HeaderMap,
    Form(form): Form<LinkForm>,
) -> Redirect {
    if !form.link.is_empty() {
        if let Err(e) = aggregator.toggle_read(&form.link).await {
            tracing::error!("Error toggling read status for {}: {}", form.link, e);
        }
    }
    back(&headers)
}

/// POST /toggle-favorite
pub async fn toggle_favorite(
    State(aggregator): State<SharedAggregator>,
    headers: HeaderMap,
    Form(form): Form<LinkForm>,
) -> Redirect {
    if !form.link.is_empty() {
        if let Err(e) = aggregator.toggle_favorite(&form.link).await {
            tracing::error!("Error toggling favorite status for {}: {}", form.link, e);
        }
    }
    back(&headers)
}

/// POST /mark-all-read
pub async fn mark_all_read(
    State(aggregator): State<SharedAggregator>,
    headers: HeaderMap,
) -> Redirect {
    let marked = aggregator.mark_all_read().await;
    tracing::debug!("Marked {} items read", marked);
    back(&headers)
}
