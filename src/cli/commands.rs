use crate::aggregator::{ReadFilter, SharedAggregator, SubscribeOutcome};
use crate::app::{AppContext, Result};
use crate::web;

pub async fn serve(ctx: &AppContext, bind: Option<&str>) -> Result<()> {
    let aggregator = ctx.aggregator().await?;
    let addr = bind.unwrap_or(&ctx.config.server.bind);
    web::serve(addr, aggregator).await?;
    Ok(())
}

pub async fn add_feed(ctx: &AppContext, url: &str) -> Result<()> {
    let aggregator = ctx.subscriptions()?;

    match aggregator.subscribe(url).await? {
        SubscribeOutcome::Added(feed) => {
            println!("Added feed: {}", feed.display_title());
            println!(
                "Fetched {} items ({} unread)",
                item_count(&aggregator, url).await,
                feed.unread_count
            );
        }
        SubscribeOutcome::AlreadySubscribed => {
            println!("Feed already exists: {}", url);
        }
    }

    Ok(())
}

pub async fn remove_feed(ctx: &AppContext, url: &str) -> Result<()> {
    let aggregator = ctx.subscriptions()?;
    aggregator.unsubscribe(url).await?;
    println!("Removed feed: {}", url);
    Ok(())
}

pub async fn list(ctx: &AppContext, filter: ReadFilter, feed: Option<&str>) -> Result<()> {
    let aggregator = ctx.aggregator().await?;
    let view = aggregator.view(filter, feed).await;

    if view.feeds.is_empty() {
        println!("No feeds");
        return Ok(());
    }

    for feed in &view.feeds {
        println!(
            "{} ({} unread)\n  {}",
            feed.display_title(),
            feed.unread_count,
            feed.url
        );
    }
    println!();

    if view.items.is_empty() {
        println!("No {} items", view.filter);
        return Ok(());
    }

    for item in &view.items {
        let read_marker = if item.read { " " } else { "●" };
        let favorite_marker = if item.favorite { "★" } else { " " };
        println!(
            "{}{} {:<18} {}  [{}]",
            read_marker,
            favorite_marker,
            item.published,
            item.display_title(),
            item.feed_title
        );
    }

    Ok(())
}

pub async fn mark_all_read(ctx: &AppContext) -> Result<()> {
    let aggregator = ctx.aggregator().await?;
    let marked = aggregator.mark_all_read().await;
    println!("Marked {} items as read", marked);
    Ok(())
}

async fn item_count(aggregator: &SharedAggregator, url: &str) -> usize {
    aggregator
        .view(ReadFilter::All, Some(url))
        .await
        .items
        .len()
}
