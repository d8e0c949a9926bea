use clap::Parser;

use braid::app::AppContext;
use braid::cli::{commands, Cli, Commands};
use braid::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    braid::logging::init(&config.logging);

    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Serve { bind } => {
            commands::serve(&ctx, bind.as_deref()).await?;
        }
        Commands::Add { url } => {
            commands::add_feed(&ctx, &url).await?;
        }
        Commands::Remove { url } => {
            commands::remove_feed(&ctx, &url).await?;
        }
        Commands::List { filter, feed } => {
            commands::list(&ctx, filter, feed.as_deref()).await?;
        }
        Commands::MarkAllRead => {
            commands::mark_all_read(&ctx).await?;
        }
    }

    Ok(())
}
