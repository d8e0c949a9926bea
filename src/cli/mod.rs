pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::aggregator::ReadFilter;

#[derive(Parser)]
#[command(name = "braid")]
#[command(about = "Merge RSS/Atom feeds into one reading list", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/braid/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the reading list over HTTP
    Serve {
        /// Address to bind, overriding the config file
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Subscribe to a feed
    Add {
        /// URL of the feed to add
        url: String,
    },
    /// Unsubscribe from a feed
    Remove {
        /// URL of the feed to remove
        url: String,
    },
    /// Fetch every feed and print the merged list
    List {
        /// all, unread or favorites
        #[arg(short, long, default_value = "all", value_parser = parse_filter)]
        filter: ReadFilter,

        /// Only show items from this feed
        #[arg(long)]
        feed: Option<String>,
    },
    /// Mark every item as read
    MarkAllRead,
}

fn parse_filter(value: &str) -> Result<ReadFilter, String> {
    match value {
        "all" | "unread" | "favorites" => Ok(ReadFilter::parse(value)),
        other => Err(format!(
            "unknown filter '{}', expected all, unread or favorites",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "braid",
            "list",
            "--filter",
            "unread",
            "--feed",
            "https://example.com/feed.xml",
        ])
        .unwrap();

        match cli.command {
            Commands::List { filter, feed } => {
                assert_eq!(filter, ReadFilter::Unread);
                assert_eq!(feed.as_deref(), Some("https://example.com/feed.xml"));
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        assert!(Cli::try_parse_from(["braid", "list", "--filter", "starred"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["braid", "serve", "--config", "/tmp/braid.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/braid.toml")));
        assert!(matches!(cli.command, Commands::Serve { bind: None }));
    }
}
