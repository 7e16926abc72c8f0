//! Command-line entry point for the shop directory.

mod admin;
mod output;

use admin::AdminCommand;
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use log::{info, warn};
use shopdir::config::ShopdirConfig;
use shopdir::core::{
    CatalogStats, DataOrigin, DetailView, LoadReport, QueryEngine, SearchScope, ShopCache,
    ShopLoader, filter_text,
};
use shopdir::protocol::Category;
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line options for the shopdir binary.
#[derive(Debug, Parser)]
#[command(name = "shopdir", version, about = "Local shop directory")]
struct Cli {
    /// Extra shopdir.json5 files applied over the layered config
    #[arg(long, global = true)]
    config: Vec<PathBuf>,
    /// Skip the remote sheet and read only the bundled data
    #[arg(long, global = true)]
    offline: bool,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List shops, optionally by category and filter text
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        filter: Option<String>,
    },
    /// Search every shop
    Search {
        query: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value_t = shopdir::server::DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// Show one shop
    Show { id: String },
    /// Random picks per category, as on the home page
    Highlights {
        #[arg(long)]
        count: Option<usize>,
    },
    /// Counts by category and type
    Stats,
    /// Serve the API and pages over HTTP
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Edit a bundled data file
    Admin {
        /// Data file to edit (defaults to the configured fallback location)
        #[arg(long)]
        data: Option<PathBuf>,
        /// Where to write the edited set (defaults to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(subcommand)]
        command: AdminCommand,
    },
}

/// Entry point for the shopdir CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shopdir::init_logging();
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("cwd")?;
    let mut config = shopdir::load_config(cwd, &cli.config)?;
    if cli.offline {
        info!("offline mode: remote sheet disabled");
        config.sheet.enabled = false;
    }

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            shopdir::server::serve(&config)
                .await
                .context("server stopped")?;
        }
        Command::Admin { data, out, command } => {
            let data = data.unwrap_or_else(|| PathBuf::from(&config.fallback.location));
            admin::run(&data, out.as_deref(), command, cli.json)?;
        }
        command => run_query(&config, command, cli.json).await?,
    }
    Ok(())
}

async fn run_query(config: &ShopdirConfig, command: Command, json: bool) -> anyhow::Result<()> {
    let loader = ShopLoader::from_config(config, Arc::new(ShopCache::new()))
        .context("failed to set up data sources")?;
    let LoadReport { records, origin } = loader.load_with_report().await;
    if origin == DataOrigin::Empty {
        warn!("no shop data could be loaded");
    }
    let engine = QueryEngine::from_config(&config.catalog);

    match command {
        Command::List { category, filter } => {
            let pool = match category.as_deref() {
                Some(category) => engine.by_category(&records, &parse_category(category)?),
                None => records.as_ref().clone(),
            };
            let filter = filter.unwrap_or_default();
            let shops = filter_text(&pool, &filter, SearchScope::Listing);
            output::records(&shops, json)
        }
        Command::Search {
            query,
            category,
            limit,
        } => {
            if query.trim().is_empty() {
                bail!("search query cannot be empty");
            }
            let selector = category.as_deref().map(parse_category).transpose()?;
            let shops = engine.search(&records, &query, selector.as_ref(), limit);
            output::records(&shops, json)
        }
        Command::Show { id } => match DetailView::resolve(&records, Some(&*id)) {
            DetailView::Found(record) => output::record(&record, json),
            _ => bail!("shop not found: {id}"),
        },
        Command::Highlights { count } => {
            let count = count.unwrap_or(config.catalog.highlight_count);
            output::highlights(&engine.highlights(&records, count), json)
        }
        Command::Stats => output::stats(&CatalogStats::collect(&records), json),
        Command::Serve { .. } | Command::Admin { .. } => Ok(()),
    }
}

/// Accept only the selectable categories on the command line.
fn parse_category(value: &str) -> anyhow::Result<Category> {
    match Category::parse(value) {
        Some(category) => Ok(category),
        None => bail!("unknown category '{value}' (expected food, entertainment, or service)"),
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, parse_category};
    use crate::admin::AdminCommand;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use shopdir::protocol::Category;

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from(["shopdir", "search", "noodle", "--offline", "--json"])
            .expect("parse");
        assert!(cli.offline);
        assert!(cli.json);
        match cli.command {
            Command::Search { query, limit, .. } => {
                assert_eq!(query, "noodle");
                assert_eq!(limit, 50);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn admin_add_collects_images() {
        let cli = Cli::try_parse_from([
            "shopdir", "admin", "--data", "shops.json", "add", "--category", "food", "--type",
            "Cafe", "--name", "Rise", "--image", "a.jpg", "--image", "b.png",
        ])
        .expect("parse");
        let Command::Admin { data, command, .. } = cli.command else {
            panic!("expected admin");
        };
        assert_eq!(data.as_deref(), Some(std::path::Path::new("shops.json")));
        let AdminCommand::Add { fields, images } = command else {
            panic!("expected add");
        };
        assert_eq!(fields.name.as_deref(), Some("Rise"));
        assert_eq!(images, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn category_flags_are_strict() {
        assert_eq!(parse_category("food").expect("food"), Category::Food);
        assert!(parse_category("nightlife").is_err());
    }
}
