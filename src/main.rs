//! Pawshop - A terminal storefront for pet products
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use tokio::runtime::Runtime;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pawshop::api::{ShopApi, ShopClient};
use pawshop::router;

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    match parse_args()? {
        Command::Run => pawshop::app::run(),
        Command::Categories => Runtime::new()?.block_on(categories_cli()),
        Command::Products { slug, limit } => {
            Runtime::new()?.block_on(products_cli(slug.as_deref(), limit))
        }
        Command::Config => show_config(),
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Run,
    Categories,
    Products { slug: Option<String>, limit: usize },
    Config,
    Help,
    Version,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Run);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),

        "categories" | "cats" => Ok(Command::Categories),

        "products" | "recs" => {
            let limit_pos = args.iter().position(|a| a == "--limit" || a == "-l");
            let limit = match limit_pos.and_then(|i| args.get(i + 1)) {
                Some(s) => s
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid limit: {s}"))?,
                None => pawshop::Config::load()?.recommendation_limit,
            };
            let slug = args.get(2).filter(|a| !a.starts_with('-')).cloned();
            Ok(Command::Products { slug, limit })
        }

        "config" => Ok(Command::Config),

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'pawshop --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = pawshop::Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
🐾 Pawshop - A terminal storefront for pet products

USAGE:
    pawshop                            Launch TUI
    pawshop [COMMAND]

COMMANDS:
    categories                         List shop categories as tabs

    products [category] [OPTIONS]      Show recommended products
      Options:
        -l, --limit <n>                Number of products (default: from config)
      Examples:
        pawshop products
        pawshop products dogs --limit 5

    config                             Print the active configuration

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

KEYBINDINGS (TUI):
    Navigation
      Tab/1/2       Switch between Home and Shop
      h/l ←/→       Previous/next category tab
      g/G           First/last category tab
      j/k ↓/↑       Scroll products

    Actions
      r             Refresh
      k (at top)    Pull to refresh
      Enter         Retry after an error
      + / -         More/fewer products per list

    View
      t             Change theme
      ?             Help

CONFIG:
    {}
"#,
        pawshop::LOGO,
        config_path
    );
}

fn print_version() {
    println!("pawshop {}", pawshop::VERSION);
}

async fn categories_cli() -> Result<()> {
    let config = pawshop::Config::load()?;
    let client = ShopClient::new(&config)?;

    let categories = client.categories().await?;
    let routes = router::routes(&categories);

    if routes.is_empty() {
        println!("No categories.");
        return Ok(());
    }

    println!("Tabs:\n");
    for (i, route) in routes.iter().enumerate() {
        let marker = if i == 0 { "▸" } else { " " };
        println!("  {} {:<16} {}", marker, route.title, route.key);
    }

    Ok(())
}

async fn products_cli(slug: Option<&str>, limit: usize) -> Result<()> {
    let config = pawshop::Config::load()?;
    let client = ShopClient::new(&config)?;

    let products = client.recommendations(slug, limit).await?;

    match slug {
        Some(slug) => println!("\n🐾 Recommended for {slug}"),
        None => println!("\n🐾 Recommended"),
    }
    println!("{}", "─".repeat(60));

    if products.is_empty() {
        println!("Nothing here yet.");
        return Ok(());
    }

    for product in products {
        println!("\n{}", product.name);
        match product.stars() {
            Some(stars) => println!("{}  {}", product.display_price(), stars),
            None => println!("{}", product.display_price()),
        }
    }

    Ok(())
}

fn show_config() -> Result<()> {
    let config = pawshop::Config::load()?;
    let path = pawshop::Config::default_path()?;

    println!("# {}", path.display());
    println!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}
