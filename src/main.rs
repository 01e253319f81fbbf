//! Broker desk - main entry point
//!
//! Prints the desk's screens as text reports over the fixture data:
//! dashboard, portfolio, watchlist, allocation, baskets, behavior,
//! insights, stock detail, MTF, the order pad, route resolution and
//! fixture validation.

use anyhow::Result;
use broker_desk::config::DEFAULT_CONFIG_PATH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "broker-desk")]
#[command(about = "Retail brokerage desk: portfolio, watchlists, baskets and trading behavior", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Active user id (u1, u2, u3), overrides config
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Market indices, portfolio summary and day's change
    Dashboard,

    /// Holdings, positions and orders
    Portfolio {
        /// Order filter (all, open, history)
        #[arg(long, default_value = "all")]
        orders: String,
    },

    /// Watchlist groups with scenario simulation
    Watchlist {
        /// Category (my-lists, smart, themes)
        #[arg(long, default_value = "my-lists")]
        category: String,

        /// Group id within the category
        #[arg(long)]
        group: Option<String>,

        /// Hypothetical market move in percent (slider range -5..5)
        #[arg(long = "move", allow_hyphen_values = true)]
        market_move: Option<f64>,

        /// Sort order (default, change, ltp, quant)
        #[arg(long, default_value = "default")]
        sort: String,

        /// Search the stock universe by symbol or name
        #[arg(long)]
        search: Option<String>,

        /// Add a stock to the active custom list
        #[arg(long)]
        add: Option<String>,

        /// Remove a stock from the active custom list
        #[arg(long)]
        remove: Option<String>,

        /// Attach a note to the stock given with --add (or --note-symbol)
        #[arg(long)]
        note: Option<String>,

        /// Stock the note belongs to
        #[arg(long)]
        note_symbol: Option<String>,
    },

    /// Allocation weights and distribution tables
    Allocation,

    /// List investment baskets
    Baskets {
        /// Basket kind (theme, defensive, volatility, dividend)
        #[arg(long)]
        kind: Option<String>,
    },

    /// Basket detail with its minimum-investment plan
    Basket {
        /// Basket id
        id: String,

        /// Amount to invest (defaults to the basket minimum)
        #[arg(long)]
        amount: Option<f64>,
    },

    /// Behavioral risk report
    Behavior,

    /// Sentiment insights for the user's holdings
    Insights,

    /// Stock detail: quote, market depth and research
    Stock {
        /// Stock symbol
        symbol: String,
    },

    /// Margin trade funding dashboard
    Mtf,

    /// Order pad cost preview
    Order {
        /// Stock symbol
        symbol: String,

        /// Quantity
        #[arg(long, default_value = "1")]
        qty: u64,

        /// Product (CNC, MIS, NRML, MTF)
        #[arg(long, default_value = "CNC")]
        product: String,

        /// Limit price, market order when omitted
        #[arg(long)]
        limit: Option<f64>,

        /// buy or sell
        #[arg(long, default_value = "buy")]
        side: String,
    },

    /// Resolve a hash route
    Route {
        /// Path such as "#/stock/RELIANCE"
        path: String,
    },

    /// Validate fixture data
    Validate,
}

fn setup_logging(verbose: bool, command_name: &str, log_dir: &str) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    // {command}_{date}.log
    let log_filename = format!(
        "{}_{}.log",
        command_name,
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let log_path = PathBuf::from(log_dir).join(&log_filename);

    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_appender = tracing_appender::rolling::never(log_dir, &log_filename);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true);

    // Same format without ANSI colors
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    info!("Logging initialized");
    info!("Log file: {}", log_path.display());

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let command_name = match &cli.command {
        Commands::Dashboard => "dashboard",
        Commands::Portfolio { .. } => "portfolio",
        Commands::Watchlist { .. } => "watchlist",
        Commands::Allocation => "allocation",
        Commands::Baskets { .. } => "baskets",
        Commands::Basket { .. } => "basket",
        Commands::Behavior => "behavior",
        Commands::Insights => "insights",
        Commands::Stock { .. } => "stock",
        Commands::Mtf => "mtf",
        Commands::Order { .. } => "order",
        Commands::Route { .. } => "route",
        Commands::Validate => "validate",
    };

    let config = commands::load_config(&cli.config, cli.user.as_deref())?;
    setup_logging(cli.verbose, command_name, &config.logging.dir)?;
    let desk = commands::Desk::new(config)?;

    match cli.command {
        Commands::Dashboard => commands::dashboard::run(&desk),
        Commands::Portfolio { orders } => commands::portfolio::run(&desk, &orders),
        Commands::Watchlist {
            category,
            group,
            market_move,
            sort,
            search,
            add,
            remove,
            note,
            note_symbol,
        } => {
            let edits = commands::watchlist::Edits {
                add,
                remove,
                note,
                note_symbol,
            };
            commands::watchlist::run(&desk, &category, group, market_move, &sort, search, edits)
        }
        Commands::Allocation => commands::allocation::run(&desk),
        Commands::Baskets { kind } => commands::baskets::run(&desk, kind),
        Commands::Basket { id, amount } => commands::basket::run(&desk, &id, amount),
        Commands::Behavior => commands::behavior::run(&desk),
        Commands::Insights => commands::insights::run(&desk),
        Commands::Stock { symbol } => commands::stock::run(&desk, &symbol),
        Commands::Mtf => commands::mtf::run(&desk),
        Commands::Order {
            symbol,
            qty,
            product,
            limit,
            side,
        } => commands::order::run(&desk, &symbol, qty, &product, limit, &side),
        Commands::Route { path } => commands::route::run(&path),
        Commands::Validate => commands::validate::run(&desk),
    }
}
