//! candela CLI - Paginated exchange kline retrieval.

use anyhow::Result;
use candela_lib::PriceColumn;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use commands::Connection;
use display::Format;

#[derive(Parser)]
#[command(name = "candela")]
#[command(about = "Fetch exchange candlestick data beyond the per-request cap", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only, no progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Override the provider's REST base URL
    #[arg(long, env = "CANDELA_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "CANDELA_TIMEOUT_SECS", default_value = "10", global = true)]
    timeout_secs: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch OHLCV candles for a symbol and write them to stdout
    Ohlcv {
        /// Trading pair symbol (e.g., BTCUSDT)
        symbol: String,

        /// Candle interval (e.g., 1m, 5m, 1h, 1d)
        #[arg(short, long, default_value = "1h")]
        timeframe: String,

        /// Number of candles to fetch
        #[arg(short, long, default_value = "500")]
        limit: usize,

        /// Market-data provider
        #[arg(short, long, default_value = "binance")]
        provider: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Append the logarithmic price column
        #[arg(long)]
        log_price: bool,

        /// Append the log-return column
        #[arg(long)]
        log_returns: bool,

        /// Column used as the price for derived columns
        #[arg(long, default_value = "close")]
        price_col: PriceColumn,
    },

    /// List symbols currently open for trading
    Symbols {
        /// Market-data provider
        #[arg(short, long, default_value = "binance")]
        provider: String,

        /// Case-insensitive substring filter
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List supported timeframes
    Timeframes,

    /// Fetch several symbols concurrently and print a summary per symbol
    Scan {
        /// Trading pair symbols
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Candle interval
        #[arg(short, long, default_value = "1h")]
        timeframe: String,

        /// Number of candles per symbol
        #[arg(short, long, default_value = "500")]
        limit: usize,

        /// Market-data provider
        #[arg(short, long, default_value = "binance")]
        provider: String,

        /// Maximum symbols fetched at once
        #[arg(short, long, default_value = "4")]
        concurrency: usize,
    },
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over the flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let connection = Connection::new(cli.base_url, cli.timeout_secs);

    match command {
        Commands::Ohlcv {
            symbol,
            timeframe,
            limit,
            provider,
            format,
            pretty,
            log_price,
            log_returns,
            price_col,
        } => {
            commands::ohlcv::ohlcv(
                &connection,
                &provider,
                &symbol,
                &timeframe,
                limit,
                format,
                pretty,
                log_price,
                log_returns,
                price_col,
            )
            .await
        }
        Commands::Symbols { provider, search } => {
            commands::symbols::list_symbols(&connection, &provider, search.as_deref()).await
        }
        Commands::Timeframes => commands::timeframes::list_timeframes(),
        Commands::Scan {
            symbols,
            timeframe,
            limit,
            provider,
            concurrency,
        } => {
            commands::scan::scan(
                &connection,
                &provider,
                &symbols,
                &timeframe,
                limit,
                concurrency,
                cli.quiet,
            )
            .await
        }
    }
}
