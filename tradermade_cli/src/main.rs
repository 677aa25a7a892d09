mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tradermade_api::{TraderMade, DEFAULT_BASE_URL};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "tradermade")]
#[command(about = "Query forex, CFD and crypto market data from TraderMade")]
struct Cli {
    /// TraderMade REST API key
    #[arg(long, env = "TRADERMADE_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Output format: pretty or compact
    #[arg(long, default_value = "pretty", global = true)]
    output: String,

    /// Override the API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL, global = true, hide = true)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Live rates for one or more currency pairs
    Live(commands::live::LiveArgs),
    /// List currencies available for live rates
    LiveCurrencies,
    /// List currencies available for streaming
    StreamingCurrencies,
    /// List supported crypto currencies
    CryptoList,
    /// List currencies with historical data
    HistoricalCurrencies,
    /// List supported CFD instruments
    CfdList,
    /// Daily rates for a date
    Historical(commands::historical::HistoricalArgs),
    /// Hourly rates for a date and hour
    Hourly(commands::historical::IntradayArgs),
    /// Minute rates for a date and minute
    Minute(commands::historical::IntradayArgs),
    /// Tick data between two timestamps
    Tick(commands::historical::TickArgs),
    /// Sample tick data between two timestamps (format required)
    TickSample(commands::historical::TickArgs),
    /// Time series between two dates
    Timeseries(commands::historical::TimeSeriesArgs),
    /// Whether markets are currently open
    MarketStatus,
    /// Market opening times
    MarketTimes,
    /// Convert an amount between currencies
    Convert(commands::live::ConvertArgs),
    /// Export data shaped for a pandas DataFrame
    Pandas(commands::export::PandasArgs),
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tradermade=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "compact" => OutputFormat::Compact,
        _ => OutputFormat::Pretty,
    };

    let api_key = cli
        .api_key
        .context("no API key: pass --api-key or set TRADERMADE_API_KEY")?;
    let mut client = TraderMade::with_base_url(&cli.base_url);
    client.set_rest_api_key(&api_key)?;

    let doc = match &cli.command {
        Commands::Live(args) => commands::live::run(args, &client)?,
        Commands::LiveCurrencies => client.get_live_currency_list()?,
        Commands::StreamingCurrencies => client.get_streaming_currency_list()?,
        Commands::CryptoList => client.get_crypto_list()?,
        Commands::HistoricalCurrencies => client.get_historical_currency_list()?,
        Commands::CfdList => client.get_cfd_list()?,
        Commands::Historical(args) => commands::historical::run_daily(args, &client)?,
        Commands::Hourly(args) => commands::historical::run_hourly(args, &client)?,
        Commands::Minute(args) => commands::historical::run_minute(args, &client)?,
        Commands::Tick(args) => commands::historical::run_tick(args, &client)?,
        Commands::TickSample(args) => commands::historical::run_tick_sample(args, &client)?,
        Commands::Timeseries(args) => commands::historical::run_time_series(args, &client)?,
        Commands::MarketStatus => client.get_open_market_status()?,
        Commands::MarketTimes => client.get_market_open_timing()?,
        Commands::Convert(args) => commands::live::run_convert(args, &client)?,
        Commands::Pandas(args) => commands::export::run(args, &client)?,
    };

    output::print_document(&doc, &format);
    Ok(())
}
