use anyhow::Result;
use clap::Args;
use serde_json::Value;
use tradermade_api::TraderMade;

#[derive(Args)]
pub struct HistoricalArgs {
    /// Currency pair (e.g. EURUSD)
    #[arg(long)]
    pub currency: String,

    /// Date as YYYY-MM-DD
    #[arg(long)]
    pub date: String,
}

#[derive(Args)]
pub struct IntradayArgs {
    /// Currency pair (e.g. EURUSD)
    #[arg(long)]
    pub currency: String,

    /// Date and time as YYYY-MM-DD-HH:MM
    #[arg(long)]
    pub date_time: String,
}

#[derive(Args)]
pub struct TickArgs {
    /// Currency pair (e.g. EURUSD)
    #[arg(long)]
    pub symbol: String,

    /// Start as "YYYY-MM-DD HH:MM"
    #[arg(long)]
    pub start: String,

    /// End as "YYYY-MM-DD HH:MM"
    #[arg(long)]
    pub end: String,

    /// Response format (e.g. csv, json)
    #[arg(long, default_value = "")]
    pub format: String,
}

#[derive(Args)]
pub struct TimeSeriesArgs {
    /// Currency pair (e.g. EURUSD)
    #[arg(long)]
    pub currency: String,

    /// Start date
    #[arg(long)]
    pub start: String,

    /// End date
    #[arg(long)]
    pub end: String,

    /// Interval: daily, hourly, minute
    #[arg(long, default_value = "daily")]
    pub interval: String,

    /// Period for the interval (daily: 1; hourly: 1,2,4,6,8,24; minute: 1,5,10,15,30)
    #[arg(long, default_value = "1")]
    pub period: String,

    /// Format: records, csv, index, columns, split
    #[arg(long, default_value = "records")]
    pub format: String,
}

pub fn run_daily(args: &HistoricalArgs, client: &TraderMade) -> Result<Value> {
    Ok(client.get_historical_rates(&args.date, &args.currency)?)
}

pub fn run_hourly(args: &IntradayArgs, client: &TraderMade) -> Result<Value> {
    Ok(client.get_hourly_historical_data(&args.date_time, &args.currency)?)
}

pub fn run_minute(args: &IntradayArgs, client: &TraderMade) -> Result<Value> {
    Ok(client.get_minute_historical_data(&args.date_time, &args.currency)?)
}

pub fn run_tick(args: &TickArgs, client: &TraderMade) -> Result<Value> {
    Ok(client.get_tick_historical_data(&args.symbol, &args.start, &args.end, &args.format)?)
}

pub fn run_tick_sample(args: &TickArgs, client: &TraderMade) -> Result<Value> {
    Ok(client.get_tick_historical_data_sample(
        &args.symbol,
        &args.start,
        &args.end,
        &args.format,
    )?)
}

pub fn run_time_series(args: &TimeSeriesArgs, client: &TraderMade) -> Result<Value> {
    Ok(client.get_time_series_data(
        &args.currency,
        &args.start,
        &args.end,
        &args.interval,
        &args.period,
        &args.format,
    )?)
}
