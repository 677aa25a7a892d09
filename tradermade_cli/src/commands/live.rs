use anyhow::Result;
use clap::Args;
use serde_json::Value;
use tradermade_api::TraderMade;

#[derive(Args)]
pub struct LiveArgs {
    /// Comma-separated currency pairs (e.g. EURUSD,GBPUSD)
    #[arg(long)]
    pub currency: String,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Source currency (e.g. EUR)
    #[arg(long)]
    pub from: String,

    /// Target currency (e.g. USD)
    #[arg(long)]
    pub to: String,

    /// Amount of the source currency
    #[arg(long)]
    pub amount: f64,
}

pub fn run(args: &LiveArgs, client: &TraderMade) -> Result<Value> {
    Ok(client.get_live_rates(&args.currency)?)
}

pub fn run_convert(args: &ConvertArgs, client: &TraderMade) -> Result<Value> {
    tracing::info!("Converting {} {} to {}", args.amount, args.from, args.to);
    Ok(client.get_currency_conversion(&args.from, &args.to, args.amount)?)
}
