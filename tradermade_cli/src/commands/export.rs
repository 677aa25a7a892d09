use anyhow::Result;
use clap::Args;
use serde_json::Value;
use tradermade_api::TraderMade;

#[derive(Args)]
pub struct PandasArgs {
    /// Currency pair (e.g. EURUSD)
    #[arg(long)]
    pub currency: String,

    /// Start date
    #[arg(long)]
    pub start: String,

    /// End date
    #[arg(long)]
    pub end: String,

    /// Format: records, columns, index, split
    #[arg(long, default_value = "records")]
    pub format: String,

    /// Fields: close or ohlc
    #[arg(long, default_value = "close")]
    pub fields: String,
}

pub fn run(args: &PandasArgs, client: &TraderMade) -> Result<Value> {
    Ok(client.get_data_as_pandas_data_frame(
        &args.currency,
        &args.start,
        &args.end,
        &args.format,
        &args.fields,
    )?)
}
