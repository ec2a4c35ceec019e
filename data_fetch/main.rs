use anyhow::{Context, Result};
use clap::Parser;
use data_fetch::{Args, YahooClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    args.validate()?;

    let client = YahooClient::new()?;
    let prices = client
        .fetch_daily(&args.ticker, args.start, args.end)
        .await
        .with_context(|| format!("downloading {}", args.ticker))?;

    let output = args.output_path();
    table::write_csv(&output, &prices)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Saved {} rows for {} to {}",
        prices.len(),
        args.ticker,
        output.display()
    );
    Ok(())
}
