use anyhow::Result;
use clap::Parser;
use prep::{Config, run};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    config.validate()?;

    let summary = run(&config)?;
    println!(
        "Processed {} rows into {} rows x {} columns -> {}",
        summary.rows_in,
        summary.rows_out,
        summary.columns,
        config.output.display()
    );
    Ok(())
}
