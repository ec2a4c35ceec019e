use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use train::{Config, run};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    config.validate()?;

    let evaluation = run(&config)?;
    println!("{}", evaluation);
    Ok(())
}
