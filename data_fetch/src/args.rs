use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;

/// Command line of the `data_fetch` binary
#[derive(Debug, Clone, Parser)]
#[command(name = "data_fetch")]
#[command(about = "Download daily price history for a ticker to CSV")]
pub struct Args {
    /// Ticker symbol, e.g. AAPL
    #[arg(long)]
    pub ticker: String,

    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// First date to exclude (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    /// Output path; {ticker}, {start} and {end} are substituted
    #[arg(long, default_value = "data/raw/{ticker}_{start}_{end}.csv")]
    pub output: String,
}

impl Args {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.ticker.trim().is_empty() {
            anyhow::bail!("ticker must not be empty");
        }
        if self.start >= self.end {
            anyhow::bail!("start ({}) must be before end ({})", self.start, self.end);
        }
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        expand_output_path(&self.output, &self.ticker, self.start, self.end)
    }
}

/// Substitute `{ticker}`, `{start}` and `{end}` in an output path template.
pub fn expand_output_path(template: &str, ticker: &str, start: NaiveDate, end: NaiveDate) -> PathBuf {
    PathBuf::from(
        template
            .replace("{ticker}", ticker)
            .replace("{start}", &start.format("%Y-%m-%d").to_string())
            .replace("{end}", &end.format("%Y-%m-%d").to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("data_fetch").chain(args.iter().copied()))
    }

    #[test]
    fn test_default_output() {
        let args = parse(&["--ticker", "AAPL", "--start", "2020-01-01", "--end", "2023-01-01"]).unwrap();
        assert!(args.validate().is_ok());
        assert_eq!(
            args.output_path(),
            PathBuf::from("data/raw/AAPL_2020-01-01_2023-01-01.csv")
        );
    }

    #[test]
    fn test_custom_template() {
        let start = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2021, 4, 1).unwrap();
        assert_eq!(
            expand_output_path("out/{ticker}/{end}-{ticker}.csv", "MSFT", start, end),
            PathBuf::from("out/MSFT/2021-04-01-MSFT.csv")
        );
        assert_eq!(expand_output_path("fixed.csv", "MSFT", start, end), PathBuf::from("fixed.csv"));
    }

    #[test]
    fn test_bad_dates() {
        assert!(parse(&["--ticker", "AAPL", "--start", "2020-13-01", "--end", "2021-01-01"]).is_err());

        let args = parse(&["--ticker", "AAPL", "--start", "2021-01-01", "--end", "2021-01-01"]).unwrap();
        assert!(args.validate().is_err());
    }
}
