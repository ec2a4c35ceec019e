use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;
use table::FeatureTable;
use tracing::{debug, info, warn};

use crate::error::{FetchError, Result};

/// Columns of a downloaded table, after the `Date` index.
pub const PRICE_COLUMNS: [&str; 6] = ["Open", "High", "Low", "Close", "Adj_Close", "Volume"];

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; featlab/0.1)";

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: Meta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct Meta {
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

// ============================================================================
// Parsing
// ============================================================================

/// Value at `i`, undefined when the series is short or the value is null.
fn value_at(series: &[Option<f64>], i: usize) -> f64 {
    series.get(i).copied().flatten().unwrap_or(f64::NAN)
}

/// Convert a chart API response body into a date-indexed price table.
///
/// Bars are dated in the exchange's local time. When two bars fall on the
/// same date the later one wins. A missing adjusted-close series falls back
/// to the close.
pub fn parse_chart(body: &str) -> Result<FeatureTable> {
    let response: ChartResponse = serde_json::from_str(body)?;

    if let Some(err) = response.chart.error {
        return Err(FetchError::Api {
            code: err.code,
            description: err.description,
        });
    }
    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| FetchError::Payload("chart has neither result nor error".into()))?;

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adjclose = match result.indicators.adjclose.into_iter().next() {
        Some(adj) => adj.adjclose,
        None => {
            warn!("no adjusted close in response, using close");
            quote.close.clone()
        }
    };

    let mut dates: Vec<String> = Vec::with_capacity(result.timestamp.len());
    let mut rows: Vec<[f64; 6]> = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let local = DateTime::from_timestamp(ts + result.meta.gmtoffset, 0)
            .ok_or_else(|| FetchError::Payload(format!("timestamp {} out of range", ts)))?;
        let date = local.date_naive().format("%Y-%m-%d").to_string();
        let row = [
            value_at(&quote.open, i),
            value_at(&quote.high, i),
            value_at(&quote.low, i),
            value_at(&quote.close, i),
            value_at(&adjclose, i),
            value_at(&quote.volume, i),
        ];

        if dates.last() == Some(&date) {
            debug!(%date, "replacing duplicate bar");
            if let Some(last) = rows.last_mut() {
                *last = row;
            }
            continue;
        }
        dates.push(date);
        rows.push(row);
    }

    let mut table = FeatureTable::new("Date", dates);
    for (col, name) in PRICE_COLUMNS.iter().enumerate() {
        table.push_column(*name, rows.iter().map(|r| r[col]).collect())?;
    }
    Ok(table)
}

// ============================================================================
// Client
// ============================================================================

pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Daily bars for `ticker` from `start` up to but excluding `end`.
    pub async fn fetch_daily(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FeatureTable> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = end.and_time(NaiveTime::MIN).and_utc().timestamp();
        debug!(%url, period1, period2, "requesting chart");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await?;

        // The API reports unknown tickers as a 404 carrying a chart error body
        let status = response.status();
        let body = response.text().await?;
        let table = match parse_chart(&body) {
            Ok(table) => table,
            Err(FetchError::Json(_)) if !status.is_success() => {
                return Err(FetchError::Payload(format!("HTTP {} from {}", status, url)));
            }
            Err(err) => return Err(err),
        };

        let end_key = end.format("%Y-%m-%d").to_string();
        let keep: Vec<usize> = (0..table.len())
            .filter(|&i| table.index()[i] < end_key)
            .collect();
        let table = table.select_rows(&keep);

        if table.is_empty() {
            return Err(FetchError::Empty {
                ticker: ticker.to_string(),
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        info!(ticker, rows = table.len(), "downloaded daily bars");
        Ok(table)
    }
}
