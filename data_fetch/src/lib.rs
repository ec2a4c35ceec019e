//! Daily price history download from the Yahoo Finance chart API.

pub mod args;
pub mod error;
pub mod yahoo;

pub use args::{Args, expand_output_path};
pub use error::{FetchError, Result};
pub use yahoo::{PRICE_COLUMNS, YahooClient, parse_chart};
