//! Technical indicators over price and return series.
//!
//! Every function takes a slice and returns a `Vec<f64>` of the same length,
//! aligned by index. Entries before the lookback is filled are `NaN`, and a
//! `NaN` in the input stays undefined in every output that depends on it.

pub mod oscillator;
pub mod returns;
pub mod trend;
pub mod volatility;

pub use oscillator::rsi::rsi;
pub use returns::{lagged, log_returns};
pub use trend::ma::{exponential_moving_average, moving_average};
pub use trend::macd::{MacdOutput, MacdParams, macd};
pub use volatility::annualized::{TRADING_DAYS_PER_YEAR, annualized_volatility};
pub use volatility::bollinger_bands::{BollingerBandsOutput, BollingerParams, bollinger_bands};
