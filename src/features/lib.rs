//! Feature engineering for daily price histories.
//!
//! [`prepare`] takes a raw table, resolves its price column, derives
//! log-returns and the rolling indicators configured in [`FeatureConfig`],
//! adds the `MA20_x_Volatility` interaction and keeps only the fully defined
//! rows.

pub mod columns;
pub mod compose;
pub mod config;
pub mod error;
pub mod normalize;

pub use compose::{
    add_bollinger, add_ema, add_interaction, add_lagged_returns, add_macd, add_moving_averages,
    add_returns, add_rsi, add_volatility, build_features, prepare,
};
pub use config::FeatureConfig;
pub use error::{FeatureError, Result};
pub use normalize::{CANONICAL_PRICE, DATE_COLUMN, normalize, resolve_price_column};
