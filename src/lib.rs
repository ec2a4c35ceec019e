//! Price-history feature pipeline.
//!
//! Re-exports the table types, the indicator bank and the feature composer so
//! downstream code can depend on one crate.

pub use features::{self, FeatureConfig, FeatureError, columns, prepare};
pub use indicators;
pub use table::{self, FeatureTable, RawTable, read_feature_csv, read_raw_csv, write_csv};
