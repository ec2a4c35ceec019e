mod descriptive;
mod metrics;

pub use descriptive::*;
pub use metrics::*;
