//! Tabular containers for price histories and feature sets.
//!
//! A [`RawTable`] holds the text cells of a CSV file exactly as read. A
//! [`FeatureTable`] is the numeric, date-indexed form the pipeline works on:
//! an ordered row index plus named `f64` columns, with `NaN` marking an
//! undefined cell.

mod error;
mod frame;
mod raw;
mod read;
mod write;

pub use error::{Result, TableError};
pub use frame::{Column, FeatureTable};
pub use raw::{RawTable, coerce_number};
pub use read::*;
pub use write::*;
