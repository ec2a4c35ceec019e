use chrono::NaiveDate;
use table::{FeatureTable, RawTable, coerce_number};
use tracing::{debug, warn};

use crate::error::{FeatureError, Result};

/// Canonical name of the closing-price column.
pub const CANONICAL_PRICE: &str = "Adj_Close";

/// Name of the date key column.
pub const DATE_COLUMN: &str = "Date";

/// Source columns accepted for the canonical price, most preferred first.
const PRICE_SOURCES: [&str; 3] = ["Adj Close", CANONICAL_PRICE, "Close"];

/// Pick the raw column that becomes `price_column`.
///
/// For the canonical name the first of `Adj Close`, `Adj_Close`, `Close`
/// present wins; any other name must exist verbatim.
pub fn resolve_price_column<'a>(raw: &'a RawTable, price_column: &str) -> Result<&'a str> {
    let found = if price_column == CANONICAL_PRICE {
        PRICE_SOURCES
            .iter()
            .find_map(|&name| raw.headers().iter().find(|h| *h == name))
    } else {
        raw.headers().iter().find(|h| *h == price_column)
    };

    found.map(String::as_str).ok_or_else(|| {
        let expected = if price_column == CANONICAL_PRICE {
            PRICE_SOURCES.iter().map(|s| s.to_string()).collect()
        } else {
            vec![price_column.to_string()]
        };
        FeatureError::MissingPriceColumn {
            expected,
            available: raw.headers().to_vec(),
        }
    })
}

/// Turn a raw table into the numeric table the pipeline runs on.
///
/// The price source column is renamed to `price_column` and coerced to
/// numbers, with unparseable cells left undefined. `Date` becomes the row
/// index. Other columns are carried along when at least one cell is numeric
/// and dropped otherwise.
pub fn normalize(raw: &RawTable, price_column: &str) -> Result<FeatureTable> {
    let source = resolve_price_column(raw, price_column)?;
    // first header of that name; any repeat is dropped below
    let source_pos = raw.position(source);

    let date_pos = raw.position(DATE_COLUMN);
    let mut table = match date_pos {
        Some(pos) => {
            let index: Vec<String> = raw.column_at(pos).map(str::to_string).collect();
            check_date_order(&index)?;
            FeatureTable::new(DATE_COLUMN, index)
        }
        None => {
            warn!("no '{}' column, indexing rows by position", DATE_COLUMN);
            FeatureTable::with_ordinal_index(DATE_COLUMN, raw.len())
        }
    };

    for (pos, name) in raw.headers().iter().enumerate() {
        if Some(pos) == date_pos {
            continue;
        }

        if Some(pos) == source_pos {
            let prices: Vec<f64> = raw.column_at(pos).map(coerce_number).collect();
            let undefined = prices.iter().filter(|p| p.is_nan()).count();
            if undefined > 0 {
                warn!(column = source, undefined, "price cells could not be parsed");
            }
            table.push_column(source, prices)?;
            continue;
        }

        if table.has_column(name) {
            warn!(column = %name, "dropping repeated column");
            continue;
        }
        if name == price_column {
            warn!(column = %name, "dropping column shadowed by the renamed price column");
            continue;
        }

        let values: Vec<f64> = raw.column_at(pos).map(coerce_number).collect();
        if values.iter().all(|v| v.is_nan()) {
            warn!(column = %name, "dropping non-numeric column");
            continue;
        }
        table.push_column(name.as_str(), values)?;
    }

    if source != price_column {
        debug!(from = source, to = price_column, "renaming price column");
        table.rename_column(source, price_column)?;
    }

    Ok(table)
}

/// Dates that parse must be strictly increasing. Keys that are not dates
/// (stray header rows and the like) are skipped.
fn check_date_order(index: &[String]) -> Result<()> {
    let mut previous: Option<(NaiveDate, &str)> = None;

    for (row, key) in index.iter().enumerate() {
        let Some(date) = parse_date(key) else {
            continue;
        };
        if let Some((prev_date, prev_key)) = previous {
            if date <= prev_date {
                return Err(FeatureError::UnorderedDates {
                    row,
                    date: key.clone(),
                    previous: prev_key.to_string(),
                });
            }
        }
        previous = Some((date, key));
    }

    Ok(())
}

/// `YYYY-MM-DD`, optionally followed by a time part.
fn parse_date(key: &str) -> Option<NaiveDate> {
    let day = key.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
