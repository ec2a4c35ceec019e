use crate::error::{Result, TableError};

/// Parse a cell as a finite `f64`, yielding `NaN` for anything else.
///
/// Surrounding whitespace is ignored. Empty cells, text, and the literal
/// spellings of infinity or NaN all become `NaN`.
pub fn coerce_number(cell: &str) -> f64 {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(f64::NAN)
}

/// Text cells of a table, row-major, as read from a CSV file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Build a table column by column. All columns must have equal length.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<String>)>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, |(_, cells)| cells.len());
        let mut headers = Vec::with_capacity(columns.len());
        let mut rows = vec![Vec::with_capacity(columns.len()); n_rows];

        for (name, cells) in columns {
            let name = name.into();
            if cells.len() != n_rows {
                return Err(TableError::LengthMismatch {
                    column: name,
                    expected: n_rows,
                    actual: cells.len(),
                });
            }
            for (row, cell) in rows.iter_mut().zip(cells) {
                row.push(cell);
            }
            headers.push(name);
        }

        Ok(Self { headers, rows })
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.headers.len() {
            return Err(TableError::LengthMismatch {
                column: format!("row {}", self.rows.len()),
                expected: self.headers.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Cells of the column at `idx`, top to bottom.
    pub fn column_at(&self, idx: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row[idx].as_str())
    }

    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        self.position(name).map(|idx| self.column_at(idx).collect())
    }
}
