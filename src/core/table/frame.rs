use crate::error::{Result, TableError};
use crate::raw::{RawTable, coerce_number};

/// A named numeric column. `NaN` marks an undefined cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Date-indexed table of `f64` columns.
///
/// Rows keep the order they were created in; nothing in this type sorts or
/// reorders them. Columns are appended by name and looked up by name, and a
/// column pushed under an existing name replaces it in place.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    index_name: String,
    index: Vec<String>,
    columns: Vec<Column>,
}

impl FeatureTable {
    pub fn new(index_name: impl Into<String>, index: Vec<String>) -> Self {
        Self {
            index_name: index_name.into(),
            index,
            columns: Vec::new(),
        }
    }

    /// Table indexed by row ordinal `0..n_rows`.
    pub fn with_ordinal_index(index_name: impl Into<String>, n_rows: usize) -> Self {
        Self::new(index_name, (0..n_rows).map(|i| i.to_string()).collect())
    }

    /// Numeric view of a raw table: `index_column` becomes the row index (row
    /// ordinals when absent) and every other column is coerced cell by cell.
    pub fn from_raw(raw: &RawTable, index_column: &str) -> Self {
        let index_pos = raw.position(index_column);
        let mut table = match index_pos {
            Some(pos) => Self::new(
                index_column,
                raw.column_at(pos).map(str::to_string).collect(),
            ),
            None => Self::with_ordinal_index(index_column, raw.len()),
        };

        for (pos, name) in raw.headers().iter().enumerate() {
            if Some(pos) == index_pos {
                continue;
            }
            table.columns.push(Column {
                name: name.clone(),
                values: raw.column_at(pos).map(coerce_number).collect(),
            });
        }

        table
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Like [`column`](Self::column) but a missing column is an error.
    pub fn require(&self, name: &str) -> Result<&[f64]> {
        self.column(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Append a column, or replace the values of a same-named one.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if values.len() != self.len() {
            return Err(TableError::LengthMismatch {
                column: name,
                expected: self.len(),
                actual: values.len(),
            });
        }

        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.values = values,
            None => self.columns.push(Column { name, values }),
        }
        Ok(())
    }

    /// A copy of this table with one more column; `self` is left untouched.
    pub fn with_column(&self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let mut next = self.clone();
        next.push_column(name, values)?;
        Ok(next)
    }

    /// A copy of this table with several more columns, appended in order.
    pub fn with_columns<S: Into<String>>(&self, columns: Vec<(S, Vec<f64>)>) -> Result<Self> {
        let mut next = self.clone();
        for (name, values) in columns {
            next.push_column(name, values)?;
        }
        Ok(next)
    }

    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<()> {
        if from == to {
            return self.require(from).map(|_| ());
        }
        if self.has_column(to) {
            return Err(TableError::DuplicateColumn(to.to_string()));
        }
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name == from)
            .ok_or_else(|| TableError::MissingColumn(from.to_string()))?;
        column.name = to.to_string();
        Ok(())
    }

    /// Whether every column holds a defined value at `row`.
    pub fn is_row_complete(&self, row: usize) -> bool {
        self.columns.iter().all(|c| !c.values[row].is_nan())
    }

    /// Rows at the given positions, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            index_name: self.index_name.clone(),
            index: rows.iter().map(|&r| self.index[r].clone()).collect(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: rows.iter().map(|&r| c.values[r]).collect(),
                })
                .collect(),
        }
    }

    /// Keep only the rows where every column is defined. Order is preserved.
    pub fn retain_complete(&self) -> Self {
        let keep: Vec<usize> = (0..self.len()).filter(|&r| self.is_row_complete(r)).collect();
        self.select_rows(&keep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: usize) -> Vec<String> {
        (1..=n).map(|d| format!("2021-03-{:02}", d)).collect()
    }

    #[test]
    fn test_push_and_lookup() {
        let mut table = FeatureTable::new("Date", dates(3));
        table.push_column("Adj_Close", vec![1.0, 2.0, 3.0]).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.column("Adj_Close").unwrap(), &[1.0, 2.0, 3.0]);
        assert!(table.column("Volume").is_none());
        assert!(matches!(
            table.require("Volume"),
            Err(TableError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_push_rejects_wrong_length() {
        let mut table = FeatureTable::new("Date", dates(3));
        let err = table.push_column("x", vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            TableError::LengthMismatch { expected: 3, actual: 1, .. }
        ));
    }

    #[test]
    fn test_push_replaces_same_name() {
        let mut table = FeatureTable::new("Date", dates(2));
        table.push_column("x", vec![1.0, 2.0]).unwrap();
        table.push_column("y", vec![5.0, 6.0]).unwrap();
        table.push_column("x", vec![3.0, 4.0]).unwrap();

        assert_eq!(table.column_names(), vec!["x", "y"]);
        assert_eq!(table.column("x").unwrap(), &[3.0, 4.0]);
    }

    #[test]
    fn test_with_column_leaves_input_untouched() {
        let mut base = FeatureTable::new("Date", dates(2));
        base.push_column("a", vec![1.0, 2.0]).unwrap();

        let next = base.with_column("b", vec![3.0, 4.0]).unwrap();

        assert_eq!(base.column_names(), vec!["a"]);
        assert_eq!(next.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_rename_column() {
        let mut table = FeatureTable::new("Date", dates(1));
        table.push_column("Close", vec![1.0]).unwrap();
        table.push_column("Open", vec![2.0]).unwrap();

        table.rename_column("Close", "Adj_Close").unwrap();
        assert!(table.has_column("Adj_Close"));
        assert!(!table.has_column("Close"));

        assert!(matches!(
            table.rename_column("Open", "Adj_Close"),
            Err(TableError::DuplicateColumn(_))
        ));
        assert!(matches!(
            table.rename_column("High", "x"),
            Err(TableError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_retain_complete() {
        let mut table = FeatureTable::new("Date", dates(5));
        table
            .push_column("a", vec![f64::NAN, 1.0, 2.0, 3.0, 4.0])
            .unwrap();
        table
            .push_column("b", vec![1.0, 1.0, f64::NAN, 1.0, 1.0])
            .unwrap();

        let dense = table.retain_complete();

        assert_eq!(dense.len(), 3);
        assert_eq!(dense.index(), &["2021-03-02", "2021-03-04", "2021-03-05"]);
        assert_eq!(dense.column("a").unwrap(), &[1.0, 3.0, 4.0]);
        assert!((0..dense.len()).all(|r| dense.is_row_complete(r)));
    }

    #[test]
    fn test_retain_complete_all_undefined() {
        let mut table = FeatureTable::new("Date", dates(3));
        table.push_column("a", vec![f64::NAN; 3]).unwrap();

        let dense = table.retain_complete();
        assert!(dense.is_empty());
        assert_eq!(dense.column_names(), vec!["a"]);
    }

    #[test]
    fn test_from_raw() {
        let raw = RawTable::from_columns(vec![
            ("Date", vec!["2021-03-01".to_string(), "2021-03-02".to_string()]),
            ("x", vec!["1.5".to_string(), "bad".to_string()]),
        ])
        .unwrap();

        let table = FeatureTable::from_raw(&raw, "Date");
        assert_eq!(table.index_name(), "Date");
        assert_eq!(table.index(), &dates(2)[..]);
        let x = table.column("x").unwrap();
        assert_eq!(x[0], 1.5);
        assert!(x[1].is_nan());
    }

    #[test]
    fn test_from_raw_without_index_column() {
        let raw = RawTable::from_columns(vec![("x", vec!["1".to_string(), "2".to_string()])])
            .unwrap();
        let table = FeatureTable::from_raw(&raw, "Date");
        assert_eq!(table.index(), &["0".to_string(), "1".to_string()]);
        assert_eq!(table.column_names(), vec!["x"]);
    }
}
