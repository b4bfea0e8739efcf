use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Row key of a price table. Daily series use midnight.
pub type TimeKey = NaiveDateTime;

pub const OPEN: &str = "Open";
pub const HIGH: &str = "High";
pub const LOW: &str = "Low";
pub const CLOSE: &str = "Close";
pub const VOLUME: &str = "Volume";

/// Columns every chartable table must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [OPEN, HIGH, LOW, CLOSE, VOLUME];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("index is not strictly increasing at row {position}")]
    UnorderedIndex { position: usize },

    #[error("column '{name}' has {actual} values, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("column names must not be empty")]
    EmptyColumnName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Time-indexed table of OHLCV prices plus any precomputed indicator columns.
///
/// The index is strictly increasing and every column has exactly one cell per
/// index row; `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTable {
    index_name: String,
    index: Vec<TimeKey>,
    columns: Vec<Column>,
}

impl PriceTable {
    pub fn new(index_name: impl Into<String>, index: Vec<TimeKey>) -> Result<Self, TableError> {
        if let Some(position) = index.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(TableError::UnorderedIndex { position: position + 1 });
        }
        Ok(Self {
            index_name: index_name.into(),
            index,
            columns: Vec::new(),
        })
    }

    /// Builder-style `push_column`.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Result<Self, TableError> {
        self.push_column(name, values)?;
        Ok(self)
    }

    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Result<(), TableError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TableError::EmptyColumnName);
        }
        if self.has_column(&name) {
            return Err(TableError::DuplicateColumn(name));
        }
        if values.len() != self.index.len() {
            return Err(TableError::LengthMismatch {
                name,
                expected: self.index.len(),
                actual: values.len(),
            });
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn index(&self) -> &[TimeKey] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Required columns absent from this table, in `REQUIRED_COLUMNS` order.
    pub fn missing_required_columns(&self) -> Vec<&'static str> {
        REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| !self.has_column(name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Rows with `start <= key < end`, keeping every column.
    pub fn between(&self, start: TimeKey, end: TimeKey) -> PriceTable {
        let from = self.index.partition_point(|key| *key < start);
        let to = self.index.partition_point(|key| *key < end).max(from);

        PriceTable {
            index_name: self.index_name.clone(),
            index: self.index[from..to].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: c.values[from..to].to_vec(),
                })
                .collect(),
        }
    }
}
