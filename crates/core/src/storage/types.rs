use std::fmt;

use serde::{Deserialize, Serialize};

/// A dynamically typed SQL value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    /// Numeric view of the cell, used for chart values and metrics.
    ///
    /// Text that parses as a number counts as numeric; NULL does not.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Null => None,
            Cell::Integer(value) => Some(*value as f64),
            Cell::Real(value) => Some(*value),
            Cell::Text(value) => value.trim().parse().ok(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Integer(value) => write!(f, "{value}"),
            // Debug keeps the decimal point on whole numbers ("17.0").
            Cell::Real(value) => write!(f, "{value:?}"),
            Cell::Text(value) => f.write_str(value),
        }
    }
}

/// The result of a `SELECT`: column names in order plus the rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableData {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column. Exact match wins; otherwise case-insensitive,
    /// since SQLite keeps whatever case the query's alias used.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column == name)
            .or_else(|| {
                self.columns
                    .iter()
                    .position(|column| column.eq_ignore_ascii_case(name))
            })
    }

    /// The value in the first row of a column, for single-value results.
    pub fn first_value(&self, name: &str) -> Option<&Cell> {
        let index = self.column_index(name)?;
        self.rows.first().and_then(|row| row.get(index))
    }
}

/// Headline numbers for the introduction view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_food: i64,
    pub total_claims: i64,
    pub completed_claims: i64,
    /// `(city, provider count)`, largest first.
    pub providers_by_city: Vec<(String, i64)>,
}
