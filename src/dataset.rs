//! In-memory tabular artifacts and one-time schema detection.
//!
//! Delimited files are parsed into a [`Table`] of loosely typed [`Cell`]s.
//! [`DecisionDataset`] and [`FairnessDataset`] wrap a table together with the
//! columns the evaluator cares about, detected once when the artifact loads.

use crate::cli::ProtectedAttribute;
use crate::domain::constants::{APPROVED_FLAG_COLUMN, PROB_DEFAULT_COLUMN, REASON_MARKER};
use crate::domain::models::ReasonCode;
use crate::error::DashboardError;
use serde::Serialize;
use std::fmt;
use std::io::Read;
use std::path::Path;

/// One scalar value read from an artifact.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Tokens read as a missing value, matching the pandas CSV reader defaults.
pub const MISSING_VALUE_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

impl Cell {
    pub fn parse(raw: &str) -> Cell {
        let s = raw.trim();
        if s.is_empty() || MISSING_VALUE_MARKERS.contains(&s) {
            return Cell::Empty;
        }
        match s {
            "true" | "True" | "TRUE" => return Cell::Bool(true),
            "false" | "False" | "FALSE" => return Cell::Bool(false),
            _ => {}
        }
        match s.parse::<f64>() {
            Ok(n) => Cell::Number(n),
            Err(_) => Cell::Text(s.to_string()),
        }
    }

    /// Numeric view; booleans count as 1/0.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Cell::Empty | Cell::Text(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn from_reader<R: Read>(reader: R) -> Result<Table, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let columns = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(Cell::parse).collect());
        }
        Ok(Table { columns, rows })
    }

    /// Parse artifact bytes; any parse failure is reported against `path`.
    pub fn parse_artifact(path: &Path, bytes: &[u8]) -> Result<Table, DashboardError> {
        Table::from_reader(bytes).map_err(|e| DashboardError::MalformedArtifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&Cell::Empty)
    }
}

pub fn is_reason_column(name: &str) -> bool {
    name.to_lowercase().contains(REASON_MARKER)
}

/// Scored customers with the reason-code columns detected at load.
#[derive(Clone, Debug)]
pub struct DecisionDataset {
    table: Table,
    prob_default: Vec<f64>,
    reason_columns: Vec<(usize, String)>,
}

impl DecisionDataset {
    pub fn from_table(table: Table, path: &Path) -> Result<Self, DashboardError> {
        let prob_idx =
            table
                .column_index(PROB_DEFAULT_COLUMN)
                .ok_or(DashboardError::MissingColumn {
                    artifact: "decision_df",
                    column: PROB_DEFAULT_COLUMN,
                })?;

        let mut prob_default = Vec::with_capacity(table.len());
        for (row, cells) in table.rows.iter().enumerate() {
            let value = match cells.get(prob_idx) {
                Some(Cell::Number(n)) => *n,
                // Missing scores stay in the dataset as NaN.
                Some(Cell::Empty) | None => f64::NAN,
                Some(other) => {
                    return Err(DashboardError::MalformedArtifact {
                        path: path.to_path_buf(),
                        reason: format!(
                            "{} value {:?} at row {} is not numeric",
                            PROB_DEFAULT_COLUMN,
                            other.to_string(),
                            row
                        ),
                    })
                }
            };
            prob_default.push(value);
        }

        let reason_columns = table
            .columns
            .iter()
            .enumerate()
            .filter(|(_, name)| is_reason_column(name))
            .map(|(i, name)| (i, name.clone()))
            .collect();

        Ok(Self {
            table,
            prob_default,
            reason_columns,
        })
    }

    pub fn len(&self) -> usize {
        self.prob_default.len()
    }

    pub fn prob_default(&self) -> &[f64] {
        &self.prob_default
    }

    pub fn columns(&self) -> &[String] {
        &self.table.columns
    }

    pub fn reason_columns(&self) -> Vec<String> {
        self.reason_columns.iter().map(|(_, n)| n.clone()).collect()
    }

    pub fn has_reason_columns(&self) -> bool {
        !self.reason_columns.is_empty()
    }

    /// Reason-code values for one row, in column order.
    pub fn reason_codes(&self, row: usize) -> Vec<ReasonCode> {
        self.reason_columns
            .iter()
            .map(|(idx, name)| ReasonCode {
                name: name.clone(),
                value: self.table.cell(row, *idx).clone(),
            })
            .collect()
    }
}

/// Approval outcomes with the protected-attribute columns detected at load.
#[derive(Clone, Debug)]
pub struct FairnessDataset {
    table: Table,
    approved_flag: Option<usize>,
    protected: Vec<(ProtectedAttribute, usize)>,
}

impl FairnessDataset {
    pub fn from_table(table: Table) -> Self {
        let approved_flag = table.column_index(APPROVED_FLAG_COLUMN);
        let protected = table
            .columns
            .iter()
            .enumerate()
            .filter_map(|(i, name)| ProtectedAttribute::from_column(name).map(|a| (a, i)))
            .collect();
        Self {
            table,
            approved_flag,
            protected,
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.table.columns
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn approved_flag_index(&self) -> Option<usize> {
        self.approved_flag
    }

    pub fn protected_attributes(&self) -> Vec<ProtectedAttribute> {
        self.protected.iter().map(|(a, _)| *a).collect()
    }

    pub fn attribute_index(&self, attribute: ProtectedAttribute) -> Option<usize> {
        self.protected
            .iter()
            .find(|(a, _)| *a == attribute)
            .map(|(_, i)| *i)
    }
}
