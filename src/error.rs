//! Error taxonomy for artifact loading and section evaluation.
//!
//! Fatal errors stop all rendering. Degraded errors only skip their own
//! dashboard section; `report` turns them into section warnings.

use crate::cli::ProtectedAttribute;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Missing required artifact: {}", path.display())]
    MissingArtifact { path: PathBuf },

    #[error("Malformed artifact {}: {reason}", path.display())]
    MalformedArtifact { path: PathBuf, reason: String },

    #[error("{artifact} must contain column: {column}")]
    MissingColumn {
        artifact: &'static str,
        column: &'static str,
    },

    #[error("fairness_df missing approved_flag; regenerate fairness artifact.")]
    MissingApprovedFlag,

    #[error("No protected attributes found.")]
    NoProtectedAttributes,

    #[error("protected attribute {attribute} not present (available: {available})")]
    UnknownAttribute {
        attribute: ProtectedAttribute,
        available: String,
    },

    #[error("invalid approved_flag value {value:?} at row {row}")]
    InvalidApprovedFlag { row: usize, value: String },

    #[error("approval rate for group {group} is not finite ({rate})")]
    NonFiniteApprovalRate { group: String, rate: f64 },

    #[error("no rows with both {attribute} and approved_flag values")]
    NoFairnessData { attribute: ProtectedAttribute },

    #[error("customer row index {index} out of range (dataset has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DashboardError {
    pub fn code(&self) -> &'static str {
        match self {
            DashboardError::MissingArtifact { .. } => "MISSING_ARTIFACT",
            DashboardError::MalformedArtifact { .. } => "MALFORMED_ARTIFACT",
            DashboardError::MissingColumn { .. } => "MISSING_COLUMN",
            DashboardError::MissingApprovedFlag => "MISSING_APPROVED_FLAG",
            DashboardError::NoProtectedAttributes => "NO_PROTECTED_ATTRIBUTES",
            DashboardError::UnknownAttribute { .. } => "UNKNOWN_ATTRIBUTE",
            DashboardError::InvalidApprovedFlag { .. } => "MALFORMED_ARTIFACT",
            DashboardError::NonFiniteApprovalRate { .. } => "MALFORMED_ARTIFACT",
            DashboardError::NoFairnessData { .. } => "NO_FAIRNESS_DATA",
            DashboardError::RowOutOfRange { .. } => "ROW_OUT_OF_RANGE",
            DashboardError::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }

    /// Whether the error halts the whole dashboard rather than one section.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DashboardError::MissingArtifact { .. }
                | DashboardError::MalformedArtifact { .. }
                | DashboardError::MissingColumn { .. }
                | DashboardError::InvalidConfig(_)
        )
    }
}

/// Stable code for any error reaching `main`.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<DashboardError>()
        .map(DashboardError::code)
        .unwrap_or("INTERNAL")
}
