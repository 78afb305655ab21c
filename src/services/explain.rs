use crate::dataset::DecisionDataset;
use crate::domain::models::{Explanation, PolicyThresholds};
use crate::error::DashboardError;
use crate::services::policy::classify_with;

/// Probability, decision and reason codes for one customer row.
pub fn explain(
    dataset: &DecisionDataset,
    thresholds: &PolicyThresholds,
    row: usize,
) -> Result<Explanation, DashboardError> {
    let prob_default = *dataset
        .prob_default()
        .get(row)
        .ok_or(DashboardError::RowOutOfRange {
            index: row,
            len: dataset.len(),
        })?;
    Ok(Explanation {
        row,
        prob_default,
        policy_decision: classify_with(prob_default, thresholds),
        reason_codes: dataset.reason_codes(row),
    })
}

/// Clamp a requested row the way a bounded numeric control would.
pub fn clamp_row(dataset: &DecisionDataset, row: usize) -> usize {
    row.min(dataset.len().saturating_sub(1))
}
