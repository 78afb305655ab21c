use crate::dataset::DecisionDataset;
use crate::domain::models::{
    DecisionRow, OutcomeCounts, OutcomesReport, PolicyDecision, PolicyThresholds,
};

/// Three-way decision policy.
///
/// The approve check runs first, so with inverted thresholds every value at or
/// below `approve_max` is still approved and nothing lands in manual review.
pub fn classify(prob: f64, approve_max: f64, reject_min: f64) -> PolicyDecision {
    if prob <= approve_max {
        PolicyDecision::AutoApprove
    } else if prob >= reject_min {
        PolicyDecision::Reject
    } else {
        PolicyDecision::ManualReview
    }
}

pub fn classify_with(prob: f64, thresholds: &PolicyThresholds) -> PolicyDecision {
    classify(
        prob,
        thresholds.auto_approve_max,
        thresholds.auto_reject_min,
    )
}

/// Derived `policy_decision` column for every row.
pub fn apply_policy(dataset: &DecisionDataset, thresholds: &PolicyThresholds) -> Vec<PolicyDecision> {
    dataset
        .prob_default()
        .iter()
        .map(|p| classify_with(*p, thresholds))
        .collect()
}

pub fn count_outcomes(decisions: &[PolicyDecision]) -> OutcomeCounts {
    let mut counts = OutcomeCounts::default();
    for d in decisions {
        match d {
            PolicyDecision::AutoApprove => counts.auto_approve += 1,
            PolicyDecision::ManualReview => counts.manual_review += 1,
            PolicyDecision::Reject => counts.reject += 1,
        }
    }
    counts
}

pub fn outcomes_report(
    dataset: &DecisionDataset,
    thresholds: &PolicyThresholds,
) -> OutcomesReport {
    let counts = count_outcomes(&apply_policy(dataset, thresholds));
    OutcomesReport {
        thresholds: *thresholds,
        total: counts.total(),
        table: counts.rows(),
        counts,
    }
}

pub fn decision_rows(
    dataset: &DecisionDataset,
    thresholds: &PolicyThresholds,
    limit: Option<usize>,
) -> Vec<DecisionRow> {
    dataset
        .prob_default()
        .iter()
        .enumerate()
        .take(limit.unwrap_or(usize::MAX))
        .map(|(row, p)| DecisionRow {
            row,
            prob_default: *p,
            policy_decision: classify_with(*p, thresholds),
        })
        .collect()
}

pub fn inversion_warning(thresholds: &PolicyThresholds) -> Option<String> {
    thresholds.is_inverted().then(|| {
        format!(
            "Auto-Approve threshold {:.2} is not below Auto-Reject threshold {:.2}; no customer will be routed to Manual Review",
            thresholds.auto_approve_max, thresholds.auto_reject_min
        )
    })
}
