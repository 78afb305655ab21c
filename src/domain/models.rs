use crate::cli::ProtectedAttribute;
use crate::dataset::Cell;
use crate::domain::constants::{
    DEFAULT_AUTO_APPROVE_MAX, DEFAULT_AUTO_REJECT_MIN, DEFAULT_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// Outcome of the three-way decision policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyDecision {
    #[serde(rename = "Auto-Approve")]
    AutoApprove,
    #[serde(rename = "Manual Review")]
    ManualReview,
    #[serde(rename = "Reject")]
    Reject,
}

impl PolicyDecision {
    /// Canonical display order.
    pub const ALL: [PolicyDecision; 3] = [
        PolicyDecision::AutoApprove,
        PolicyDecision::ManualReview,
        PolicyDecision::Reject,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PolicyDecision::AutoApprove => "Auto-Approve",
            PolicyDecision::ManualReview => "Manual Review",
            PolicyDecision::Reject => "Reject",
        }
    }
}

impl fmt::Display for PolicyDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decision policy controls.
///
/// `threshold` is accepted and echoed back but no computation reads it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyThresholds {
    pub threshold: f64,
    pub auto_approve_max: f64,
    pub auto_reject_min: f64,
}

impl Default for PolicyThresholds {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            auto_approve_max: DEFAULT_AUTO_APPROVE_MAX,
            auto_reject_min: DEFAULT_AUTO_REJECT_MIN,
        }
    }
}

impl PolicyThresholds {
    /// True when the approve band reaches the reject band, leaving no room for
    /// manual review.
    pub fn is_inverted(&self) -> bool {
        self.auto_approve_max >= self.auto_reject_min
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    #[serde(rename = "Auto-Approve")]
    pub auto_approve: usize,
    #[serde(rename = "Manual Review")]
    pub manual_review: usize,
    #[serde(rename = "Reject")]
    pub reject: usize,
}

impl OutcomeCounts {
    pub fn get(&self, decision: PolicyDecision) -> usize {
        match decision {
            PolicyDecision::AutoApprove => self.auto_approve,
            PolicyDecision::ManualReview => self.manual_review,
            PolicyDecision::Reject => self.reject,
        }
    }

    pub fn total(&self) -> usize {
        self.auto_approve + self.manual_review + self.reject
    }

    pub fn rows(&self) -> Vec<OutcomeRow> {
        PolicyDecision::ALL
            .iter()
            .map(|d| OutcomeRow {
                decision: *d,
                count: self.get(*d),
            })
            .collect()
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct OutcomeRow {
    pub decision: PolicyDecision,
    pub count: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct OutcomesReport {
    pub thresholds: PolicyThresholds,
    pub total: usize,
    pub counts: OutcomeCounts,
    pub table: Vec<OutcomeRow>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Classification {
    pub prob_default: f64,
    pub policy_decision: PolicyDecision,
    pub auto_approve_max: f64,
    pub auto_reject_min: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct DecisionRow {
    pub row: usize,
    pub prob_default: f64,
    pub policy_decision: PolicyDecision,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReasonCode {
    pub name: String,
    pub value: Cell,
}

#[derive(Clone, Debug, Serialize)]
pub struct Explanation {
    pub row: usize,
    pub prob_default: f64,
    pub policy_decision: PolicyDecision,
    pub reason_codes: Vec<ReasonCode>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    /// Finite values placed into bins.
    pub counted: usize,
    /// Empty or non-finite values left out of the chart.
    pub excluded: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupFairnessSummary {
    pub group: String,
    pub approval_rate: f64,
    pub members: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DisparateImpact {
    pub min_rate: f64,
    pub max_rate: f64,
    pub ratio: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleStatus {
    Pass,
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GovernanceAction {
    #[serde(rename = "No action required")]
    NoAction,
    #[serde(rename = "Increase manual review for affected group")]
    IncreaseManualReview,
    #[serde(rename = "Disable auto-approval; enforce review")]
    DisableAutoApproval,
}

impl GovernanceAction {
    pub fn label(self) -> &'static str {
        match self {
            GovernanceAction::NoAction => "No action required",
            GovernanceAction::IncreaseManualReview => "Increase manual review for affected group",
            GovernanceAction::DisableAutoApproval => "Disable auto-approval; enforce review",
        }
    }
}

impl fmt::Display for GovernanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct FairnessReport {
    pub attribute: ProtectedAttribute,
    pub available_attributes: Vec<ProtectedAttribute>,
    pub groups: Vec<GroupFairnessSummary>,
    pub min_rate: f64,
    pub max_rate: f64,
    pub disparate_impact: f64,
    pub four_fifths_rule: RuleStatus,
    pub governance_action: GovernanceAction,
}

#[derive(Clone, Debug, Serialize)]
pub struct SchemaReport {
    pub decision_artifact: String,
    pub decision_rows: usize,
    pub decision_columns: Vec<String>,
    pub reason_columns: Vec<String>,
    pub fairness_artifact: String,
    pub fairness_rows: usize,
    pub fairness_columns: Vec<String>,
    pub has_approved_flag: bool,
    pub protected_attributes: Vec<ProtectedAttribute>,
}

/// A dashboard section that either rendered or was skipped with a warning.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Section<T> {
    Ready(T),
    Skipped { warning: String },
}

impl<T> Section<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(v) => Some(v),
            Section::Skipped { .. } => None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct DashboardReport {
    pub banner: &'static str,
    pub thresholds: PolicyThresholds,
    pub warnings: Vec<String>,
    pub outcomes: OutcomesReport,
    pub distribution: Histogram,
    pub explanation: Section<Explanation>,
    pub fairness: Section<FairnessReport>,
    pub footer: &'static str,
}
