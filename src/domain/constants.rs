//! Stable names and numeric boundaries shared by every layer.

pub const DEFAULT_ARTIFACTS_DIR: &str = "reports/artifacts";
pub const DECISION_ARTIFACT: &str = "decision_df.csv";
pub const FAIRNESS_ARTIFACT: &str = "fairness_df.csv";

pub const PROB_DEFAULT_COLUMN: &str = "prob_default";
pub const APPROVED_FLAG_COLUMN: &str = "approved_flag";
/// Case-insensitive substring that marks a reason-code column.
pub const REASON_MARKER: &str = "reason";

pub const THRESHOLD_MIN: f64 = 0.05;
pub const THRESHOLD_MAX: f64 = 0.95;
pub const THRESHOLD_STEP: f64 = 0.01;
pub const DEFAULT_THRESHOLD: f64 = 0.35;
pub const DEFAULT_AUTO_APPROVE_MAX: f64 = 0.20;
pub const DEFAULT_AUTO_REJECT_MIN: f64 = 0.60;

pub const HISTOGRAM_BINS: usize = 30;

/// Four-fifths rule: disparate impact at or above this passes.
pub const FOUR_FIFTHS_RULE: f64 = 0.8;
/// Below this the recommendation escalates from more review to no auto-approval.
pub const ESCALATION_FLOOR: f64 = 0.6;

pub const GOVERNANCE_BANNER: &str = "Governed AI Decision System Active: models trained offline, \
decisions policy-controlled, explanations & fairness audited, dashboard consumes artifacts only";
pub const FOOTER: &str = "This dashboard intentionally consumes only governed artifacts; \
models remain offline for auditability and stability.";
