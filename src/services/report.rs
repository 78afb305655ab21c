use crate::cli::ProtectedAttribute;
use crate::dataset::DecisionDataset;
use crate::domain::constants::{FOOTER, GOVERNANCE_BANNER, HISTOGRAM_BINS};
use crate::domain::models::{
    DashboardReport, Explanation, PolicyThresholds, SchemaReport, Section,
};
use crate::error::DashboardError;
use crate::services::distribution::histogram;
use crate::services::explain::{clamp_row, explain};
use crate::services::fairness;
use crate::services::policy::{inversion_warning, outcomes_report};
use crate::services::storage::{ArtifactPaths, Artifacts};

pub const NO_REASON_COLUMNS_WARNING: &str =
    "No reason code columns found. Export reason codes from SHAP step into decision_df.";

/// Turn a section result into a ready or skipped section. Fatal errors still
/// halt the dashboard.
pub fn degrade<T>(
    section: &'static str,
    result: Result<T, DashboardError>,
) -> Result<Section<T>, DashboardError> {
    match result {
        Ok(value) => Ok(Section::Ready(value)),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            tracing::warn!(section, code = e.code(), "{}", e);
            Ok(Section::Skipped {
                warning: e.to_string(),
            })
        }
    }
}

/// Reason-code section; the requested row is clamped into the dataset.
pub fn explanation_section(
    decision: &DecisionDataset,
    thresholds: &PolicyThresholds,
    row: usize,
) -> Result<Section<Explanation>, DashboardError> {
    if !decision.has_reason_columns() {
        tracing::warn!(section = "reason_codes", "{}", NO_REASON_COLUMNS_WARNING);
        return Ok(Section::Skipped {
            warning: NO_REASON_COLUMNS_WARNING.to_string(),
        });
    }
    degrade(
        "reason_codes",
        explain(decision, thresholds, clamp_row(decision, row)),
    )
}

/// Assemble every dashboard section. Non-fatal section failures become
/// warnings.
pub fn build_dashboard_report(
    artifacts: &Artifacts,
    thresholds: &PolicyThresholds,
    row: usize,
    attribute: Option<ProtectedAttribute>,
) -> Result<DashboardReport, DashboardError> {
    let mut warnings = Vec::new();
    if let Some(w) = inversion_warning(thresholds) {
        tracing::warn!("{}", w);
        warnings.push(w);
    }

    let explanation = explanation_section(&artifacts.decision, thresholds, row)?;
    let fairness = degrade("fairness", fairness::evaluate(&artifacts.fairness, attribute))?;

    Ok(DashboardReport {
        banner: GOVERNANCE_BANNER,
        thresholds: *thresholds,
        warnings,
        outcomes: outcomes_report(&artifacts.decision, thresholds),
        distribution: histogram(artifacts.decision.prob_default(), HISTOGRAM_BINS),
        explanation,
        fairness,
        footer: FOOTER,
    })
}

pub fn schema_report(artifacts: &Artifacts, paths: &ArtifactPaths) -> SchemaReport {
    SchemaReport {
        decision_artifact: paths.decision.display().to_string(),
        decision_rows: artifacts.decision.len(),
        decision_columns: artifacts.decision.columns().to_vec(),
        reason_columns: artifacts.decision.reason_columns(),
        fairness_artifact: paths.fairness.display().to_string(),
        fairness_rows: artifacts.fairness.len(),
        fairness_columns: artifacts.fairness.columns().to_vec(),
        has_approved_flag: artifacts.fairness.approved_flag_index().is_some(),
        protected_attributes: artifacts.fairness.protected_attributes(),
    }
}
