use crate::cli::ProtectedAttribute;
use crate::dataset::{Cell, FairnessDataset};
use crate::domain::constants::{ESCALATION_FLOOR, FOUR_FIFTHS_RULE};
use crate::domain::models::{
    DisparateImpact, FairnessReport, GovernanceAction, GroupFairnessSummary, RuleStatus,
};
use crate::error::DashboardError;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Grouping key: numeric groups sort numerically and before textual ones.
#[derive(Debug, Clone)]
enum GroupKey {
    Number(f64),
    Text(String),
}

impl GroupKey {
    fn from_cell(cell: &Cell) -> GroupKey {
        match cell {
            Cell::Number(n) => GroupKey::Number(*n),
            other => GroupKey::Text(other.to_string()),
        }
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (GroupKey::Number(a), GroupKey::Number(b)) => a.total_cmp(b),
            (GroupKey::Number(_), GroupKey::Text(_)) => Ordering::Less,
            (GroupKey::Text(_), GroupKey::Number(_)) => Ordering::Greater,
            (GroupKey::Text(a), GroupKey::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

struct GroupAcc {
    label: String,
    approved: f64,
    members: usize,
}

/// Mean `approved_flag` per distinct value of `attribute`.
///
/// Rows with an empty group value or an empty flag are left out, so every
/// returned group has at least one member.
pub fn group_approval_rates(
    dataset: &FairnessDataset,
    attribute: ProtectedAttribute,
) -> Result<Vec<GroupFairnessSummary>, DashboardError> {
    let flag_idx = dataset
        .approved_flag_index()
        .ok_or(DashboardError::MissingApprovedFlag)?;
    let attr_idx = dataset
        .attribute_index(attribute)
        .ok_or_else(|| unknown_attribute(dataset, attribute))?;

    let table = dataset.table();
    let mut groups: BTreeMap<GroupKey, GroupAcc> = BTreeMap::new();
    for row in 0..table.len() {
        let key = table.cell(row, attr_idx);
        let flag = table.cell(row, flag_idx);
        if key.is_empty() || flag.is_empty() {
            continue;
        }
        let approved = flag
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DashboardError::InvalidApprovedFlag {
                row,
                value: flag.to_string(),
            })?;
        let acc = groups
            .entry(GroupKey::from_cell(key))
            .or_insert_with(|| GroupAcc {
                label: key.to_string(),
                approved: 0.0,
                members: 0,
            });
        acc.approved += approved;
        acc.members += 1;
    }

    Ok(groups
        .into_values()
        .map(|acc| GroupFairnessSummary {
            group: acc.label,
            approval_rate: acc.approved / acc.members as f64,
            members: acc.members,
        })
        .collect())
}

/// Ratio of the lowest to the highest group approval rate.
///
/// A zero (or absent) maximum yields a ratio of 0 rather than an error, which
/// also reports the all-zero case as maximal disparity. A non-finite rate is
/// an error.
pub fn disparate_impact(
    groups: &[GroupFairnessSummary],
) -> Result<DisparateImpact, DashboardError> {
    if let Some(bad) = groups.iter().find(|g| !g.approval_rate.is_finite()) {
        return Err(DashboardError::NonFiniteApprovalRate {
            group: bad.group.clone(),
            rate: bad.approval_rate,
        });
    }
    if groups.is_empty() {
        return Ok(DisparateImpact {
            min_rate: 0.0,
            max_rate: 0.0,
            ratio: 0.0,
        });
    }
    let min_rate = groups
        .iter()
        .map(|g| g.approval_rate)
        .fold(f64::INFINITY, f64::min);
    let max_rate = groups
        .iter()
        .map(|g| g.approval_rate)
        .fold(f64::NEG_INFINITY, f64::max);
    let ratio = if max_rate > 0.0 {
        min_rate / max_rate
    } else {
        0.0
    };
    Ok(DisparateImpact {
        min_rate,
        max_rate,
        ratio,
    })
}

pub fn four_fifths_rule(di: f64) -> RuleStatus {
    if di >= FOUR_FIFTHS_RULE {
        RuleStatus::Pass
    } else {
        RuleStatus::Fail
    }
}

pub fn governance_action(di: f64) -> GovernanceAction {
    if di >= FOUR_FIFTHS_RULE {
        GovernanceAction::NoAction
    } else if di >= ESCALATION_FLOOR {
        GovernanceAction::IncreaseManualReview
    } else {
        GovernanceAction::DisableAutoApproval
    }
}

/// Full fairness section for `attribute`, or the first protected column when unset.
pub fn evaluate(
    dataset: &FairnessDataset,
    attribute: Option<ProtectedAttribute>,
) -> Result<FairnessReport, DashboardError> {
    if dataset.approved_flag_index().is_none() {
        return Err(DashboardError::MissingApprovedFlag);
    }
    let available = dataset.protected_attributes();
    let attribute = match (attribute, available.first()) {
        (_, None) => return Err(DashboardError::NoProtectedAttributes),
        (Some(a), _) if !available.contains(&a) => return Err(unknown_attribute(dataset, a)),
        (Some(a), _) => a,
        (None, Some(first)) => *first,
    };

    let groups = group_approval_rates(dataset, attribute)?;
    if groups.is_empty() {
        return Err(DashboardError::NoFairnessData { attribute });
    }
    let di = disparate_impact(&groups)?;
    tracing::debug!(
        attribute = %attribute,
        groups = groups.len(),
        disparate_impact = di.ratio,
        "fairness evaluated"
    );

    Ok(FairnessReport {
        attribute,
        available_attributes: available,
        groups,
        min_rate: di.min_rate,
        max_rate: di.max_rate,
        disparate_impact: di.ratio,
        four_fifths_rule: four_fifths_rule(di.ratio),
        governance_action: governance_action(di.ratio),
    })
}

pub(crate) fn unknown_attribute(
    dataset: &FairnessDataset,
    attribute: ProtectedAttribute,
) -> DashboardError {
    let available: Vec<String> = dataset
        .protected_attributes()
        .iter()
        .map(|a| a.to_string())
        .collect();
    DashboardError::UnknownAttribute {
        attribute,
        available: if available.is_empty() {
            "none".to_string()
        } else {
            available.join(", ")
        },
    }
}
