//! Plain-text rendering of dashboard sections.

use crate::domain::models::{
    DashboardReport, DecisionRow, Explanation, FairnessReport, Histogram, OutcomesReport,
    RuleStatus, SchemaReport, Section,
};
use std::fmt::Write;

const BAR_WIDTH: usize = 40;

pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }
    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers.to_vec()));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    for row in rows {
        out.push('\n');
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

pub fn render_outcomes(r: &OutcomesReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Auto-Approve: {}   Manual Review: {}   Reject: {}",
        r.counts.auto_approve, r.counts.manual_review, r.counts.reject
    );
    let rows: Vec<Vec<String>> = r
        .table
        .iter()
        .map(|row| vec![row.decision.to_string(), row.count.to_string()])
        .collect();
    out.push_str(&render_table(&["Decision", "Count"], &rows));
    out
}

pub fn render_decisions(rows: &[DecisionRow]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.row.to_string(),
                format!("{:.4}", r.prob_default),
                r.policy_decision.to_string(),
            ]
        })
        .collect();
    render_table(&["row", "prob_default", "policy_decision"], &rows)
}

pub fn render_histogram(h: &Histogram) -> String {
    let mut out = String::from("Probability of Default vs Number of Customers\n");
    if h.bins.is_empty() {
        out.push_str("(no finite prob_default values)");
        return out;
    }
    let peak = h.bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    for (i, b) in h.bins.iter().enumerate() {
        let close = if i + 1 == h.bins.len() { ']' } else { ')' };
        let len = (b.count * BAR_WIDTH).div_ceil(peak);
        let _ = writeln!(
            out,
            "[{:.3}, {:.3}{} {:<width$} {}",
            b.lower,
            b.upper,
            close,
            "#".repeat(len),
            b.count,
            width = BAR_WIDTH
        );
    }
    if h.excluded > 0 {
        let _ = writeln!(out, "({} rows without a finite prob_default not shown)", h.excluded);
    }
    out.trim_end().to_string()
}

pub fn render_explanation(e: &Explanation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "row: {}", e.row);
    let _ = writeln!(out, "prob_default: {}", e.prob_default);
    let _ = writeln!(out, "policy_decision: {}", e.policy_decision);
    if e.reason_codes.is_empty() {
        out.push_str("reason codes: none");
        return out;
    }
    let rows: Vec<Vec<String>> = e
        .reason_codes
        .iter()
        .map(|rc| vec![rc.name.clone(), rc.value.to_string()])
        .collect();
    out.push_str(&render_table(&["reason", "value"], &rows));
    out
}

pub fn render_fairness(f: &FairnessReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Protected Attribute: {}", f.attribute);
    let rows: Vec<Vec<String>> = f
        .groups
        .iter()
        .map(|g| {
            vec![
                g.group.clone(),
                format!("{:.3}", g.approval_rate),
                g.members.to_string(),
            ]
        })
        .collect();
    out.push_str(&render_table(
        &[f.attribute.column(), "approval_rate", "members"],
        &rows,
    ));
    out.push('\n');
    let _ = writeln!(
        out,
        "Min Approval Rate: {:.3}   Max Approval Rate: {:.3}   Disparate Impact: {:.3}",
        f.min_rate, f.max_rate, f.disparate_impact
    );
    match f.four_fifths_rule {
        RuleStatus::Pass => out.push_str("80% Rule: PASS\n"),
        RuleStatus::Fail => out.push_str("80% Rule: FAIL (mitigation required)\n"),
    }
    let _ = write!(
        out,
        "Recommended governance action: {}",
        f.governance_action
    );
    out
}

pub fn render_schema(s: &SchemaReport) -> String {
    let list = |v: &[String]| {
        if v.is_empty() {
            "none".to_string()
        } else {
            v.join(", ")
        }
    };
    let protected: Vec<String> = s.protected_attributes.iter().map(|a| a.to_string()).collect();
    let mut out = String::new();
    let _ = writeln!(out, "decision artifact: {} ({} rows)", s.decision_artifact, s.decision_rows);
    let _ = writeln!(out, "  columns: {}", list(&s.decision_columns));
    let _ = writeln!(out, "  reason columns: {}", list(&s.reason_columns));
    let _ = writeln!(out, "fairness artifact: {} ({} rows)", s.fairness_artifact, s.fairness_rows);
    let _ = writeln!(out, "  columns: {}", list(&s.fairness_columns));
    let _ = writeln!(out, "  approved_flag: {}", if s.has_approved_flag { "present" } else { "missing" });
    let _ = write!(out, "  protected attributes: {}", list(&protected));
    out
}

fn render_section<T>(out: &mut String, title: &str, section: &Section<T>, body: impl Fn(&T) -> String) {
    let _ = writeln!(out, "\n{}", title);
    match section {
        Section::Ready(v) => {
            let _ = writeln!(out, "{}", body(v));
        }
        Section::Skipped { warning } => {
            let _ = writeln!(out, "warning: {}", warning);
        }
    }
}

pub fn render_dashboard(r: &DashboardReport) -> String {
    let mut out = String::from("AI Decision Intelligence & Governance Platform\n");
    out.push_str("Executive Dashboard: Credit Risk Decisioning\n\n");
    let _ = writeln!(out, "{}", r.banner);
    let _ = writeln!(
        out,
        "Policy: Auto-Approve if prob_default <= {:.2}; Auto-Reject if prob_default >= {:.2}; else Manual Review (threshold {:.2})",
        r.thresholds.auto_approve_max, r.thresholds.auto_reject_min, r.thresholds.threshold
    );
    for w in &r.warnings {
        let _ = writeln!(out, "warning: {}", w);
    }

    let _ = writeln!(out, "\nA) Decision Outcomes Overview");
    let _ = writeln!(out, "{}", render_outcomes(&r.outcomes));
    let _ = writeln!(out, "\nB) Risk Distribution");
    let _ = writeln!(out, "{}", render_histogram(&r.distribution));
    render_section(&mut out, "C) Customer Reason Codes", &r.explanation, render_explanation);
    render_section(&mut out, "D) Fairness & Governance", &r.fairness, render_fairness);

    let _ = write!(out, "\n{}", r.footer);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ProtectedAttribute;
    use crate::domain::models::{GovernanceAction, GroupFairnessSummary};

    #[test]
    fn table_columns_are_aligned() {
        let t = render_table(
            &["Decision", "Count"],
            &[vec!["Auto-Approve".into(), "1".into()], vec!["Reject".into(), "12".into()]],
        );
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines[0], "Decision      Count");
        assert_eq!(lines[1], "------------  -----");
        assert_eq!(lines[2], "Auto-Approve  1");
        assert_eq!(lines[3], "Reject        12");
    }

    #[test]
    fn fairness_text_names_rule_and_action() {
        let f = FairnessReport {
            attribute: ProtectedAttribute::Sex,
            available_attributes: vec![ProtectedAttribute::Sex],
            groups: vec![GroupFairnessSummary {
                group: "1".into(),
                approval_rate: 0.9,
                members: 10,
            }],
            min_rate: 0.9,
            max_rate: 0.9,
            disparate_impact: 1.0,
            four_fifths_rule: RuleStatus::Pass,
            governance_action: GovernanceAction::NoAction,
        };
        let text = render_fairness(&f);
        assert!(text.contains("80% Rule: PASS"));
        assert!(text.contains("Recommended governance action: No action required"));
        assert!(text.contains("Disparate Impact: 1.000"));
    }
}
