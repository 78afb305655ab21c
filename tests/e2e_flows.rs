mod common;

use common::{TestEnv, DECISIONS_THREE_ROWS};
use predicates::str::contains;

#[test]
fn three_customers_split_across_all_outcomes() {
    let env = TestEnv::new(DECISIONS_THREE_ROWS, "SEX,approved_flag\n1,1\n");

    let decisions = env.run_json(&["decisions"]);
    assert_eq!(decisions["ok"], true);
    let rows = decisions["data"].as_array().expect("decision rows");
    let labels: Vec<&str> = rows
        .iter()
        .map(|r| r["policy_decision"].as_str().unwrap_or(""))
        .collect();
    assert_eq!(labels, vec!["Auto-Approve", "Manual Review", "Reject"]);

    let outcomes = env.run_json(&["outcomes"]);
    assert_eq!(outcomes["data"]["counts"]["Auto-Approve"], 1);
    assert_eq!(outcomes["data"]["counts"]["Manual Review"], 1);
    assert_eq!(outcomes["data"]["counts"]["Reject"], 1);
    assert_eq!(outcomes["data"]["total"], 3);
}

#[test]
fn thresholds_from_flags_change_outcomes() {
    let env = TestEnv::new(DECISIONS_THREE_ROWS, "SEX,approved_flag\n1,1\n");
    let outcomes = env.run_json(&[
        "outcomes",
        "--auto-approve-max",
        "0.35",
        "--auto-reject-min",
        "0.90",
    ]);
    assert_eq!(outcomes["data"]["counts"]["Auto-Approve"], 2);
    assert_eq!(outcomes["data"]["counts"]["Manual Review"], 1);
    assert_eq!(outcomes["data"]["counts"]["Reject"], 0);
    assert_eq!(outcomes["data"]["table"][2]["decision"], "Reject");
    assert_eq!(outcomes["data"]["table"][2]["count"], 0);
}

#[test]
fn config_file_thresholds_apply() {
    let env = TestEnv::new(DECISIONS_THREE_ROWS, "SEX,approved_flag\n1,1\n");
    env.write_config("[policy]\nauto_reject_min = 0.30\n");
    let outcomes = env.run_json(&["outcomes"]);
    assert_eq!(outcomes["data"]["thresholds"]["auto_reject_min"], 0.3);
    assert_eq!(outcomes["data"]["counts"]["Reject"], 2);
    assert_eq!(outcomes["data"]["counts"]["Manual Review"], 0);
}

#[test]
fn explain_first_row_without_reason_columns() {
    let env = TestEnv::new(DECISIONS_THREE_ROWS, "SEX,approved_flag\n1,1\n");
    let e = env.run_json(&["explain", "--row", "0"]);
    assert_eq!(e["ok"], true);
    assert_eq!(e["data"]["prob_default"], 0.1);
    assert_eq!(e["data"]["policy_decision"], "Auto-Approve");
    assert_eq!(e["data"]["reason_codes"].as_array().map(Vec::len), Some(0));
}

#[test]
fn explain_surfaces_reason_codes() {
    let env = TestEnv::standard();
    let e = env.run_json(&["explain", "--row", "2"]);
    assert_eq!(e["data"]["policy_decision"], "Reject");
    let codes = e["data"]["reason_codes"].as_array().expect("codes");
    assert_eq!(codes.len(), 2);
    assert_eq!(codes[0]["name"], "reason_1");
    assert_eq!(codes[0]["value"], "PAY_0 three months late");
    assert_eq!(codes[1]["name"], "Reason_2");
}

#[test]
fn explain_rejects_out_of_range_rows() {
    let env = TestEnv::new(DECISIONS_THREE_ROWS, "SEX,approved_flag\n1,1\n");
    let err = env.run_json_failure(&["explain", "--row", "3"]);
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"]["code"], "ROW_OUT_OF_RANGE");

    env.cmd()
        .args(["explain", "--row", "3"])
        .assert()
        .failure()
        .stdout("")
        .stderr(contains("out of range"));
}

#[test]
fn fairness_two_groups_fails_four_fifths_rule() {
    let env = TestEnv::standard();
    let f = env.run_json(&["fairness"]);
    assert_eq!(f["ok"], true);
    assert_eq!(f["data"]["attribute"], "SEX");
    assert_eq!(f["data"]["groups"][0]["group"], "1");
    let di = f["data"]["disparate_impact"].as_f64().expect("di");
    assert!((di - 0.5 / 0.9).abs() < 1e-9);
    assert_eq!(f["data"]["four_fifths_rule"], "FAIL");
    assert_eq!(
        f["data"]["governance_action"],
        "Disable auto-approval; enforce review"
    );
}

#[test]
fn fairness_by_age_group_recommends_more_review() {
    let env = TestEnv::standard();
    let f = env.run_json(&["fairness", "--attribute", "AGE_GROUP"]);
    assert_eq!(f["data"]["attribute"], "AGE_GROUP");
    assert_eq!(
        f["data"]["governance_action"],
        "Increase manual review for affected group"
    );
}

#[test]
fn fairness_all_zero_rates_reports_zero_impact() {
    let env = TestEnv::new(DECISIONS_THREE_ROWS, "SEX,approved_flag\n1,0\n2,0\n");
    let f = env.run_json(&["fairness"]);
    assert_eq!(f["data"]["disparate_impact"], 0.0);
    assert_eq!(f["data"]["four_fifths_rule"], "FAIL");
}

#[test]
fn fairness_without_approved_flag_is_an_error_when_requested_directly() {
    let env = TestEnv::new(DECISIONS_THREE_ROWS, "SEX,approved\n1,1\n");
    let err = env.run_json_failure(&["fairness"]);
    assert_eq!(err["error"]["code"], "MISSING_APPROVED_FLAG");
}

#[test]
fn missing_decision_artifact_halts_with_its_path() {
    let env = TestEnv::empty();
    env.write_fairness("SEX,approved_flag\n1,1\n");
    env.cmd()
        .arg("report")
        .assert()
        .failure()
        .stdout("")
        .stderr(contains("Missing required artifact"))
        .stderr(contains("decision_df.csv"));
}

#[test]
fn missing_fairness_artifact_is_fatal_too() {
    let env = TestEnv::empty();
    env.write_decision(DECISIONS_THREE_ROWS);
    let err = env.run_json_failure(&["outcomes"]);
    assert_eq!(err["error"]["code"], "MISSING_ARTIFACT");
    assert!(err["error"]["message"]
        .as_str()
        .unwrap_or("")
        .ends_with("fairness_df.csv"));
}

#[test]
fn missing_prob_default_halts() {
    let env = TestEnv::new("score\n0.1\n", "SEX,approved_flag\n1,1\n");
    let err = env.run_json_failure(&["report"]);
    assert_eq!(err["error"]["code"], "MISSING_COLUMN");
    assert_eq!(
        err["error"]["message"],
        "decision_df must contain column: prob_default"
    );
}

#[test]
fn malformed_artifact_is_fatal() {
    let env = TestEnv::new(DECISIONS_THREE_ROWS, "SEX,approved_flag\n1,1,1\n");
    let err = env.run_json_failure(&["report"]);
    assert_eq!(err["error"]["code"], "MALFORMED_ARTIFACT");
}

#[test]
fn report_degrades_sections_independently() {
    let env = TestEnv::new(DECISIONS_THREE_ROWS, "gender,approved_flag\nF,1\n");
    let r = env.run_json(&["report"]);
    assert_eq!(r["ok"], true);
    assert_eq!(r["data"]["outcomes"]["total"], 3);
    assert_eq!(r["data"]["distribution"]["bins"].as_array().map(Vec::len), Some(30));
    assert_eq!(r["data"]["explanation"]["status"], "skipped");
    assert!(r["data"]["explanation"]["warning"]
        .as_str()
        .unwrap_or("")
        .contains("No reason code columns found"));
    assert_eq!(r["data"]["fairness"]["status"], "skipped");
    assert_eq!(r["data"]["fairness"]["warning"], "No protected attributes found.");
}

#[test]
fn report_text_renders_every_section() {
    let env = TestEnv::standard();
    env.cmd()
        .args(["report", "--row", "1"])
        .assert()
        .success()
        .stdout(contains("A) Decision Outcomes Overview"))
        .stdout(contains("B) Risk Distribution"))
        .stdout(contains("C) Customer Reason Codes"))
        .stdout(contains("PAY_0 one month late"))
        .stdout(contains("D) Fairness & Governance"))
        .stdout(contains("80% Rule: FAIL"))
        .stdout(contains(
            "Recommended governance action: Disable auto-approval; enforce review",
        ));
}

#[test]
fn inverted_thresholds_are_flagged_not_corrected() {
    let env = TestEnv::standard();
    let r = env.run_json(&[
        "report",
        "--auto-approve-max",
        "0.60",
        "--auto-reject-min",
        "0.30",
    ]);
    assert_eq!(r["data"]["outcomes"]["counts"]["Manual Review"], 0);
    assert_eq!(r["data"]["outcomes"]["counts"]["Auto-Approve"], 2);
    assert_eq!(r["data"]["warnings"].as_array().map(Vec::len), Some(1));
}

#[test]
fn classify_uses_active_thresholds_only() {
    let env = TestEnv::empty();
    let c = env.run_json(&["classify", "0.35", "--threshold", "0.05"]);
    assert_eq!(c["data"]["policy_decision"], "Manual Review");
    env.cmd()
        .args(["classify", "0.60"])
        .assert()
        .success()
        .stdout("Reject\n");
}

#[test]
fn schema_lists_detected_columns() {
    let env = TestEnv::standard();
    let s = env.run_json(&["schema"]);
    assert_eq!(s["data"]["decision_rows"], 3);
    assert_eq!(s["data"]["reason_columns"][0], "reason_1");
    assert_eq!(s["data"]["has_approved_flag"], true);
    assert_eq!(s["data"]["protected_attributes"][0], "SEX");
    assert_eq!(s["data"]["protected_attributes"][1], "AGE_GROUP");
}

#[test]
fn distribution_counts_every_customer() {
    let env = TestEnv::standard();
    let h = env.run_json(&["distribution"]);
    let total: u64 = h["data"]["bins"]
        .as_array()
        .expect("bins")
        .iter()
        .map(|b| b["count"].as_u64().unwrap_or(0))
        .sum();
    assert_eq!(total, 3);
}

#[test]
fn missing_value_markers_are_skipped_not_averaged() {
    let env = TestEnv::new(
        "prob_default\n0.1\nNA\n",
        "SEX,approved_flag\n1,1\n2,0\n2,nan\n2,NA\n",
    );
    let f = env.run_json(&["fairness"]);
    assert_eq!(f["data"]["groups"][1]["approval_rate"], 0.0);
    assert_eq!(f["data"]["groups"][1]["members"], 1);
    assert_eq!(f["data"]["disparate_impact"], 0.0);
    assert_eq!(
        f["data"]["governance_action"],
        "Disable auto-approval; enforce review"
    );

    let outcomes = env.run_json(&["outcomes"]);
    assert_eq!(outcomes["data"]["total"], 2);
    assert_eq!(outcomes["data"]["counts"]["Manual Review"], 1);
}

#[test]
fn off_grid_threshold_flag_is_rejected() {
    let env = TestEnv::standard();
    env.cmd()
        .args(["outcomes", "--auto-approve-max", "0.123"])
        .assert()
        .failure()
        .stderr(contains("not a multiple of 0.01"));
}
