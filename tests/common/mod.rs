#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Three scored customers: one per policy outcome under default thresholds.
pub const DECISIONS_THREE_ROWS: &str = "prob_default\n0.10\n0.35\n0.70\n";

pub const DECISIONS_WITH_REASONS: &str = "customer_id,prob_default,reason_1,Reason_2\n\
1001,0.10,LIMIT_BAL low utilisation,PAY_0 on time\n\
1002,0.35,PAY_0 one month late,BILL_AMT1 rising\n\
1003,0.70,PAY_0 three months late,PAY_AMT1 missed\n";

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub artifacts: PathBuf,
    cargo_home: PathBuf,
    rustup_home: PathBuf,
}

impl TestEnv {
    /// Empty artifacts directory under an isolated HOME.
    pub fn empty() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let artifacts = tmp.path().join("reports/artifacts");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&artifacts).expect("create artifacts dir");

        let orig_home = std::env::var("HOME").unwrap_or_default();
        let cargo_home = PathBuf::from(&orig_home).join(".cargo");
        let rustup_home = PathBuf::from(&orig_home).join(".rustup");

        Self {
            _tmp: tmp,
            home,
            artifacts,
            cargo_home,
            rustup_home,
        }
    }

    pub fn new(decision: &str, fairness: &str) -> Self {
        let env = Self::empty();
        env.write_decision(decision);
        env.write_fairness(fairness);
        env
    }

    /// Reason codes plus a SEX split of 0.9 vs 0.5 approval.
    pub fn standard() -> Self {
        Self::new(DECISIONS_WITH_REASONS, &two_group_fairness())
    }

    pub fn write_decision(&self, content: &str) {
        fs::write(self.artifacts.join("decision_df.csv"), content).expect("write decision_df");
    }

    pub fn write_fairness(&self, content: &str) {
        fs::write(self.artifacts.join("fairness_df.csv"), content).expect("write fairness_df");
    }

    pub fn write_config(&self, content: &str) {
        let path = self.home.join(".config/govdash/config.toml");
        fs::create_dir_all(path.parent().expect("config parent")).expect("create config dir");
        fs::write(path, content).expect("write config");
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("govdash");
        cmd.env("HOME", &self.home)
            .env("CARGO_HOME", &self.cargo_home)
            .env("RUSTUP_HOME", &self.rustup_home)
            .env_remove("GOVDASH_CONFIG")
            .env_remove("GOVDASH_LOG")
            .env("GOVDASH_ARTIFACTS_DIR", &self.artifacts);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("error json output")
    }
}

/// SEX=1 approves 9 of 10, SEX=2 approves 5 of 10; AGE_GROUP splits evenly.
pub fn two_group_fairness() -> String {
    let mut raw = String::from("SEX,AGE_GROUP,approved_flag\n");
    for i in 0..10 {
        raw.push_str(&format!("1,{},{}\n", if i % 2 == 0 { "18-35" } else { "36+" }, u8::from(i < 9)));
        raw.push_str(&format!("2,{},{}\n", if i % 2 == 0 { "18-35" } else { "36+" }, u8::from(i < 5)));
    }
    raw
}
