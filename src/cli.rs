use crate::domain::constants::{THRESHOLD_MAX, THRESHOLD_MIN, THRESHOLD_STEP};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "govdash",
    version,
    about = "AI Decision Intelligence & Governance dashboard for credit-risk decisioning"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        env = "GOVDASH_ARTIFACTS_DIR",
        help = "Directory holding decision_df.csv and fairness_df.csv"
    )]
    pub artifacts_dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "GOVDASH_CONFIG",
        help = "TOML configuration file (default: ~/.config/govdash/config.toml)"
    )]
    pub config: Option<PathBuf>,
    #[command(flatten)]
    pub policy: PolicyArgs,
    #[arg(short, long, global = true, action = ArgAction::Count, help = "Raise log verbosity (-v info, -vv debug)")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

/// Decision policy controls. Unset values fall back to the config file, then defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    #[arg(
        long,
        global = true,
        value_parser = parse_threshold,
        help = "Decision threshold (prob_default); accepted but not used by the policy"
    )]
    pub threshold: Option<f64>,
    #[arg(
        long,
        global = true,
        value_parser = parse_threshold,
        help = "Auto-Approve if prob_default <= this value (0.05-0.95, step 0.01)"
    )]
    pub auto_approve_max: Option<f64>,
    #[arg(
        long,
        global = true,
        value_parser = parse_threshold,
        help = "Auto-Reject if prob_default >= this value (0.05-0.95, step 0.01)"
    )]
    pub auto_reject_min: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the full dashboard (outcomes, distribution, reason codes, fairness)
    Report {
        #[arg(long, default_value_t = 0, help = "Customer row index for reason codes")]
        row: usize,
        #[arg(long, value_enum)]
        attribute: Option<ProtectedAttribute>,
    },
    /// Decision outcome counts under the active thresholds
    Outcomes,
    /// Per-customer policy decisions
    Decisions {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Histogram of prob_default
    Distribution,
    /// Reason codes and policy decision for one customer
    Explain {
        #[arg(long)]
        row: usize,
    },
    /// Approval rates, disparate impact and governance action
    Fairness {
        #[arg(long, value_enum)]
        attribute: Option<ProtectedAttribute>,
    },
    /// Classify a single probability of default
    Classify {
        #[arg(allow_negative_numbers = true)]
        prob: f64,
    },
    /// Show the columns detected in both artifacts
    Schema,
    /// Interactive session reading control changes from stdin
    Session,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ProtectedAttribute {
    #[value(name = "SEX")]
    #[serde(rename = "SEX")]
    Sex,
    #[value(name = "AGE_GROUP")]
    #[serde(rename = "AGE_GROUP")]
    AgeGroup,
    #[value(name = "EDUCATION")]
    #[serde(rename = "EDUCATION")]
    Education,
}

impl ProtectedAttribute {
    pub const ALL: [ProtectedAttribute; 3] = [
        ProtectedAttribute::Sex,
        ProtectedAttribute::AgeGroup,
        ProtectedAttribute::Education,
    ];

    pub fn column(self) -> &'static str {
        match self {
            ProtectedAttribute::Sex => "SEX",
            ProtectedAttribute::AgeGroup => "AGE_GROUP",
            ProtectedAttribute::Education => "EDUCATION",
        }
    }

    /// Exact, case-sensitive match on the column name.
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.column() == name)
    }
}

impl fmt::Display for ProtectedAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

pub fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number", raw))?;
    if !(THRESHOLD_MIN..=THRESHOLD_MAX).contains(&value) {
        return Err(format!(
            "{} is outside [{}, {}]",
            value, THRESHOLD_MIN, THRESHOLD_MAX
        ));
    }
    if !on_threshold_grid(value) {
        return Err(format!("{} is not a multiple of {}", value, THRESHOLD_STEP));
    }
    Ok(value)
}

/// Thresholds move in steps of 0.01, like the dashboard sliders.
pub fn on_threshold_grid(value: f64) -> bool {
    let steps = value / THRESHOLD_STEP;
    (steps - steps.round()).abs() < 1e-6
}
