use crate::cli::{on_threshold_grid, Cli, PolicyArgs, ProtectedAttribute};
use crate::domain::constants::{
    DEFAULT_ARTIFACTS_DIR, THRESHOLD_MAX, THRESHOLD_MIN, THRESHOLD_STEP,
};
use crate::domain::models::PolicyThresholds;
use crate::error::DashboardError;
use crate::services::storage::ArtifactPaths;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub artifacts_dir: Option<PathBuf>,
    pub policy: PolicyThresholds,
    pub fairness: FairnessConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FairnessConfig {
    pub attribute: Option<ProtectedAttribute>,
}

/// Effective settings for one invocation or session.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub artifacts: ArtifactPaths,
    pub thresholds: PolicyThresholds,
    pub attribute: Option<ProtectedAttribute>,
}

fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/govdash/config.toml"))
}

pub fn load_config_file(explicit: Option<&Path>) -> Result<ConfigFile, DashboardError> {
    let path = match explicit {
        Some(p) if !p.is_file() => {
            return Err(DashboardError::InvalidConfig(format!(
                "config file not found: {}",
                p.display()
            )))
        }
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) if p.is_file() => p,
            _ => return Ok(ConfigFile::default()),
        },
    };
    let raw = std::fs::read_to_string(&path)
        .map_err(|e| DashboardError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), "config file loaded");
    toml::from_str(&raw)
        .map_err(|e| DashboardError::InvalidConfig(format!("{}: {}", path.display(), e)))
}

pub fn validate_thresholds(t: &PolicyThresholds) -> Result<(), DashboardError> {
    for (name, value) in [
        ("threshold", t.threshold),
        ("auto_approve_max", t.auto_approve_max),
        ("auto_reject_min", t.auto_reject_min),
    ] {
        if !(THRESHOLD_MIN..=THRESHOLD_MAX).contains(&value) {
            return Err(DashboardError::InvalidConfig(format!(
                "{} = {} is outside [{}, {}]",
                name, value, THRESHOLD_MIN, THRESHOLD_MAX
            )));
        }
        if !on_threshold_grid(value) {
            return Err(DashboardError::InvalidConfig(format!(
                "{} = {} is not a multiple of {}",
                name, value, THRESHOLD_STEP
            )));
        }
    }
    Ok(())
}

/// Layer defaults, the config file, environment and flags (highest wins).
pub fn resolve(
    file: ConfigFile,
    artifacts_dir: Option<PathBuf>,
    policy: &PolicyArgs,
) -> Result<DashboardConfig, DashboardError> {
    let dir = artifacts_dir
        .or(file.artifacts_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACTS_DIR));

    let mut thresholds = file.policy;
    if let Some(v) = policy.threshold {
        thresholds.threshold = v;
    }
    if let Some(v) = policy.auto_approve_max {
        thresholds.auto_approve_max = v;
    }
    if let Some(v) = policy.auto_reject_min {
        thresholds.auto_reject_min = v;
    }
    validate_thresholds(&thresholds)?;

    Ok(DashboardConfig {
        artifacts: ArtifactPaths::in_dir(&dir),
        thresholds,
        attribute: file.fairness.attribute,
    })
}

pub fn resolve_from_cli(cli: &Cli) -> Result<DashboardConfig, DashboardError> {
    let file = load_config_file(cli.config.as_deref())?;
    resolve(file, cli.artifacts_dir.clone(), &cli.policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let cfg = resolve(ConfigFile::default(), None, &PolicyArgs::default()).expect("config");
        assert_eq!(cfg.thresholds, PolicyThresholds::default());
        assert_eq!(
            cfg.artifacts.decision,
            PathBuf::from("reports/artifacts/decision_df.csv")
        );
        assert!(cfg.attribute.is_none());
    }

    #[test]
    fn flags_override_file_values() {
        let file: ConfigFile = toml::from_str(
            r#"
artifacts_dir = "/data/artifacts"
[policy]
auto_approve_max = 0.15
auto_reject_min = 0.70
[fairness]
attribute = "AGE_GROUP"
"#,
        )
        .expect("parse toml");
        let flags = PolicyArgs {
            auto_reject_min: Some(0.8),
            ..PolicyArgs::default()
        };
        let cfg = resolve(file, None, &flags).expect("config");
        assert_eq!(cfg.thresholds.auto_approve_max, 0.15);
        assert_eq!(cfg.thresholds.auto_reject_min, 0.8);
        assert_eq!(cfg.thresholds.threshold, 0.35);
        assert_eq!(cfg.attribute, Some(ProtectedAttribute::AgeGroup));
        assert_eq!(
            cfg.artifacts.fairness,
            PathBuf::from("/data/artifacts/fairness_df.csv")
        );
    }

    #[test]
    fn out_of_range_file_threshold_is_rejected() {
        let file: ConfigFile = toml::from_str("[policy]\nauto_approve_max = 0.01\n").expect("toml");
        let err = resolve(file, None, &PolicyArgs::default()).unwrap_err();
        assert_eq!(err.code(), "INVALID_CONFIG");
        assert!(err.to_string().contains("auto_approve_max"));
    }

    #[test]
    fn off_grid_file_threshold_is_rejected() {
        let file: ConfigFile = toml::from_str("[policy]\nauto_reject_min = 0.655\n").expect("toml");
        let err = resolve(file, None, &PolicyArgs::default()).unwrap_err();
        assert_eq!(err.code(), "INVALID_CONFIG");
        assert!(err.to_string().contains("not a multiple of 0.01"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = load_config_file(Some(Path::new("/nonexistent/govdash.toml"))).unwrap_err();
        assert_eq!(err.code(), "INVALID_CONFIG");
    }
}
