use crate::dataset::{DecisionDataset, FairnessDataset, Table};
use crate::domain::constants::{DECISION_ARTIFACT, FAIRNESS_ARTIFACT};
use crate::error::DashboardError;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArtifactPaths {
    pub decision: PathBuf,
    pub fairness: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            decision: dir.join(DECISION_ARTIFACT),
            fairness: dir.join(FAIRNESS_ARTIFACT),
        }
    }
}

/// Both datasets, schema-detected.
#[derive(Debug)]
pub struct Artifacts {
    pub decision: DecisionDataset,
    pub fairness: FairnessDataset,
}

pub fn require_file(path: &Path) -> Result<(), DashboardError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(DashboardError::MissingArtifact {
            path: path.to_path_buf(),
        })
    }
}

pub fn content_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn read_artifact(path: &Path) -> Result<Vec<u8>, DashboardError> {
    std::fs::read(path).map_err(|e| DashboardError::MalformedArtifact {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

struct CacheEntry {
    decision_digest: String,
    fairness_digest: String,
    artifacts: Arc<Artifacts>,
}

/// Artifact cache keyed by source paths and invalidated by content digest.
///
/// Every `load` re-reads the files to hash them; parsing and schema detection
/// only rerun when a digest changes.
#[derive(Default)]
pub struct ArtifactCache {
    entries: HashMap<ArtifactPaths, CacheEntry>,
    parses: usize,
}

impl ArtifactCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times artifacts were actually parsed.
    pub fn parses(&self) -> usize {
        self.parses
    }

    pub fn load(&mut self, paths: &ArtifactPaths) -> Result<Arc<Artifacts>, DashboardError> {
        require_file(&paths.decision)?;
        require_file(&paths.fairness)?;

        let decision_bytes = read_artifact(&paths.decision)?;
        let fairness_bytes = read_artifact(&paths.fairness)?;
        let decision_digest = content_digest(&decision_bytes);
        let fairness_digest = content_digest(&fairness_bytes);

        if let Some(entry) = self.entries.get(paths) {
            if entry.decision_digest == decision_digest && entry.fairness_digest == fairness_digest
            {
                tracing::debug!(digest = %decision_digest, "artifact cache hit");
                return Ok(Arc::clone(&entry.artifacts));
            }
            tracing::debug!("artifact content changed; reloading");
        }

        let decision_table = Table::parse_artifact(&paths.decision, &decision_bytes)?;
        let fairness_table = Table::parse_artifact(&paths.fairness, &fairness_bytes)?;
        let decision = DecisionDataset::from_table(decision_table, &paths.decision)?;
        let fairness = FairnessDataset::from_table(fairness_table);
        self.parses += 1;

        tracing::info!(
            decision_rows = decision.len(),
            reason_columns = decision.reason_columns().len(),
            fairness_rows = fairness.len(),
            protected_attributes = fairness.protected_attributes().len(),
            "artifacts loaded"
        );

        let artifacts = Arc::new(Artifacts { decision, fairness });
        self.entries.insert(
            paths.clone(),
            CacheEntry {
                decision_digest,
                fairness_digest,
                artifacts: Arc::clone(&artifacts),
            },
        );
        Ok(artifacts)
    }
}
