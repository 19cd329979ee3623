use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use papersplit_core::{Region, SplitOutcome};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// JSON summary of one split run, written with `--summary`
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub input: PathBuf,
    pub input_sha256: String,
    pub title: String,
    pub backmatter_start: Option<usize>,
    pub appendix_start: Option<usize>,
    pub files: Vec<ReportFile>,
    pub missing: Vec<Region>,
    pub dry_run: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportFile {
    pub region: Region,
    pub path: PathBuf,
    pub bytes: usize,
}

impl SplitReport {
    pub fn from_outcome(outcome: &SplitOutcome, dry_run: bool) -> Self {
        Self {
            input: outcome.input.clone(),
            input_sha256: outcome.input_sha256.clone(),
            title: outcome.title.clone(),
            backmatter_start: outcome.boundaries.backmatter_start,
            appendix_start: outcome.boundaries.appendix_start,
            files: outcome
                .written
                .iter()
                .map(|segment| ReportFile {
                    region: segment.region,
                    path: segment.path.clone(),
                    bytes: segment.bytes,
                })
                .collect(),
            missing: outcome.missing.clone(),
            dry_run,
            created_at: Utc::now(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        Ok(())
    }
}
