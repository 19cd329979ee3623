use crate::error::SplitError;
use anyhow::Result;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Storage abstraction for split output files
pub trait SegmentStorage {
    /// Make sure the output directory exists
    fn prepare_output_dir(&self, dir: &Path) -> Result<()>;

    fn write_segment(&self, path: &Path, contents: &str) -> Result<()>;

    /// Get storage name for debugging/logging
    fn name(&self) -> &str;
}

/// Writes segments to the local filesystem
pub struct FileStorage;

impl Default for FileStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStorage {
    pub fn new() -> Self {
        Self
    }
}

impl SegmentStorage for FileStorage {
    fn prepare_output_dir(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|source| SplitError::CreateOutputDir {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    fn write_segment(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).map_err(|source| SplitError::WriteOutput {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// No-op storage used for dry runs: nothing touches the disk
pub struct DryRunStorage;

impl Default for DryRunStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl DryRunStorage {
    pub fn new() -> Self {
        Self
    }
}

impl SegmentStorage for DryRunStorage {
    fn prepare_output_dir(&self, _dir: &Path) -> Result<()> {
        Ok(()) // No-op
    }

    fn write_segment(&self, _path: &Path, _contents: &str) -> Result<()> {
        Ok(()) // No-op
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}

/// SHA-256 of the input text, recorded in split reports
pub fn calculate_content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
