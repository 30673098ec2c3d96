// src/review/export.rs
//
// JSON snapshot export of the current review state, for attaching to the
// client workpapers. Snapshots land in the platform data directory.
use chrono::Utc;
use directories_next::ProjectDirs;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::definitions::{Document, Field, ReviewIssue};
use super::resources::ReviewRegistry;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("could not determine a data directory for snapshots")]
    NoProjectDirs,
    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct ReviewSnapshot<'a> {
    pub exported_at: chrono::DateTime<Utc>,
    pub progress_percent: u32,
    pub fields: &'a [Field],
    pub issues: &'a [ReviewIssue],
    pub documents: &'a [Document],
}

impl<'a> ReviewSnapshot<'a> {
    pub fn of(registry: &'a ReviewRegistry) -> Self {
        ReviewSnapshot {
            exported_at: Utc::now(),
            progress_percent: registry.progress_percent(),
            fields: registry.fields(),
            issues: registry.issues(),
            documents: registry.documents(),
        }
    }
}

/// Serializes the registry into `dir`, one timestamped file per export.
/// Returns the path written.
pub fn write_snapshot_to(dir: &Path, registry: &ReviewRegistry) -> Result<PathBuf, SnapshotError> {
    fs::create_dir_all(dir)?;
    let snapshot = ReviewSnapshot::of(registry);
    let file_name = format!(
        "review-snapshot-{}.json",
        snapshot.exported_at.format("%Y%m%d-%H%M%S")
    );
    let path = dir.join(file_name);
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(&path, json)?;
    Ok(path)
}

/// Writes a snapshot into the platform data directory.
pub fn write_snapshot(registry: &ReviewRegistry) -> Result<PathBuf, SnapshotError> {
    let proj_dirs = ProjectDirs::from("com", "ReturnLens", "ReturnLensWorkspace")
        .ok_or(SnapshotError::NoProjectDirs)?;
    write_snapshot_to(&proj_dirs.data_dir().join("snapshots"), registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::seed;

    #[test]
    fn snapshot_serializes_and_round_trips_counts() {
        let registry = ReviewRegistry::new(
            seed::seed_fields(),
            seed::seed_issues(),
            seed::seed_documents(),
        );
        let json = serde_json::to_string(&ReviewSnapshot::of(&registry)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["fields"].as_array().unwrap().len(), registry.fields().len());
        assert_eq!(value["issues"].as_array().unwrap().len(), registry.issues().len());
        assert_eq!(value["documents"].as_array().unwrap().len(), registry.documents().len());
        assert_eq!(value["progress_percent"], 0);
    }

    #[test]
    fn snapshot_writes_a_timestamped_file() {
        let registry = ReviewRegistry::new(Vec::new(), Vec::new(), Vec::new());
        let dir = std::env::temp_dir().join("returnlens-snapshot-test");
        let path = write_snapshot_to(&dir, &registry).unwrap();
        assert!(path.exists());
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"progress_percent\""));
        fs::remove_file(path).ok();
    }
}
