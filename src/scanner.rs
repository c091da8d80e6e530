use crate::error::Result;
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SNAPSHOT_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Scanner for locating introspection snapshots on a search path.
///
/// The `SnapshotScanner` recursively walks a directory looking for snapshot files. Hidden
/// directories and `target` are skipped.
///
/// # Example
///
/// ```no_run
/// use docmd::scanner::SnapshotScanner;
/// use std::path::PathBuf;
///
/// let scanner = SnapshotScanner::new(PathBuf::from("./snapshots"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} snapshots", result.snapshot_files.len());
/// ```
pub struct SnapshotScanner {
    root_path: PathBuf,
}

/// Result of a search path scan.
pub struct ScanResult {
    /// Snapshot files, sorted by path
    pub snapshot_files: Vec<PathBuf>,
    /// Warning messages for entries that could not be accessed
    pub warnings: Vec<String>,
}

impl SnapshotScanner {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Scans the directory tree and collects all snapshot files.
    ///
    /// A search path that is itself a file is returned as the only candidate. Inaccessible
    /// entries are logged and recorded as warnings, but scanning continues.
    pub fn scan(&self) -> Result<ScanResult> {
        let mut snapshot_files = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(&self.root_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.path() == self.root_path {
                    return true;
                }

                let file_name = e.file_name().to_string_lossy();
                let is_hidden = file_name.starts_with('.');
                let is_target = file_name == "target";

                !is_hidden && !is_target
            })
        {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && is_snapshot(path) {
                        snapshot_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        Ok(ScanResult {
            snapshot_files,
            warnings,
        })
    }
}

fn is_snapshot(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| SNAPSHOT_EXTENSIONS.contains(&ext))
}
