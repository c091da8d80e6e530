use crate::error::{Error, Result};
use crate::reflect::Namespace;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Loader for introspection snapshot files.
///
/// Snapshots are written by the host runtime's reflection facility. The format is chosen by
/// file extension: `.yaml`/`.yml` are read as YAML, everything else as JSON.
///
/// # Example
///
/// ```no_run
/// use docmd::loader::SnapshotLoader;
/// use std::path::Path;
///
/// let loaded = SnapshotLoader::load_file(Path::new("snapshots/pkg.json")).unwrap();
/// println!("Loaded {} objects", loaded.namespace.objects.len());
/// ```
pub struct SnapshotLoader;

/// A successfully loaded snapshot file.
#[derive(Debug)]
pub struct LoadedSnapshot {
    /// Path to the snapshot file
    pub path: PathBuf,
    /// The decoded object graph
    pub namespace: Namespace,
}

impl SnapshotLoader {
    /// Loads a single snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file is not a valid snapshot
    pub fn load_file(path: &Path) -> Result<LoadedSnapshot> {
        debug!("Loading snapshot: {}", path.display());

        let content = fs::read_to_string(path)?;

        let namespace = if is_yaml(path) {
            serde_yaml::from_str(&content).map_err(|e| Error::SnapshotError {
                file: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| Error::SnapshotError {
                file: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        Ok(LoadedSnapshot {
            path: path.to_path_buf(),
            namespace,
        })
    }

    /// Loads multiple snapshot files, continuing even if some fail.
    ///
    /// Failures are logged as warnings and returned in place, so a single corrupt snapshot on
    /// the search path does not hide the others.
    pub fn load_files(paths: &[PathBuf]) -> Vec<Result<LoadedSnapshot>> {
        debug!("Loading {} snapshot files", paths.len());

        let results: Vec<Result<LoadedSnapshot>> = paths
            .iter()
            .map(|path| {
                Self::load_file(path).map_err(|e| {
                    warn!("Failed to load {}: {}", path.display(), e);
                    e
                })
            })
            .collect();

        let success_count = results.iter().filter(|r| r.is_ok()).count();
        debug!(
            "Loading complete: {} succeeded, {} failed",
            success_count,
            results.len() - success_count
        );

        results
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}
