//! Module import over a snapshot search path.
//!
//! This is the stand-in for the host runtime's `import` statement: given a dotted module name,
//! find the snapshot that defines it and hand back the whole object graph together with the
//! module's identity.

use crate::error::{Error, Result};
use crate::loader::SnapshotLoader;
use crate::reflect::{Namespace, ObjectId};
use crate::scanner::SnapshotScanner;
use log::{debug, info, warn};
use std::path::Path;

/// A resolved root module.
#[derive(Debug)]
pub struct ImportedModule {
    /// The snapshot containing the module
    pub namespace: Namespace,
    /// Identity of the module within `namespace`
    pub id: ObjectId,
}

/// Import `name` from the snapshots found under `search_path`.
///
/// Snapshot files are tried in path order; the first one that defines the module wins.
/// Unreadable snapshots are skipped with a warning.
///
/// # Errors
///
/// Returns [`Error::ModuleNotFound`] if no snapshot defines the module.
pub fn import_module(search_path: &Path, name: &str) -> Result<ImportedModule> {
    debug!("Importing {} from {}", name, search_path.display());

    let scan_result = SnapshotScanner::new(search_path.to_path_buf()).scan()?;
    debug!("Found {} snapshot files", scan_result.snapshot_files.len());
    if !scan_result.warnings.is_empty() {
        warn!(
            "{} entries under {} could not be scanned, {} may be missing",
            scan_result.warnings.len(),
            search_path.display(),
            name
        );
    }

    for loaded in SnapshotLoader::load_files(&scan_result.snapshot_files)
        .into_iter()
        .flatten()
    {
        if let Some(id) = loaded.namespace.find_module(name).cloned() {
            info!("Found module {} in {}", name, loaded.path.display());
            return Ok(ImportedModule {
                namespace: loaded.namespace,
                id,
            });
        }
    }

    Err(Error::ModuleNotFound(name.to_string()))
}
