use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename for the lab dataset.
pub const DATASET_FILENAME: &str = "labs.json";

/// Environment variable that overrides the dataset location.
pub const DATA_PATH_ENV: &str = "LABFINDER_DATA_PATH";

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "labfinder", "labfinder").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATASET_FILENAME))
}

/// Resolve where the lab dataset should be read from.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `LABFINDER_DATA_PATH` environment variable.
/// 3. Platform-specific project data directory.
///
/// A directory (any path without an extension) resolves to `labs.json` inside it.
/// The returned path is not checked for existence.
pub fn resolve_dataset_path(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(canonical_dataset_path(explicit));
    }

    if let Some(env_path) = env::var_os(DATA_PATH_ENV) {
        let resolved = canonical_dataset_path(Path::new(&env_path));
        debug!(path = %resolved.display(), "dataset path taken from environment");
        return Ok(resolved);
    }

    default_dataset_path()
}

fn canonical_dataset_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        return path.to_path_buf();
    }

    path.join(DATASET_FILENAME)
}
