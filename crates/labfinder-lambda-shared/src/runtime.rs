//! Lambda runtime initialization with the bundled lab dataset.
//!
//! This module provides a lazily-initialized singleton containing the loaded
//! [`LabDirectory`]. The dataset is bundled at compile time using
//! `include_bytes!` so cold starts never touch the filesystem.
//!
//! # Dataset Bundling
//!
//! Lambda handlers bundle the dataset by including bytes directly in the binary:
//!
//! ```text
//! static DATA_BYTES: &[u8] = include_bytes!("../../../data/labs.json");
//! ```
//!
//! Builds without the bundle pass an empty slice, in which case the dataset
//! is read from `LABFINDER_DATA_PATH` (or the platform data directory).
//!
//! # Cold-Start Performance
//!
//! Initialization logs `parse_ms` and `total_init_ms` so slow cold starts can
//! be traced back to dataset size.

use std::sync::OnceLock;
use std::time::Instant;

use tracing::{error, info};

use labfinder_lib::{resolve_dataset_path, Error as LibError, LabDirectory};

use crate::problem::ProblemDetails;

/// Lazily-initialized Lambda runtime state.
static RUNTIME: OnceLock<Result<LambdaRuntime, InitError>> = OnceLock::new();

/// Error during runtime initialization.
#[derive(Debug, Clone)]
pub struct InitError {
    pub message: String,
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lambda initialization failed: {}", self.message)
    }
}

impl std::error::Error for InitError {}

impl From<LibError> for InitError {
    fn from(err: LibError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Initialized Lambda runtime containing the lab directory.
///
/// Initialized once at cold start and reused across all invocations.
#[derive(Debug)]
pub struct LambdaRuntime {
    directory: LabDirectory,
}

impl LambdaRuntime {
    /// Access the loaded lab directory.
    pub fn directory(&self) -> &LabDirectory {
        &self.directory
    }
}

/// Initialize the Lambda runtime from bundled data.
///
/// Subsequent calls return the result of the first call, whatever bytes are
/// passed. An empty `data_bytes` falls back to reading the dataset from disk.
pub fn init_runtime(data_bytes: &'static [u8]) -> Result<&'static LambdaRuntime, InitError> {
    let result = RUNTIME.get_or_init(|| {
        let total_start = Instant::now();

        info!(
            data_size_bytes = data_bytes.len(),
            bundled = !data_bytes.is_empty(),
            "initializing Lambda runtime"
        );

        let parse_start = Instant::now();
        let directory = load_directory(data_bytes)?;
        let parse_ms = parse_start.elapsed().as_millis();

        info!(
            parse_ms = parse_ms,
            lab_count = directory.len(),
            "lab directory loaded"
        );

        let total_init_ms = total_start.elapsed().as_millis();
        info!(
            total_init_ms = total_init_ms,
            "Lambda runtime initialization complete"
        );

        Ok(LambdaRuntime { directory })
    });

    match result {
        Ok(runtime) => Ok(runtime),
        Err(e) => {
            error!(error = %e, "Lambda runtime initialization failed");
            Err(e.clone())
        }
    }
}

/// Get the initialized runtime, if initialization has run and succeeded.
pub fn get_runtime() -> Option<&'static LambdaRuntime> {
    RUNTIME.get().and_then(|result| result.as_ref().ok())
}

/// Create a `ProblemDetails` for initialization errors.
///
/// The initialization message is logged, never returned to the client.
pub fn init_error_to_problem(request_id: &str) -> ProblemDetails {
    if let Some(Err(e)) = RUNTIME.get() {
        error!(error = %e, request_id = %request_id, "serving request without a runtime");
    }
    ProblemDetails::internal_error("Failed to load lab directory", request_id)
}

fn load_directory(data_bytes: &[u8]) -> Result<LabDirectory, InitError> {
    if !data_bytes.is_empty() {
        return LabDirectory::from_slice(data_bytes).map_err(|e| InitError {
            message: format!("Failed to parse bundled dataset: {}", e),
        });
    }

    let path = resolve_dataset_path(None)?;
    info!(path = %path.display(), "no bundled dataset; reading from disk");
    Ok(LabDirectory::from_path(&path)?)
}
