// Module exports for CLI subcommands
//
// Each module handles one subcommand; main.rs only parses arguments and dispatches.

pub mod facets;
pub mod search;
pub mod sitemap;

use std::path::Path;

use anyhow::{Context, Result};

use labfinder_lib::{resolve_dataset_path, LabDirectory};

/// Resolve the dataset location and load it.
pub fn load_directory(target: Option<&Path>) -> Result<LabDirectory> {
    let dataset_path =
        resolve_dataset_path(target).context("failed to resolve the lab dataset location")?;
    LabDirectory::from_path(&dataset_path)
        .with_context(|| format!("failed to load dataset from {}", dataset_path.display()))
}
