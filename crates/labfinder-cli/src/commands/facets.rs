//! Facets command handler.

use std::path::Path;

use anyhow::Result;

use super::load_directory;
use crate::output::OutputFormat;

/// Handle the facets subcommand.
pub fn handle_facets(data_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let directory = load_directory(data_path)?;
    format.render_facets(&directory.facets())
}
