//! Search command handler.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use labfinder_lib::{CertificateStatus, LabQuery, SortBy, DEFAULT_PAGE_SIZE};

use super::load_directory;
use crate::output::OutputFormat;

/// Arguments for the search subcommand.
///
/// Enumerated values are coerced the way the HTTP endpoint coerces them:
/// unknown values fall back to the default instead of failing.
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Free-text query matched against names, locations, disciplines and contacts.
    #[arg(long, short = 'q', default_value = "")]
    pub query: String,

    /// Exact state filter (as listed by `facets`).
    #[arg(long)]
    pub state: Option<String>,

    /// Exact city filter (as listed by `facets`).
    #[arg(long)]
    pub city: Option<String>,

    /// Discipline filter; repeat to match any of several.
    #[arg(long = "discipline", short = 'd')]
    pub disciplines: Vec<String>,

    /// Certificate status: active, expired or all.
    #[arg(long, default_value = "all")]
    pub certificate_status: String,

    /// Sort order: name, date or relevance.
    #[arg(long, default_value = "name")]
    pub sort_by: String,

    /// One-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Page size (clamped to 1..=100).
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: usize,

    /// Judge certificate validity as of this date (YYYY-MM-DD) instead of today.
    #[arg(long, value_parser = parse_date)]
    pub as_of: Option<NaiveDate>,
}

impl SearchArgs {
    /// Convert the arguments into a library query.
    pub fn to_query(&self) -> LabQuery {
        LabQuery {
            query: self.query.clone(),
            state: self.state.clone().filter(|s| !s.trim().is_empty()),
            city: self.city.clone().filter(|s| !s.trim().is_empty()),
            disciplines: self
                .disciplines
                .iter()
                .filter(|d| !d.trim().is_empty())
                .cloned()
                .collect(),
            certificate_status: CertificateStatus::from_param(&self.certificate_status),
            page: self.page,
            limit: self.limit,
            sort_by: SortBy::from_param(&self.sort_by),
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Handle the search subcommand.
pub fn handle_search(data_path: Option<&Path>, args: &SearchArgs, format: OutputFormat) -> Result<()> {
    let directory = load_directory(data_path)?;
    let query = args.to_query();

    let result = match args.as_of {
        Some(date) => {
            let now = date
                .and_hms_opt(0, 0, 0)
                .context("invalid --as-of date")?;
            directory.search_at(&query, now)
        }
        None => directory.search(&query),
    };

    tracing::debug!(
        total_count = result.total_count,
        page = result.current_page,
        "search complete"
    );

    format.render_search(&result)
}
