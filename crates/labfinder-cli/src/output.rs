//! Output formatting for search results and facets.

use std::fmt::Write as _;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use labfinder_lib::{Facets, LabSummary, SearchResult};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON, the same shape the HTTP endpoint returns.
    #[default]
    Json,
    /// Human-readable listing.
    Text,
}

impl OutputFormat {
    /// Print one page of search results.
    pub fn render_search(self, result: &SearchResult) -> Result<()> {
        match self {
            OutputFormat::Json => render_json(result),
            OutputFormat::Text => write_stdout(&search_text(result, ColorPalette::detect())),
        }
    }

    /// Print the facet lists.
    pub fn render_facets(self, facets: &Facets) -> Result<()> {
        match self {
            OutputFormat::Json => render_json(facets),
            OutputFormat::Text => write_stdout(&facets_text(facets)),
        }
    }
}

/// Write `value` to stdout as pretty JSON followed by a newline.
pub fn render_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("failed to serialize output")?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn write_stdout(text: &str) -> Result<()> {
    io::stdout()
        .lock()
        .write_all(text.as_bytes())
        .context("failed to write output")
}

/// Render a result page as a text listing.
pub fn search_text(result: &SearchResult, palette: ColorPalette) -> String {
    let mut out = String::new();

    if result.labs.is_empty() {
        out.push_str("No labs match the given filters.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{} labs found (page {} of {})",
        result.total_count, result.current_page, result.total_pages
    );

    for lab in &result.labs {
        out.push('\n');
        write_lab(&mut out, lab, palette);
    }

    out
}

fn write_lab(out: &mut String, lab: &LabSummary, p: ColorPalette) {
    let record = &lab.record;
    let (status, color) = if lab.is_active {
        ("ACTIVE ", p.green)
    } else {
        ("EXPIRED", p.red)
    };

    let _ = writeln!(
        out,
        "{color}[{status}]{reset} {bold}{name}{reset} (#{id})",
        reset = p.reset,
        bold = p.white_bold,
        name = record.name,
        id = record.id,
    );
    let _ = writeln!(
        out,
        "          {gray}{city}, {state}{reset}",
        gray = p.gray,
        reset = p.reset,
        city = record.city,
        state = record.state,
    );
    if !record.discipline.is_empty() {
        let _ = writeln!(out, "          Disciplines: {}", record.discipline);
    }
    if !record.certificate_no.is_empty() {
        let _ = writeln!(
            out,
            "          Certificate {} valid {} to {}",
            record.certificate_no,
            or_unknown(&record.issue_date),
            or_unknown(&record.expiry_date)
        );
    }
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() {
        "?"
    } else {
        value
    }
}

/// Render facet lists as a text listing.
pub fn facets_text(facets: &Facets) -> String {
    let mut out = String::new();
    for (title, values) in [
        ("States", &facets.states),
        ("Cities", &facets.cities),
        ("Disciplines", &facets.disciplines),
    ] {
        let _ = writeln!(out, "{title} ({}):", values.len());
        for value in values {
            let _ = writeln!(out, "  - {value}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use labfinder_lib::LabRecord;

    fn summary(id: i64, name: &str, is_active: bool) -> LabSummary {
        LabSummary {
            record: LabRecord {
                id,
                name: name.to_string(),
                city: "Surat".to_string(),
                state: "Gujarat".to_string(),
                discipline: "Chemical".to_string(),
                ..LabRecord::default()
            },
            is_active,
        }
    }

    #[test]
    fn empty_page_has_message() {
        let result = SearchResult {
            labs: vec![],
            total_count: 0,
            current_page: 1,
            total_pages: 0,
            filters: Facets::default(),
        };
        assert_eq!(
            search_text(&result, ColorPalette::plain()),
            "No labs match the given filters.\n"
        );
    }

    #[test]
    fn plain_listing_marks_status() {
        let result = SearchResult {
            labs: vec![summary(1, "Alpha Labs", true), summary(2, "Beta Testing", false)],
            total_count: 2,
            current_page: 1,
            total_pages: 1,
            filters: Facets::default(),
        };
        let text = search_text(&result, ColorPalette::plain());

        assert!(text.starts_with("2 labs found (page 1 of 1)"));
        assert!(text.contains("[ACTIVE ] Alpha Labs (#1)"));
        assert!(text.contains("[EXPIRED] Beta Testing (#2)"));
        assert!(text.contains("Surat, Gujarat"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn facets_listing_counts_values() {
        let facets = Facets {
            states: vec!["Gujarat".to_string(), "Kerala".to_string()],
            cities: vec![],
            disciplines: vec!["Chemical".to_string()],
        };
        let text = facets_text(&facets);

        assert!(text.contains("States (2):\n  - Gujarat\n  - Kerala\n"));
        assert!(text.contains("Cities (0):\n"));
        assert!(text.contains("Disciplines (1):\n  - Chemical\n"));
    }
}
