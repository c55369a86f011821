//! Lab directory query engine.
//!
//! Processing order is fixed: facets are computed over the whole dataset,
//! filters are applied as a conjunction, the full filtered set is sorted, and
//! only then is it paginated.

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeSet;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::certificate::{is_certificate_active_at, parse_certificate_date};
use crate::matching::{contains_ignore_case, fuzzy_match};
use crate::query::{LabQuery, SortBy};
use crate::record::{normalize_text, LabRecord};

/// Distinct filter values across the entire dataset, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub states: Vec<String>,
    pub cities: Vec<String>,
    pub disciplines: Vec<String>,
}

/// A normalized record plus its computed certificate status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabSummary {
    #[serde(flatten)]
    pub record: LabRecord,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub labs: Vec<LabSummary>,
    pub total_count: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub filters: Facets,
}

/// Compute facet sets over every record.
pub fn compute_facets(records: &[LabRecord]) -> Facets {
    let mut states = BTreeSet::new();
    let mut cities = BTreeSet::new();
    let mut disciplines = BTreeSet::new();

    for record in records {
        states.insert(record.normalized_state());
        cities.insert(record.normalized_city());
        disciplines.extend(record.disciplines());
    }

    let finish = |set: BTreeSet<String>| set.into_iter().filter(|v| !v.is_empty()).collect();

    Facets {
        states: finish(states),
        cities: finish(cities),
        disciplines: finish(disciplines),
    }
}

/// Run a search against the current wall-clock time.
pub fn search(records: &[LabRecord], query: &LabQuery) -> SearchResult {
    search_at(records, query, Local::now().naive_local())
}

/// Run a search, judging certificate activity at `now`.
pub fn search_at(records: &[LabRecord], query: &LabQuery, now: NaiveDateTime) -> SearchResult {
    let filters = compute_facets(records);

    let mut matches: Vec<&LabRecord> = records
        .iter()
        .filter(|record| matches_query(record, query, now))
        .collect();

    sort_records(&mut matches, query.sort_by, query.text());

    let limit = query.effective_limit();
    let current_page = query.effective_page();
    let total_count = matches.len();
    let total_pages = total_count.div_ceil(limit);

    let start = (current_page - 1).saturating_mul(limit);
    let labs = matches
        .into_iter()
        .skip(start)
        .take(limit)
        .map(|record| LabSummary {
            record: record.normalized(),
            is_active: is_certificate_active_at(&record.expiry_date, now),
        })
        .collect();

    SearchResult {
        labs,
        total_count,
        current_page,
        total_pages,
        filters,
    }
}

/// Whether `record` passes every filter in `query`.
pub fn matches_query(record: &LabRecord, query: &LabQuery, now: NaiveDateTime) -> bool {
    if let Some(text) = query.text() {
        if !fuzzy_match(&record.search_haystack(), text) {
            return false;
        }
    }

    if let Some(state) = query.state.as_deref() {
        if record.normalized_state() != state {
            return false;
        }
    }

    if let Some(city) = query.city.as_deref() {
        if record.normalized_city() != city {
            return false;
        }
    }

    if !query.disciplines.is_empty() {
        let labels = record.disciplines();
        if !labels.iter().any(|label| query.disciplines.contains(label)) {
            return false;
        }
    }

    query
        .certificate_status
        .admits(is_certificate_active_at(&record.expiry_date, now))
}

/// Sort filtered records in place. The sort is stable.
///
/// Under [`SortBy::Date`] an unparseable issue date sorts after every dated
/// record, which keeps the ordering total.
pub fn sort_records(records: &mut [&LabRecord], sort_by: SortBy, text: Option<&str>) {
    match sort_by {
        SortBy::Name => records.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortBy::Date => {
            // Undated records trail the dated ones in their original order.
            records.sort_by_key(|record| Reverse(parse_certificate_date(&record.issue_date)))
        }
        SortBy::Relevance => match text {
            Some(text) => records.sort_by(|a, b| {
                let a_hit = contains_ignore_case(&a.name, text);
                let b_hit = contains_ignore_case(&b.name, text);
                b_hit
                    .cmp(&a_hit)
                    .then_with(|| compare_names(&a.name, &b.name))
            }),
            None => records.sort_by(|a, b| compare_names(&a.name, &b.name)),
        },
    }
}

/// Locale-style name comparison: case-insensitive first, then exact.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let a_clean = normalize_text(a);
    let b_clean = normalize_text(b);
    a_clean
        .to_lowercase()
        .cmp(&b_clean.to_lowercase())
        .then_with(|| a_clean.cmp(&b_clean))
}
