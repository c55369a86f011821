//! Lab search parameters and their lenient coercion from query strings.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Page size used when `limit` is absent or unparseable.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// Certificate validity filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    Active,
    Expired,
    #[default]
    All,
}

impl CertificateStatus {
    /// Parse a status, falling back to [`CertificateStatus::All`] for unknown values.
    pub fn from_param(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Whether a record with the given activity passes this filter.
    pub fn admits(self, is_active: bool) -> bool {
        match self {
            CertificateStatus::All => true,
            CertificateStatus::Active => is_active,
            CertificateStatus::Expired => !is_active,
        }
    }
}

impl FromStr for CertificateStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(CertificateStatus::Active),
            "expired" => Ok(CertificateStatus::Expired),
            "all" => Ok(CertificateStatus::All),
            _ => Err(()),
        }
    }
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CertificateStatus::Active => "active",
            CertificateStatus::Expired => "expired",
            CertificateStatus::All => "all",
        })
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Alphabetical by lab name.
    #[default]
    Name,
    /// Most recently issued first.
    Date,
    /// Labs whose name contains the query first, then alphabetical.
    Relevance,
}

impl SortBy {
    /// Parse a sort key, falling back to [`SortBy::Name`] for unknown values.
    pub fn from_param(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for SortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortBy::Name),
            "date" => Ok(SortBy::Date),
            "relevance" => Ok(SortBy::Relevance),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortBy::Name => "name",
            SortBy::Date => "date",
            SortBy::Relevance => "relevance",
        })
    }
}

/// Parameters for one lab search.
///
/// `state`, `city` and `disciplines` are compared verbatim against the
/// normalized record values. Clients are expected to pick them from the facet
/// lists returned by a previous search, which are already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabQuery {
    /// Free-text query; empty matches everything.
    #[serde(default)]
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Match-any discipline filter; empty means no filter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disciplines: Vec<String>,
    #[serde(default)]
    pub certificate_status: CertificateStatus,
    /// One-based page number.
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub sort_by: SortBy,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for LabQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            state: None,
            city: None,
            disciplines: Vec::new(),
            certificate_status: CertificateStatus::All,
            page: default_page(),
            limit: default_limit(),
            sort_by: SortBy::Name,
        }
    }
}

impl LabQuery {
    /// Build a query from raw `key=value` pairs as found in a URL query string.
    ///
    /// Nothing here fails: unknown keys are ignored, empty values count as
    /// absent, and unparseable numbers or enum values fall back to defaults.
    /// Disciplines may be repeated as `disciplines[]` or `disciplines`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = LabQuery::default();

        for (key, value) in pairs {
            let value = value.as_ref().trim();
            match key.as_ref() {
                "query" | "q" => query.query = value.to_string(),
                "state" => query.state = non_empty(value),
                "city" => query.city = non_empty(value),
                "disciplines[]" | "disciplines" | "discipline" => {
                    if let Some(discipline) = non_empty(value) {
                        query.disciplines.push(discipline);
                    }
                }
                "certificateStatus" => {
                    query.certificate_status = CertificateStatus::from_param(value)
                }
                "page" => query.page = parse_number(value).unwrap_or(1),
                "limit" => query.limit = parse_number(value).unwrap_or(DEFAULT_PAGE_SIZE),
                "sortBy" => query.sort_by = SortBy::from_param(value),
                _ => {}
            }
        }

        query
    }

    /// Page number floored to 1.
    pub fn effective_page(&self) -> usize {
        self.page.max(1)
    }

    /// Page size clamped to `[1, MAX_PAGE_SIZE]`.
    pub fn effective_limit(&self) -> usize {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }

    /// Trimmed free-text query, or `None` when blank.
    pub fn text(&self) -> Option<&str> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Lenient numeric parse: accepts a leading integer prefix ("3abc" -> 3) and
/// maps negatives and zero to `Some(0)` so callers can clamp them. Integers
/// too large to represent saturate instead of counting as malformed.
fn parse_number(value: &str) -> Option<usize> {
    let digits_end = value
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    let prefix = &value[..digits_end];

    match prefix.parse::<i64>() {
        Ok(n) if n <= 0 => Some(0),
        Ok(n) => Some(usize::try_from(n).unwrap_or(usize::MAX)),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(usize::MAX),
            IntErrorKind::NegOverflow => Some(0),
            _ => None,
        },
    }
}
