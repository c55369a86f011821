//! Lab Finder library entry points.
//!
//! This crate loads the accredited testing-lab dataset, normalizes its
//! free-text fields, and answers filtered, sorted and paginated searches with
//! facet lists. It also validates contact and sample-report submissions and
//! renders the site's sitemap. Higher-level consumers (CLI, services, Lambdas)
//! should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod certificate;
pub mod dataset;
pub mod directory;
pub mod discipline;
pub mod error;
pub mod mail;
pub mod matching;
pub mod query;
pub mod record;
pub mod search;
pub mod sitemap;

#[cfg(test)]
mod test_helpers;

pub use certificate::{is_certificate_active, is_certificate_active_at, parse_certificate_date};
pub use dataset::{default_dataset_path, resolve_dataset_path, DATASET_FILENAME, DATA_PATH_ENV};
pub use directory::LabDirectory;
pub use discipline::{canonical_label, normalize_disciplines, normalize_labels, DISCIPLINE_RULES};
pub use error::{Error, Result};
pub use mail::{
    is_valid_email, ContactSubmission, EmailMessage, HttpMailer, LogMailer, MailConfig, Mailer,
    SampleReportRequest, SubmissionKind,
};
pub use matching::fuzzy_match;
pub use query::{CertificateStatus, LabQuery, SortBy, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use record::{LabId, LabRecord};
pub use search::{compute_facets, search, search_at, Facets, LabSummary, SearchResult};
pub use sitemap::{render_sitemap, ChangeFrequency, SitemapEntry, SITE_ROUTES};
