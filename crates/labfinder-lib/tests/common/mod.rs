//! Shared fixture helpers for integration tests.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use labfinder_lib::LabDirectory;

/// Path to fixtures directory shared by every crate's tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the eight-record lab fixture.
pub fn fixture_labs_path() -> PathBuf {
    fixtures_dir().join("labs.json")
}

/// Load the fixture dataset.
pub fn fixture_directory() -> LabDirectory {
    LabDirectory::from_path(&fixture_labs_path()).expect("fixture labs.json loads")
}

/// Fixed instant used for certificate checks so results do not drift.
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("valid fixed date")
}
