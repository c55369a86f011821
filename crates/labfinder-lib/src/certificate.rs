//! Accreditation date handling.
//!
//! Source dates are day-month-year text (`DD-MM-YYYY`). Anything that fails
//! to parse is treated as inactive, never as an error.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Format used for issue and expiry dates in the dataset.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse a `DD-MM-YYYY` date, tolerating surrounding whitespace.
pub fn parse_certificate_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Whether a certificate with the given expiry date is active right now.
pub fn is_certificate_active(expiry: &str) -> bool {
    is_certificate_active_at(expiry, Local::now().naive_local())
}

/// Whether a certificate is active at `now`.
///
/// The expiry date is taken at the start of that day, so a certificate
/// expiring today is already inactive.
pub fn is_certificate_active_at(expiry: &str, now: NaiveDateTime) -> bool {
    parse_certificate_date(expiry)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .is_some_and(|expires_at| expires_at > now)
}
