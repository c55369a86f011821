//! Request types and validation for HTTP endpoints.

use labfinder_lib::{ContactSubmission, Error as LibError, SampleReportRequest};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Body of `POST /contact`.
pub type ContactRequest = ContactSubmission;

/// Body of `POST /sample-report`.
pub type SampleReportBody = SampleReportRequest;

fn submission_problem(error: LibError, request_id: &str) -> Box<ProblemDetails> {
    let detail = match error {
        LibError::InvalidSubmission { message } => message,
        other => other.to_string(),
    };
    Box::new(ProblemDetails::bad_request(detail, request_id))
}

impl Validate for ContactSubmission {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        ContactSubmission::validate(self).map_err(|e| submission_problem(e, request_id))
    }
}

impl Validate for SampleReportRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        SampleReportRequest::validate(self).map_err(|e| submission_problem(e, request_id))
    }
}
