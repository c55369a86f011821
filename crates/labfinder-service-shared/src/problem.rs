//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>
//!
//! Every body also carries an `error` field repeating the title, so clients
//! that only look for `{ "error": ... }` keep working.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use labfinder_lib::Error as LibError;

/// Problem type URI for invalid request parameters or bodies.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for unsupported HTTP methods.
pub const PROBLEM_METHOD_NOT_ALLOWED: &str = "/problems/method-not-allowed";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for failures of the upstream mail provider.
pub const PROBLEM_MAIL_DELIVERY: &str = "/problems/mail-delivery";

/// Problem type URI for service unavailable (e.g., dataset missing).
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use labfinder_service_shared::{ProblemDetails, PROBLEM_INVALID_REQUEST};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_INVALID_REQUEST,
///     "Invalid Request",
///     StatusCode::BAD_REQUEST,
/// )
/// .with_detail("email is required")
/// .with_request_id("req-12345");
///
/// assert_eq!(problem.error, "Invalid Request");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (e.g., request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Summary message; mirrors `title`.
    pub error: String,

    /// Content type for this response (always "application/problem+json").
    pub content_type: String,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        let title = title.into();
        Self {
            type_uri: type_uri.into(),
            error: title.clone(),
            title,
            status: status.as_u16(),
            detail: None,
            instance: None,
            content_type: "application/problem+json".to_string(),
        }
    }

    /// Add a detailed explanation of this specific problem occurrence.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add the request identifier for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// Create a 400 Bad Request problem for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 405 Method Not Allowed problem.
    pub fn method_not_allowed(method: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_METHOD_NOT_ALLOWED,
            "Method not allowed",
            StatusCode::METHOD_NOT_ALLOWED,
        )
        .with_detail(format!("Method {method} is not supported on this endpoint"))
        .with_request_id(request_id)
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal server error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 502 Bad Gateway problem for upstream mail failures.
    ///
    /// The detail is fixed; provider responses are only logged.
    pub fn bad_gateway(request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_MAIL_DELIVERY,
            "Failed to send email",
            StatusCode::BAD_GATEWAY,
        )
        .with_detail("The message could not be delivered. Please try again later.")
        .with_request_id(request_id)
    }

    /// Create a 503 Service Unavailable problem.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

/// Implement IntoResponse for axum to return ProblemDetails as HTTP responses.
impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );

        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// Dataset and IO failures become a generic 500 so file paths and parser
/// output never reach clients; the caller is expected to log the error.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::InvalidSubmission { message } => {
            ProblemDetails::bad_request(message.clone(), request_id)
        }
        LibError::MailDelivery { .. } | LibError::Http(_) => {
            ProblemDetails::bad_gateway(request_id)
        }
        LibError::DatasetNotFound { .. }
        | LibError::DatasetParse { .. }
        | LibError::ProjectDirsUnavailable
        | LibError::Io(_) => {
            ProblemDetails::internal_error("Failed to load lab directory", request_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_problem_details_new() {
        let problem = ProblemDetails::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        );
        assert_eq!(problem.type_uri, PROBLEM_INVALID_REQUEST);
        assert_eq!(problem.title, "Invalid Request");
        assert_eq!(problem.error, "Invalid Request");
        assert_eq!(problem.status, 400);
        assert_eq!(problem.content_type, "application/problem+json");
    }

    #[test]
    fn test_problem_details_method_not_allowed() {
        let problem = ProblemDetails::method_not_allowed("POST", "req-405");
        assert_eq!(problem.status, 405);
        assert_eq!(problem.error, "Method not allowed");
        assert!(problem.detail.as_deref().unwrap().contains("POST"));
    }

    #[test]
    fn test_problem_details_bad_gateway_is_generic() {
        let problem = ProblemDetails::bad_gateway("req-502");
        assert_eq!(problem.status, 502);
        assert_eq!(problem.error, "Failed to send email");
        assert_eq!(problem.instance.as_deref(), Some("req-502"));
    }

    #[test]
    fn test_problem_details_serialization() {
        let problem = ProblemDetails::bad_request("Test error", "req-test");
        let json = serde_json::to_string(&problem).unwrap();

        assert!(json.contains("\"type\":\"/problems/invalid-request\""));
        assert!(json.contains("\"title\":\"Invalid Request\""));
        assert!(json.contains("\"error\":\"Invalid Request\""));
        assert!(json.contains("\"status\":400"));
        assert!(json.contains("\"detail\":\"Test error\""));
        assert!(json.contains("\"instance\":\"req-test\""));
    }

    #[test]
    fn test_from_lib_error_hides_dataset_paths() {
        let error = LibError::DatasetNotFound {
            path: PathBuf::from("/secret/labs.json"),
        };
        let problem = from_lib_error(&error, "req-lib");

        assert_eq!(problem.status, 500);
        assert_eq!(problem.error, "Internal server error");
        assert!(!problem.detail.as_deref().unwrap().contains("/secret"));
    }

    #[test]
    fn test_from_lib_error_parse_failure() {
        let error = LibError::DatasetParse {
            message: "expected value at line 1 column 1".to_string(),
        };
        let problem = from_lib_error(&error, "req-parse");
        assert_eq!(problem.status, 500);
        assert!(!problem.detail.as_deref().unwrap().contains("line 1"));
    }

    #[test]
    fn test_from_lib_error_invalid_submission() {
        let error = LibError::InvalidSubmission {
            message: "email is required".to_string(),
        };
        let problem = from_lib_error(&error, "req-400");
        assert_eq!(problem.status, 400);
        assert_eq!(problem.detail.as_deref(), Some("email is required"));
    }

    #[test]
    fn test_from_lib_error_mail_delivery() {
        let error = LibError::MailDelivery {
            message: "provider responded with 401: bad key".to_string(),
        };
        let problem = from_lib_error(&error, "req-mail");
        assert_eq!(problem.status, 502);
        assert!(!problem.detail.as_deref().unwrap().contains("bad key"));
    }
}
