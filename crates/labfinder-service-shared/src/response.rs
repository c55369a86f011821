//! Response wrapper for successful HTTP responses.

use axum::{
    http::{header::CACHE_CONTROL, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Wrapper for successful responses with content type metadata.
///
/// This provides symmetry with `ProblemDetails` by including content type
/// information in the response body.
///
/// # Example
///
/// ```
/// use labfinder_service_shared::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Ack {
///     success: bool,
///     message: String,
/// }
///
/// let ack = Ack { success: true, message: "Email sent successfully".into() };
/// let response = ServiceResponse::new(ack).with_cache_control("no-store");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// The actual response payload.
    #[serde(flatten)]
    pub data: T,

    /// Content type for this response.
    pub content_type: String,

    /// Value for the `Cache-Control` header; not part of the body.
    #[serde(skip)]
    pub cache_control: Option<String>,
}

impl<T> ServiceResponse<T> {
    /// Create a new successful response with the default content type.
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
            cache_control: None,
        }
    }

    /// Create a response with a custom content type.
    pub fn with_content_type(data: T, content_type: impl Into<String>) -> Self {
        Self {
            data,
            content_type: content_type.into(),
            cache_control: None,
        }
    }

    /// Attach a `Cache-Control` header value.
    pub fn with_cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

/// Implement IntoResponse for axum to return ServiceResponse as HTTP responses.
impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        let cache_control = self
            .cache_control
            .as_deref()
            .and_then(|value| HeaderValue::from_str(value).ok());

        let mut response = Json(self).into_response();
        if let Some(value) = cache_control {
            response.headers_mut().insert(CACHE_CONTROL, value);
        }
        response
    }
}
