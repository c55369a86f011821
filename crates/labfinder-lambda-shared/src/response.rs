//! Response wrapper for successful Lambda responses.

use serde::{Deserialize, Serialize};

/// Wrapper for successful Lambda responses with content type metadata.
///
/// This provides symmetry with `ProblemDetails` by including content type
/// information in the response body. `cache_control` is passed through to the
/// API Gateway integration when set.
///
/// # Example
///
/// ```
/// use labfinder_lambda_shared::LambdaResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Page {
///     total_count: usize,
/// }
///
/// let response = LambdaResponse::new(Page { total_count: 3 }).with_cache_control("no-store");
/// assert_eq!(response.cache_control.as_deref(), Some("no-store"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LambdaResponse<T> {
    /// The actual response payload.
    #[serde(flatten)]
    pub data: T,

    /// Content type for this response.
    pub content_type: String,

    /// Cache policy for the response, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<String>,
}

impl<T> LambdaResponse<T> {
    /// Create a new successful response with the default content type.
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
            cache_control: None,
        }
    }

    /// Attach a cache policy.
    pub fn with_cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }
}

impl<T> From<T> for LambdaResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}
