//! Request types and validation for Lambda endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use labfinder_lib::LabQuery;

use crate::ProblemDetails;

/// Validation trait for Lambda request types.
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

/// API Gateway proxy event for the lab search.
///
/// Only the fields the handler reads are modelled. A missing `httpMethod`
/// (direct invocation) is treated as `GET`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabsSearchEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_parameters: Option<BTreeMap<String, String>>,

    /// Repeated keys such as `disciplines[]` arrive here with every value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_value_query_string_parameters: Option<BTreeMap<String, Vec<String>>>,
}

impl LabsSearchEvent {
    /// HTTP method of the event, upper-cased.
    pub fn method(&self) -> String {
        self.http_method
            .as_deref()
            .map(str::to_ascii_uppercase)
            .unwrap_or_else(|| "GET".to_string())
    }

    /// Flatten the query string into key/value pairs.
    ///
    /// Multi-value parameters take precedence because they carry every value
    /// of a repeated key; single-value parameters only fill in keys missing
    /// from them.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(multi) = &self.multi_value_query_string_parameters {
            for (key, values) in multi {
                pairs.extend(values.iter().map(|value| (key.clone(), value.clone())));
            }
        }

        if let Some(single) = &self.query_string_parameters {
            let multi = self.multi_value_query_string_parameters.as_ref();
            for (key, value) in single {
                if multi.is_some_and(|m| m.contains_key(key)) {
                    continue;
                }
                pairs.push((key.clone(), value.clone()));
            }
        }

        pairs
    }

    /// Coerce the query string into a search.
    pub fn to_query(&self) -> LabQuery {
        LabQuery::from_pairs(self.query_pairs())
    }
}

impl Validate for LabsSearchEvent {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        let method = self.method();
        if method != "GET" && method != "HEAD" {
            return Err(Box::new(ProblemDetails::method_not_allowed(
                &method, request_id,
            )));
        }
        Ok(())
    }
}
