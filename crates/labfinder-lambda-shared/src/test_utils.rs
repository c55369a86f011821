//! Test utilities for Lambda handler testing.
//!
//! Shared fixtures and event builders for the Lambda crates.
//!
//! ```ignore
//! use labfinder_lambda_shared::test_utils::{fixture_labs_bytes, get_event, mock_request_id};
//!
//! #[tokio::test]
//! async fn test_handler() {
//!     let event = get_event(&[("state", "Gujarat")]);
//!     let request_id = mock_request_id("state-filter");
//!     // ... test handler logic
//! }
//! ```

use std::path::PathBuf;
use std::sync::OnceLock;

use lambda_runtime::{Context, LambdaEvent};
use serde_json::{json, Map, Value};

use labfinder_lib::LabDirectory;

/// Path to the test fixture dataset (eight labs across six states).
pub fn fixture_labs_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/labs.json")
}

/// Raw fixture bytes, as a Lambda would bundle them.
pub fn fixture_labs_bytes() -> &'static [u8] {
    static BYTES: OnceLock<Vec<u8>> = OnceLock::new();
    BYTES.get_or_init(|| std::fs::read(fixture_labs_path()).expect("fixture dataset should exist"))
}

/// Fixture directory parsed once per test binary.
pub fn fixture_directory() -> &'static LabDirectory {
    static DIRECTORY: OnceLock<LabDirectory> = OnceLock::new();
    DIRECTORY.get_or_init(|| {
        LabDirectory::from_slice(fixture_labs_bytes()).expect("fixture dataset should parse")
    })
}

/// Build an API Gateway proxy event with the given method and query pairs.
///
/// Repeated keys are collected into `multiValueQueryStringParameters`; the
/// single-value map keeps the last value, as API Gateway does.
pub fn api_gateway_event(method: &str, pairs: &[(&str, &str)]) -> Value {
    let mut single = Map::new();
    let mut multi: Map<String, Value> = Map::new();

    for (key, value) in pairs {
        single.insert((*key).to_string(), json!(value));
        match multi.get_mut(*key) {
            Some(Value::Array(values)) => values.push(json!(value)),
            _ => {
                multi.insert((*key).to_string(), json!([value]));
            }
        }
    }

    let (single, multi) = if pairs.is_empty() {
        (Value::Null, Value::Null)
    } else {
        (Value::Object(single), Value::Object(multi))
    };

    json!({
        "httpMethod": method,
        "path": "/labs-search",
        "queryStringParameters": single,
        "multiValueQueryStringParameters": multi,
    })
}

/// Shorthand for a `GET` event.
pub fn get_event(pairs: &[(&str, &str)]) -> Value {
    api_gateway_event("GET", pairs)
}

/// Create a mock request ID for testing.
pub fn mock_request_id(suffix: &str) -> String {
    format!("test-request-{}", suffix)
}

/// Wrap a payload in a `LambdaEvent` carrying the given request ID.
///
/// `Context` is non-exhaustive, so it starts from `Default` and only the
/// request ID is filled in.
pub fn lambda_event(payload: Value, request_id: &str) -> LambdaEvent<Value> {
    let mut context = Context::default();
    context.request_id = request_id.to_string();
    LambdaEvent::new(payload, context)
}
