//! Shared infrastructure for Lab Finder AWS Lambda functions.
//!
//! This crate provides common functionality used across Lambda handlers:
//!
//! - [`LambdaRuntime`]: Pre-loaded lab directory reused across invocations
//! - [`init_tracing`]: JSON-formatted tracing for CloudWatch Logs
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`LambdaResponse`]: Wrapper for successful responses with content type
//! - [`LabsSearchEvent`]: API Gateway event decoding for the lab search
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides fixtures and event builders for Lambda
//! handler testing. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod problem;
mod requests;
mod response;
mod runtime;
mod tracing_init;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_METHOD_NOT_ALLOWED,
};
pub use requests::{LabsSearchEvent, Validate};
pub use response::LambdaResponse;
pub use runtime::{get_runtime, init_error_to_problem, init_runtime, InitError, LambdaRuntime};
pub use tracing_init::init_tracing;
