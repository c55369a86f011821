//! Lab Finder HTTP API.
//!
//! # Endpoints
//!
//! - `GET /labs-search` - Filtered, sorted and paginated lab search with facets
//! - `POST /contact` - Contact form submission, forwarded by email
//! - `POST /sample-report` - Sample report request, forwarded by email
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//!
//! Any other method on the three API routes yields a 405 problem response.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{Method, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use labfinder_lib::{
    ContactSubmission, EmailMessage, LabQuery, SampleReportRequest, SearchResult, SubmissionKind,
};
use labfinder_service_shared::{
    AppState, MetricsLayer, ProblemDetails, RequestId, ServiceResponse, Validate, health_live,
    health_ready, metrics_handler, record_mail_failed, record_mail_sent, record_search,
};

/// `Cache-Control` sent with successful search responses.
pub const SEARCH_CACHE_CONTROL: &str = "public, s-maxage=300, stale-while-revalidate=86400";

/// Acknowledgement returned after a submission is delivered.
#[derive(Debug, Serialize)]
pub struct MailAck {
    pub success: bool,
    pub message: String,
}

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Response<T> {
    Success(ServiceResponse<T>),
    Error(ProblemDetails),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, data).into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

/// Build the application router around loaded state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/labs-search",
            get(labs_search_handler).fallback(method_not_allowed),
        )
        .route(
            "/contact",
            post(contact_handler).fallback(method_not_allowed),
        )
        .route(
            "/sample-report",
            post(sample_report_handler).fallback(method_not_allowed),
        )
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle unsupported methods on API routes.
async fn method_not_allowed(method: Method, request_id: RequestId) -> ProblemDetails {
    warn!(request_id = %request_id, method = %method, "method not allowed");
    ProblemDetails::method_not_allowed(method.as_str(), request_id.as_str())
}

/// Handle GET /labs-search requests.
///
/// Query-string coercion never fails; malformed values fall back to defaults.
async fn labs_search_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response<SearchResult> {
    let query = LabQuery::from_pairs(pairs);

    info!(
        request_id = %request_id,
        query = %query.query,
        state = ?query.state,
        city = ?query.city,
        disciplines = ?query.disciplines,
        certificate_status = %query.certificate_status,
        sort_by = %query.sort_by,
        page = query.page,
        limit = query.limit,
        "handling lab search"
    );

    let result = state.directory().search(&query);

    record_search(&query.sort_by.to_string(), result.total_count);
    info!(
        request_id = %request_id,
        total_count = result.total_count,
        returned = result.labs.len(),
        "lab search completed"
    );

    Response::Success(ServiceResponse::new(result).with_cache_control(SEARCH_CACHE_CONTROL))
}

/// Handle POST /contact requests.
async fn contact_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Result<Json<ContactSubmission>, JsonRejection>,
) -> Response<MailAck> {
    let submission = match parse_body(body, SubmissionKind::Contact, &request_id) {
        Ok(submission) => submission,
        Err(problem) => return Response::Error(*problem),
    };

    let message = submission.to_email(state.mail_config());
    deliver(
        &state,
        message,
        SubmissionKind::Contact,
        "Email sent successfully",
        &request_id,
    )
    .await
}

/// Handle POST /sample-report requests.
async fn sample_report_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Result<Json<SampleReportRequest>, JsonRejection>,
) -> Response<MailAck> {
    let request = match parse_body(body, SubmissionKind::SampleReport, &request_id) {
        Ok(request) => request,
        Err(problem) => return Response::Error(*problem),
    };

    let message = request.to_email(state.mail_config());
    deliver(
        &state,
        message,
        SubmissionKind::SampleReport,
        "Sample report request sent successfully",
        &request_id,
    )
    .await
}

fn parse_body<T: Validate>(
    body: Result<Json<T>, JsonRejection>,
    kind: SubmissionKind,
    request_id: &RequestId,
) -> Result<T, Box<ProblemDetails>> {
    let Json(value) = body.map_err(|rejection| {
        record_mail_failed(kind.as_str(), "invalid_body");
        Box::new(ProblemDetails::bad_request(
            rejection.body_text(),
            request_id.as_str(),
        ))
    })?;

    value.validate(request_id.as_str()).inspect_err(|problem| {
        record_mail_failed(kind.as_str(), "validation_error");
        info!(
            request_id = %request_id,
            kind = kind.as_str(),
            detail = ?problem.detail,
            "submission rejected"
        );
    })?;

    Ok(value)
}

/// Send on the blocking pool; the mail client is synchronous.
async fn deliver(
    state: &AppState,
    message: EmailMessage,
    kind: SubmissionKind,
    success_message: &str,
    request_id: &RequestId,
) -> Response<MailAck> {
    let mailer = state.mailer();
    let outcome = tokio::task::spawn_blocking(move || mailer.send(&message)).await;

    match outcome {
        Ok(Ok(())) => {
            record_mail_sent(kind.as_str());
            info!(request_id = %request_id, kind = kind.as_str(), "submission delivered");
            Response::Success(ServiceResponse::new(MailAck {
                success: true,
                message: success_message.to_string(),
            }))
        }
        Ok(Err(e)) => {
            record_mail_failed(kind.as_str(), "provider_error");
            error!(request_id = %request_id, kind = kind.as_str(), error = %e, "mail delivery failed");
            Response::Error(ProblemDetails::bad_gateway(request_id.as_str()))
        }
        Err(e) => {
            record_mail_failed(kind.as_str(), "internal_error");
            error!(request_id = %request_id, kind = kind.as_str(), error = %e, "mail task panicked");
            Response::Error(ProblemDetails::internal_error(
                "Failed to process submission",
                request_id.as_str(),
            ))
        }
    }
}
