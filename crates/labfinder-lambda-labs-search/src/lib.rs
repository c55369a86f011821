use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};

use labfinder_lambda_shared::{
    get_runtime, init_error_to_problem, init_runtime, init_tracing, LabsSearchEvent,
    LambdaResponse, ProblemDetails, Validate,
};
use labfinder_lib::{LabDirectory, SearchResult};

/// Bundled lab dataset (from data/labs.json).
#[cfg(feature = "bundle-data")]
static DATA_BYTES: &[u8] = include_bytes!("../../../data/labs.json");
#[cfg(not(feature = "bundle-data"))]
static DATA_BYTES: &[u8] = &[];

/// Cache policy for search responses; the dataset only changes on deploy.
pub const SEARCH_CACHE_CONTROL: &str = "public, s-maxage=300, stale-while-revalidate=86400";

/// Lambda response - either success or RFC 9457 error.
#[derive(Debug, serde::Serialize)]
#[serde(untagged)]
pub enum Response {
    Success(LambdaResponse<SearchResult>),
    Error(ProblemDetails),
}

/// Entry point used by the Lambda runtime.
pub async fn run() -> Result<(), Error> {
    init_tracing();

    // A failed init is reported per invocation as a 500 problem.
    if let Err(e) = init_runtime(DATA_BYTES) {
        warn!(error = %e, "starting without a lab directory");
    }

    lambda_runtime::run(service_fn(handler)).await
}

/// Lambda handler invoked per request.
pub async fn handler(event: LambdaEvent<Value>) -> Result<Response, Error> {
    let request_id = event.context.request_id.clone();

    let Some(runtime) = get_runtime() else {
        return Ok(Response::Error(init_error_to_problem(&request_id)));
    };

    Ok(handle_search_request(
        event.payload,
        runtime.directory(),
        &request_id,
    ))
}

/// Decode an API Gateway event and run the search against `directory`.
pub fn handle_search_request(
    payload: Value,
    directory: &LabDirectory,
    request_id: &str,
) -> Response {
    let event: LabsSearchEvent = match serde_json::from_value(payload) {
        Ok(event) => event,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "failed to parse event");
            return Response::Error(ProblemDetails::bad_request(
                format!("Invalid request: {}", e),
                request_id,
            ));
        }
    };

    if let Err(problem) = event.validate(request_id) {
        info!(request_id = %request_id, method = %event.method(), "method not allowed");
        return Response::Error(*problem);
    }

    let query = event.to_query();
    info!(
        request_id = %request_id,
        query = %query.query,
        state = ?query.state,
        city = ?query.city,
        disciplines = ?query.disciplines,
        certificate_status = %query.certificate_status,
        sort_by = %query.sort_by,
        "handling labs search"
    );

    let result = directory.search(&query);

    info!(
        request_id = %request_id,
        total_count = result.total_count,
        page = result.current_page,
        total_pages = result.total_pages,
        "labs search completed"
    );

    Response::Success(LambdaResponse::new(result).with_cache_control(SEARCH_CACHE_CONTROL))
}
