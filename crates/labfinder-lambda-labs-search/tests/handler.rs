use labfinder_lambda_labs_search::{Response, SEARCH_CACHE_CONTROL};
use labfinder_lambda_shared::init_runtime;
use labfinder_lambda_shared::test_utils::{
    api_gateway_event, fixture_labs_bytes, get_event, lambda_event, mock_request_id,
};
use serde_json::Value;

fn init_fixture_runtime() {
    init_runtime(fixture_labs_bytes()).expect("fixture runtime initializes");
}

async fn invoke(payload: Value) -> Response {
    init_fixture_runtime();
    labfinder_lambda_labs_search::handler(lambda_event(payload, &mock_request_id("handler")))
        .await
        .expect("handler should succeed")
}

#[tokio::test]
async fn filters_by_repeated_disciplines() {
    let payload = get_event(&[
        ("disciplines[]", "Forensic"),
        ("disciplines[]", "Software & IT"),
    ]);

    match invoke(payload).await {
        Response::Success(success) => {
            let names: Vec<_> = success
                .data
                .labs
                .iter()
                .map(|lab| lab.record.name.as_str())
                .collect();
            assert_eq!(names, ["Mumbai Forensic Sciences", "Zenith Software Assurance"]);
            assert_eq!(success.cache_control.as_deref(), Some(SEARCH_CACHE_CONTROL));
        }
        Response::Error(err) => panic!("unexpected error: {err:?}"),
    }
}

#[tokio::test]
async fn active_certificates_only() {
    let payload = get_event(&[("certificateStatus", "active")]);

    match invoke(payload).await {
        Response::Success(success) => {
            assert_eq!(success.data.total_count, 4);
            assert!(success.data.labs.iter().all(|lab| lab.is_active));
        }
        Response::Error(err) => panic!("unexpected error: {err:?}"),
    }
}

#[tokio::test]
async fn facets_cover_whole_dataset_when_filtered() {
    let payload = get_event(&[("query", "no lab has this name")]);

    match invoke(payload).await {
        Response::Success(success) => {
            assert_eq!(success.data.total_count, 0);
            assert_eq!(success.data.total_pages, 0);
            assert!(success.data.labs.is_empty());
            assert_eq!(success.data.filters.states.len(), 6);
        }
        Response::Error(err) => panic!("unexpected error: {err:?}"),
    }
}

#[tokio::test]
async fn rejects_delete() {
    match invoke(api_gateway_event("DELETE", &[])).await {
        Response::Error(problem) => assert_eq!(problem.status, 405),
        Response::Success(_) => panic!("DELETE should be rejected"),
    }
}

#[tokio::test]
async fn direct_invocation_without_method_is_a_search() {
    match invoke(serde_json::json!({})).await {
        Response::Success(success) => assert_eq!(success.data.total_count, 8),
        Response::Error(err) => panic!("unexpected error: {err:?}"),
    }
}
