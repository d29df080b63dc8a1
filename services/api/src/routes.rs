use crate::infra::{reload_directory, AppState};
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Local;
use helper_directory::directory::{
    DirectoryError, HelperDirectory, LoadFailure, PageResult, SearchCriteria,
};
use helper_directory::error::AppError;
use serde_json::json;

pub(crate) fn helper_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/helpers", get(current_page_endpoint))
        .route("/api/v1/helpers/search", post(search_endpoint))
        .route("/api/v1/helpers/reset", post(reset_endpoint))
        .route("/api/v1/helpers/reload", post(reload_endpoint))
        .route("/api/v1/helpers/pages/next", post(next_page_endpoint))
        .route("/api/v1/helpers/pages/previous", post(previous_page_endpoint))
        .route("/api/v1/helpers/pages/:page", get(go_to_page_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn current_page_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Response, AppError> {
    let directory = state.directory.lock().await;
    let result = directory.current();
    page_response(&directory, result)
}

pub(crate) async fn search_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Response, AppError> {
    let criteria: SearchCriteria =
        serde_json::from_value(payload).map_err(|err| AppError::Criteria(err.to_string()))?;

    let mut directory = state.directory.lock().await;
    let result = directory.apply_filters(criteria);
    page_response(&directory, result)
}

pub(crate) async fn reset_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Response, AppError> {
    let mut directory = state.directory.lock().await;
    let result = directory.reset();
    page_response(&directory, result)
}

pub(crate) async fn reload_endpoint(Extension(state): Extension<AppState>) -> Response {
    match reload_directory(&state, Local::now().date_naive()).await {
        Ok(page) => Json(page).into_response(),
        Err(failure) => failure_response(failure),
    }
}

pub(crate) async fn next_page_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Response, AppError> {
    let mut directory = state.directory.lock().await;
    let result = directory.next_page();
    page_response(&directory, result)
}

pub(crate) async fn previous_page_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Response, AppError> {
    let mut directory = state.directory.lock().await;
    let result = directory.previous_page();
    page_response(&directory, result)
}

pub(crate) async fn go_to_page_endpoint(
    Extension(state): Extension<AppState>,
    Path(page): Path<usize>,
) -> Result<Response, AppError> {
    let mut directory = state.directory.lock().await;
    let result = directory.go_to_page(page);
    page_response(&directory, result)
}

/// A failed load answers every query with the error panel until a reload succeeds.
fn page_response(
    directory: &HelperDirectory,
    result: Result<PageResult, DirectoryError>,
) -> Result<Response, AppError> {
    match result {
        Ok(page) => Ok(Json(page).into_response()),
        Err(DirectoryError::LoadFailed { message }) => Ok(failure_response(
            directory
                .failure()
                .unwrap_or_else(|| LoadFailure::new(message)),
        )),
        Err(err) => Err(err.into()),
    }
}

fn failure_response(failure: LoadFailure) -> Response {
    (StatusCode::BAD_GATEWAY, Json(failure)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use helper_directory::directory::{HelperSource, RawHelperRow, SourceError};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[derive(Debug)]
    enum StubSource {
        Rows(Vec<RawHelperRow>),
        Down,
    }

    #[async_trait]
    impl HelperSource for StubSource {
        fn describe(&self) -> String {
            "stub sheet".to_string()
        }

        async fn fetch(&self) -> Result<Vec<RawHelperRow>, SourceError> {
            match self {
                StubSource::Rows(rows) if rows.is_empty() => Err(SourceError::Empty),
                StubSource::Rows(rows) => Ok(rows.clone()),
                StubSource::Down => Err(SourceError::Status {
                    status: 503,
                    reason: "Service Unavailable".to_string(),
                }),
            }
        }
    }

    fn helper_row(name: &str, nationality: &str, status: &str) -> RawHelperRow {
        RawHelperRow {
            status: Some(status.to_string()),
            name: Some(name.to_string()),
            nationality: Some(nationality.to_string()),
            dob: Some("1 Jan 1990".to_string()),
            height: Some("155 cm".to_string()),
            weight: Some("50 kg".to_string()),
            salary: Some("$700".to_string()),
            ..RawHelperRow::default()
        }
    }

    fn sheet() -> Vec<RawHelperRow> {
        vec![
            helper_row("Maria Santos", "Filipino", "Available"),
            helper_row("Siti Rahma", "Indonesian", "Available"),
            helper_row("Rosa Reyes", "Filipino", "Rejected"),
            helper_row("Aye Aye", "Myanmar", "Available"),
            helper_row("Nur Aisyah", "Indonesian", "Available"),
            helper_row("Thida Win", "Myanmar", "Available"),
            helper_row("Ratna Sari", "Indonesian", "Available"),
            helper_row("May Thu", "Myanmar", "Available"),
        ]
    }

    fn app(source: StubSource) -> (Router, AppState) {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let state = AppState::new(handle, Arc::new(source));
        let router = helper_routes().layer(Extension(state.clone()));
        (router, state)
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(request.body(body).expect("request builds"))
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body collects");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_and_readiness_report_state() {
        let (router, state) = app(StubSource::Rows(sheet()));

        let (status, body) = send(&router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = send(&router, "GET", "/ready", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        state.readiness.store(true, Ordering::Release);
        let (status, _) = send(&router, "GET", "/ready", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn queries_before_load_are_unavailable() {
        let (router, _) = app(StubSource::Rows(sheet()));

        let (status, body) = send(&router, "GET", "/api/v1/helpers", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("still loading"));
    }

    #[tokio::test]
    async fn browse_search_and_reset_flow() {
        let (router, _) = app(StubSource::Rows(sheet()));

        let (status, body) = send(&router, "POST", "/api/v1/helpers/reload", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_count"], 7);
        assert_eq!(body["total_pages"], 2);
        assert_eq!(body["summary"], "7 Helpers Found");
        assert_eq!(
            body["notification"]["message"],
            "Helpers data loaded successfully!"
        );

        let (status, body) = send(&router, "POST", "/api/v1/helpers/pages/next", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], 2);
        assert_eq!(body["records"].as_array().map(Vec::len), Some(1));
        assert!(body.get("notification").is_none());

        let (status, body) = send(&router, "POST", "/api/v1/helpers/pages/next", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], 2);

        let (status, _) = send(&router, "GET", "/api/v1/helpers/pages/3", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&router, "GET", "/api/v1/helpers/pages/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page_info"], "Page 1 of 2");

        let (status, body) = send(
            &router,
            "POST",
            "/api/v1/helpers/search",
            Some(r#"{"nationality": "Indonesian", "sort": "name-asc"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["records"]
            .as_array()
            .expect("records array")
            .iter()
            .filter_map(|record| record["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Nur Aisyah", "Ratna Sari", "Siti Rahma"]);
        assert_eq!(body["notification"]["message"], "Found 3 helpers");

        let (status, body) = send(
            &router,
            "POST",
            "/api/v1/helpers/search",
            Some(r#"{"nationality": "Vietnamese"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "0 Helpers Found");
        assert_eq!(body["notification"]["level"], "info");

        let (status, body) = send(&router, "POST", "/api/v1/helpers/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_count"], 7);
        assert_eq!(body["notification"]["message"], "Filters have been reset");
    }

    #[tokio::test]
    async fn malformed_criteria_are_bad_requests() {
        let (router, _) = app(StubSource::Rows(sheet()));
        send(&router, "POST", "/api/v1/helpers/reload", None).await;

        let (status, body) = send(
            &router,
            "POST",
            "/api/v1/helpers/search",
            Some(r#"{"height": "tall"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .starts_with("invalid search criteria"));

        let (status, _) = send(
            &router,
            "POST",
            "/api/v1/helpers/search",
            Some(r#"{"sort": "salary-asc"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn failed_loads_serve_the_error_panel() {
        let (router, _) = app(StubSource::Down);

        let (status, body) = send(&router, "POST", "/api/v1/helpers/reload", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["message"], "Failed to fetch data: 503 Service Unavailable");
        assert_eq!(body["summary"], "Error loading data");
        assert_eq!(body["retryable"], true);
        assert_eq!(body["notification"]["level"], "error");

        let (status, body) = send(&router, "GET", "/api/v1/helpers", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["summary"], "Error loading data");
    }

    #[tokio::test]
    async fn empty_sheet_is_reported_as_failure() {
        let (router, _) = app(StubSource::Rows(Vec::new()));

        let (status, body) = send(&router, "POST", "/api/v1/helpers/reload", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["message"], "No data available in the response");
    }
}
