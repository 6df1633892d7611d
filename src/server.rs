// Tax Dashboard - Web Server
// Page + JSON API the page calls on every hover

use crate::charts::{ChartSlot, ChartSpec};
use crate::dashboard::{Dashboard, DependentCharts};
use crate::error::DataUnavailable;
use crate::overview::{render_overview, sample_2022};
use crate::records::RecordSource;
use crate::selection::HoverEvent;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard<Box<dyn RecordSource>>>,
}

impl AppState {
    pub fn new(dashboard: Dashboard<Box<dyn RecordSource>>) -> Self {
        AppState {
            dashboard: Arc::new(dashboard),
        }
    }
}

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Everything a handler can fail with
#[derive(Debug)]
pub enum ApiError {
    DataUnavailable(DataUnavailable),
    UnknownSlot(String),
    Internal(String),
}

impl From<DataUnavailable> for ApiError {
    fn from(e: DataUnavailable) -> Self {
        ApiError::DataUnavailable(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::DataUnavailable(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::UnknownSlot(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ApiResponse::<()>::err(message))).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// Run a pipeline call off the async runtime; the source does blocking I/O
async fn with_dashboard<T, F>(state: AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Dashboard<Box<dyn RecordSource>>) -> Result<T, DataUnavailable> + Send + 'static,
{
    let dashboard = state.dashboard.clone();
    let result = tokio::task::spawn_blocking(move || f(dashboard.as_ref()))
        .await
        .map_err(|e| {
            error!("Pipeline task failed: {}", e);
            ApiError::Internal(e.to_string())
        })?;
    Ok(result?)
}

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/overview - Master chart
async fn get_overview() -> Json<ApiResponse<ChartSpec>> {
    Json(ApiResponse::ok(render_overview(&sample_2022())))
}

/// POST /api/hover - All four dependent charts for a hover event
async fn post_hover(
    State(state): State<AppState>,
    Json(event): Json<Option<HoverEvent>>,
) -> Result<Json<ApiResponse<DependentCharts>>, ApiError> {
    let charts = with_dashboard(state, move |d| d.update(event.as_ref())).await?;
    Ok(Json(ApiResponse::ok(charts)))
}

/// POST /api/charts/:slot - One dependent chart for a hover event
async fn post_chart(
    State(state): State<AppState>,
    Path(slot): Path<String>,
    Json(event): Json<Option<HoverEvent>>,
) -> Result<Json<ApiResponse<ChartSpec>>, ApiError> {
    let slot: ChartSlot = slot.parse().map_err(ApiError::UnknownSlot)?;
    let chart = with_dashboard(state, move |d| d.update_slot(slot, event.as_ref())).await?;
    Ok(Json(ApiResponse::ok(chart)))
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/overview", get(get_overview))
        .route("/hover", post(post_hover))
        .route("/charts/:slot", post(post_chart))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::StyleBook;
    use crate::records::{Category, CsvRecordSource, Record};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn setup_test_server() -> TestServer {
        let records: Vec<Record> = vec![
            Record::new("Downtown", Category::Residential, 2020, 5000.0),
            Record::new("Downtown", Category::Residential, 2021, 6000.0),
            Record::new("Harris Green", Category::Business, 2021, 22000.0),
        ];
        let source: Box<dyn RecordSource> = Box::new(records);
        let state = AppState::new(Dashboard::new(source, StyleBook::default()));
        TestServer::new(create_router(state)).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = setup_test_server();
        let response = server.get("/api/health").await;

        response.assert_status(StatusCode::OK);
        response.assert_json(&json!({ "success": true, "data": "OK" }));
    }

    #[tokio::test]
    async fn test_index_page() {
        let server = setup_test_server();
        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        assert!(response.text().contains("master-chart"));
    }

    #[tokio::test]
    async fn test_overview() {
        let server = setup_test_server();
        let body: Value = server.get("/api/overview").await.json();

        assert_eq!(body["data"]["data"][0]["x"][0], "Downtown");
        assert_eq!(body["data"]["layout"]["yaxis"]["range"], json!([0.0, 100000.0]));
    }

    #[tokio::test]
    async fn test_hover_null_uses_default() {
        let server = setup_test_server();
        let response = server.post("/api/hover").json(&Value::Null).await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"]["selection"], "Downtown");
        assert_eq!(body["data"]["residential"]["data"][0]["x"], json!([2020, 2021]));
        assert_eq!(body["data"]["residential"]["data"][0]["y"], json!([5000.0, 6000.0]));
    }

    #[tokio::test]
    async fn test_hover_selects_first_point() {
        let server = setup_test_server();
        let event = json!({ "points": [{ "x": "Harris Green" }, { "x": "Downtown" }] });
        let body: Value = server.post("/api/hover").json(&event).await.json();

        assert_eq!(body["data"]["selection"], "Harris Green");
        assert_eq!(body["data"]["business"]["data"][0]["y"], json!([22000.0]));
        assert_eq!(body["data"]["residential"]["data"][0]["x"], json!([]));
    }

    #[tokio::test]
    async fn test_hover_with_numeric_x() {
        let server = setup_test_server();
        let event = json!({ "points": [{ "x": 2020 }] });
        let response = server.post("/api/hover").json(&event).await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"]["selection"], "2020");
        assert_eq!(body["data"]["residential"]["data"][0]["x"], json!([]));
    }

    #[tokio::test]
    async fn test_single_chart() {
        let server = setup_test_server();
        let event = json!({ "points": [{ "x": "Burnside" }] });
        let response = server.post("/api/charts/lightindustry-bar").json(&event).await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"]["data"][0]["type"], "bar");
        assert_eq!(body["data"]["data"][0]["x"], json!([]));
        assert_eq!(body["data"]["layout"]["yaxis"]["range"], json!([50000.0, 400000.0]));
    }

    #[tokio::test]
    async fn test_unknown_slot_is_not_found() {
        let server = setup_test_server();
        let response = server.post("/api/charts/farm").json(&Value::Null).await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_data_is_server_error() {
        let source: Box<dyn RecordSource> = Box::new(CsvRecordSource::new("/nonexistent/test.csv"));
        let state = AppState::new(Dashboard::new(source, StyleBook::default()));
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server.post("/api/hover").json(&Value::Null).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }
}
