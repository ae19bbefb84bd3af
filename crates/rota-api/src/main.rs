use axum::{
    body::Bytes,
    extract::Query,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rota_core::{
    table, AssignmentRequest, AssignmentResult, LayoutPreset, Planner, PlannerError, ReportTable,
    TableLayout,
};
use std::io::Cursor;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// JSON array of planner warnings on workbook responses
const WARNINGS_HEADER: &str = "x-rota-warnings";

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Hybrid Work Rota</title>
</head>
<body>
    <h1>Hybrid Work Rota API</h1>
    <h2>API Endpoints:</h2>
    <ul>
        <li>GET /api/health - Health check</li>
        <li>POST /api/assign - Assign from a JSON request</li>
        <li>POST /api/assign/csv?layout=english&amp;seed=1 - Assign from a CSV roster, returns CSV</li>
        <li>POST /api/assign/xlsx?layout=korean - Assign from a CSV roster, returns a workbook</li>
        <li>POST /api/assign/workbook?layout=korean - Assign from an XLSX roster, returns a workbook</li>
    </ul>
</body>
</html>"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Hybrid Work Rota API");

    let addr = std::env::var("ROTA_API_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("Try: curl http://localhost:3000/api/health");

    axum::serve(listener, app()).await?;
    Ok(())
}

fn app() -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/api/health", get(health_check))
        .route("/api/assign", post(assign))
        .route("/api/assign/csv", post(assign_csv))
        .route("/api/assign/xlsx", post(assign_xlsx))
        .route("/api/assign/workbook", post(assign_workbook))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "rota-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Table options for the CSV endpoints
#[derive(Debug, Default, Deserialize)]
struct TableParams {
    #[serde(default)]
    layout: LayoutPreset,
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct CsvAssignment {
    csv: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

/// Runs the planner off the async runtime; each call owns its own seat ledger.
async fn run_planner(request: AssignmentRequest) -> Result<AssignmentResult, AppError> {
    let result = tokio::task::spawn_blocking(move || {
        let planner = Planner::new(request)?;
        planner.plan()
    })
    .await
    .map_err(anyhow::Error::from)??;

    info!(
        "Assignment complete: {} employees in {} departments, {} unseated days, {} warnings",
        result.employees.len(),
        result.departments.len(),
        result.unseated_days,
        result.warnings.len()
    );

    Ok(result)
}

/// Main assignment endpoint
async fn assign(Json(request): Json<AssignmentRequest>) -> Result<Json<AssignmentResult>, AppError> {
    info!(
        "Received assignment request with {} employees",
        request.employees.len()
    );

    Ok(Json(run_planner(request).await?))
}

fn request_from_csv(body: &str, params: &TableParams) -> Result<AssignmentRequest, AppError> {
    let mut request = table::read_request(body.as_bytes(), &params.layout.layout())?;
    request.config.seed = params.seed;
    Ok(request)
}

/// CSV roster in, CSV report and warnings out
async fn assign_csv(
    Query(params): Query<TableParams>,
    body: String,
) -> Result<Json<CsvAssignment>, AppError> {
    info!("Received CSV roster ({} bytes, {} layout)", body.len(), params.layout);

    let request = request_from_csv(&body, &params)?;
    let result = run_planner(request).await?;
    let report = ReportTable::build(&result, &params.layout.layout());

    Ok(Json(CsvAssignment {
        csv: report.to_csv_string()?,
        warnings: result.warnings,
    }))
}

/// CSV roster in, spreadsheet out
async fn assign_xlsx(
    Query(params): Query<TableParams>,
    body: String,
) -> Result<Response, AppError> {
    info!("Received CSV roster for workbook export ({} layout)", params.layout);

    let request = request_from_csv(&body, &params)?;
    workbook_response(request, &params.layout.layout()).await
}

/// Spreadsheet roster in, spreadsheet out
async fn assign_workbook(
    Query(params): Query<TableParams>,
    body: Bytes,
) -> Result<Response, AppError> {
    info!(
        "Received workbook roster ({} bytes, {} layout)",
        body.len(),
        params.layout
    );

    let layout = params.layout.layout();
    let mut request = table::read_request_xlsx(Cursor::new(body), &layout)?;
    request.config.seed = params.seed;
    workbook_response(request, &layout).await
}

/// Plans the request and returns the report as a workbook download, with the
/// planner warnings in the `x-rota-warnings` header.
async fn workbook_response(
    request: AssignmentRequest,
    layout: &TableLayout,
) -> Result<Response, AppError> {
    let result = run_planner(request).await?;
    let workbook = ReportTable::build(&result, layout).to_xlsx(&layout.sheet_name)?;

    for warning in &result.warnings {
        warn!("{}", warning);
    }

    let mut response = (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"assignments.xlsx\"",
            ),
        ],
        workbook,
    )
        .into_response();

    if !result.warnings.is_empty() {
        let encoded = serde_json::to_string(&result.warnings).map_err(anyhow::Error::from)?;
        let value = HeaderValue::from_bytes(encoded.as_bytes()).map_err(anyhow::Error::from)?;
        response
            .headers_mut()
            .insert(HeaderName::from_static(WARNINGS_HEADER), value);
    }

    Ok(response)
}

/// Application error type
struct AppError(anyhow::Error);

impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        AppError(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request error: {}", self.0);

        let status = match self.0.downcast_ref::<PlannerError>() {
            Some(
                PlannerError::InvalidInput(_)
                | PlannerError::MissingColumn(_)
                | PlannerError::Csv(_)
                | PlannerError::Workbook(_),
            ) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

async fn serve_index() -> impl IntoResponse {
    Html(INDEX_HTML)
}
