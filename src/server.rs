//! HTTP server.
//!
//! Exposes the scheme matcher as a small JSON API for the VoiceAI Bharat
//! client app.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Liveness probe with a fixed status message |
//! | `POST` | `/query-schemes` | Match free text against the scheme catalog |
//! | `GET`  | `/schemes` | List the catalog in order |
//! | `GET`  | `/health` | Health check (returns version and catalog size) |
//!
//! # Error Contract
//!
//! Request validation failures return `422` with field-level detail:
//!
//! ```json
//! {
//!   "error": {
//!     "code": "validation_error",
//!     "message": "missing required field: text",
//!     "details": [{ "kind": "missing", "field": "text" }]
//!   }
//! }
//! ```
//!
//! A query that matches nothing is not an error; it returns `[]`.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the mobile and web
//! clients can call the API cross-origin.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::catalog::{CatalogEntry, SchemeCatalog};
use crate::config::Config;
use crate::models::SchemeRecord;
use crate::search::match_schemes;
use crate::validation::{check_content_type, parse_query_request, FieldIssue, ValidationError};

/// Status message returned by `GET /`.
pub const ROOT_STATUS: &str = "VoiceAI Bharat API is running!";

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    /// Read-only scheme catalog, built once at startup.
    catalog: Arc<SchemeCatalog>,
}

/// Starts the HTTP server with the catalog named by the configuration.
///
/// Binds to `[server].bind` and runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let catalog = SchemeCatalog::from_config(config)?;
    run_server_with_catalog(config, Arc::new(catalog)).await
}

/// Starts the HTTP server with an already-built catalog.
pub async fn run_server_with_catalog(
    config: &Config,
    catalog: Arc<SchemeCatalog>,
) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let scheme_count = catalog.len();

    let app = router(catalog);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(
        "Scheme Desk listening on http://{} ({} schemes)",
        listener.local_addr()?,
        scheme_count
    );
    info!("  GET  /");
    info!("  POST /query-schemes");
    info!("  GET  /schemes");
    info!("  GET  /health");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the router with all routes and middleware.
pub fn router(catalog: Arc<SchemeCatalog>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        .route("/query-schemes", post(handle_query_schemes))
        .route("/schemes", get(handle_list_schemes))
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { catalog })
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"validation_error"`).
    code: String,
    /// Human-readable error message.
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<FieldIssue>,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
    details: Vec<FieldIssue>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            code: "validation_error".to_string(),
            message: err.to_string(),
            details: err.issues().to_vec(),
        }
    }
}

// ============ GET / ============

#[derive(Serialize)]
struct RootResponse {
    status: &'static str,
}

/// Handler for `GET /`.
async fn handle_root() -> Json<RootResponse> {
    info!("Root endpoint was accessed.");
    Json(RootResponse {
        status: ROOT_STATUS,
    })
}

// ============ POST /query-schemes ============

/// Handler for `POST /query-schemes`.
///
/// The body is validated by hand rather than through `Json<T>` so that a
/// missing field and a mistyped field produce distinct details. The body
/// size is unbounded; query text has no length limit.
async fn handle_query_schemes(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Vec<SchemeRecord>>, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap_or("<non-ascii>"));
    let request = check_content_type(content_type)
        .and_then(|_| parse_query_request(&body))
        .map_err(|e| {
            tracing::debug!("Rejected query body: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(match_schemes(&state.catalog, &request)))
}

// ============ GET /schemes ============

#[derive(Serialize)]
struct SchemeListResponse<'a> {
    schemes: &'a [CatalogEntry],
}

/// Handler for `GET /schemes`.
async fn handle_list_schemes(State(state): State<AppState>) -> Response {
    Json(SchemeListResponse {
        schemes: state.catalog.entries(),
    })
    .into_response()
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    /// The crate version from `Cargo.toml`.
    version: String,
    /// Number of schemes in the catalog.
    schemes: usize,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        schemes: state.catalog.len(),
    })
}
