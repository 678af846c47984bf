//! JSON HTTP API for the contact book.
//!
//! Thin plumbing over the [`ContactStore`] abstraction: handlers decode the
//! request, call one store operation (or the birthday evaluator), and
//! encode the result. No business rules live here.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/contacts/` | Create a contact (201, full record) |
//! | `GET` | `/contacts/` | List contacts (`skip`/`limit`, defaults 0/100) |
//! | `GET` | `/contacts/{id}` | Fetch one contact |
//! | `PUT` | `/contacts/{id}` | Partial update (omitted fields unchanged) |
//! | `DELETE` | `/contacts/{id}` | Delete, returns a confirmation message |
//! | `GET` | `/contacts/search/?query=…` | Substring search over names/email |
//! | `GET` | `/contacts/upcoming-birthdays/` | Birthdays in the next 7 days |
//! | `GET` | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! All error responses share one JSON envelope:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "contact 7 not found" } }
//! ```
//!
//! Codes: `validation_error` (422), `duplicate_email` (409), `not_found`
//! (404), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted to support browser-based
//! clients.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::birthdays::{self, DEFAULT_WINDOW_DAYS};
use crate::config::Config;
use crate::error::StoreError;
use crate::models::{Contact, ContactPatch, NewContact};
use crate::store::ContactStore;

/// Shared application state passed to all route handlers via Axum's
/// `State` extractor.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ContactStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }
}

/// Build the contact-book router over any [`ContactStore`].
///
/// Separated from [`run_server`] so tests can drive the router in-process
/// without binding a socket.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/contacts/", post(handle_create).get(handle_list))
        .route("/contacts/search/", get(handle_search))
        .route("/contacts/upcoming-birthdays/", get(handle_upcoming))
        .route(
            "/contacts/{id}",
            get(handle_get).put(handle_update).delete(handle_delete),
        )
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured bind address.
///
/// Runs until the process is terminated.
pub async fn run_server(config: &Config, store: Arc<dyn ContactStore>) -> anyhow::Result<()> {
    let app = router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!("contact API listening on http://{}", config.server.bind);

    axum::serve(listener, app).await?;
    Ok(())
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g. `"not_found"`, `"duplicate_email"`).
    code: String,
    /// Human-readable error message.
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let (status, code) = match &err {
            StoreError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            StoreError::DuplicateEmail(_) => (StatusCode::CONFLICT, "duplicate_email"),
            StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            StoreError::Backend(_) => {
                tracing::error!("storage failure: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        };
        AppError {
            status,
            code: code.to_string(),
            message: err.to_string(),
        }
    }
}

// ============ POST /contacts/ ============

async fn handle_create(
    State(state): State<AppState>,
    Json(new): Json<NewContact>,
) -> Result<(StatusCode, Json<Contact>), AppError> {
    let contact = state.store.create(&new).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

// ============ GET /contacts/ ============

/// Query parameters for `GET /contacts/`.
#[derive(Deserialize)]
struct ListParams {
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
}

fn default_limit() -> i64 {
    100
}

async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let contacts = state.store.list(params.skip, params.limit).await?;
    Ok(Json(contacts))
}

// ============ GET /contacts/{id} ============

async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Contact>, AppError> {
    let contact = state.store.get(id).await?;
    Ok(Json(contact))
}

// ============ PUT /contacts/{id} ============

async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ContactPatch>,
) -> Result<Json<Contact>, AppError> {
    let contact = state.store.update(id, &patch).await?;
    Ok(Json(contact))
}

// ============ DELETE /contacts/{id} ============

/// Confirmation body for a successful delete.
#[derive(Serialize)]
struct DeleteResponse {
    detail: String,
}

async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.store.delete(id).await?;
    Ok(Json(DeleteResponse {
        detail: format!("contact {} deleted", id),
    }))
}

// ============ GET /contacts/search/ ============

/// Query parameters for `GET /contacts/search/`. `query` is required;
/// requests without it are rejected before reaching the handler.
#[derive(Deserialize)]
struct SearchParams {
    query: String,
}

async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let contacts = state.store.search(&params.query).await?;
    Ok(Json(contacts))
}

// ============ GET /contacts/upcoming-birthdays/ ============

async fn handle_upcoming(
    State(state): State<AppState>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let contacts = state.store.list(0, i64::MAX).await?;
    let today = Local::now().date_naive();
    Ok(Json(birthdays::upcoming_birthdays(
        today,
        &contacts,
        DEFAULT_WINDOW_DAYS,
    )))
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
