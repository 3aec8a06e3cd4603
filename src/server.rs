//! JSON HTTP server over the price catalog.
//!
//! Exposes the same operations as the CLI so shopping-list scripts and
//! browser frontends can query and update the sheet remotely.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/items` | List items with price counts and tags |
//! | `POST` | `/items` | Add an item row |
//! | `GET`  | `/tags` | List every tag in the catalog |
//! | `GET`  | `/branches` | List branch columns |
//! | `POST` | `/branches` | Add a branch column |
//! | `GET`  | `/search` | Rank observations (`?item=`, `?tags=a,b`) |
//! | `POST` | `/prices` | Set or clear one price cell |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! All error responses share one schema:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "no item named \"Milk\"" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `conflict` (409),
//! `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted to support
//! browser-based clients.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use price_tally_core::error::TallyError;
use price_tally_core::models::NewItem;
use price_tally_core::search;
use price_tally_core::tracker::Tracker;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

/// Shared application state passed to all route handlers via Axum's
/// `State` extractor.
#[derive(Clone)]
struct AppState {
    tracker: Arc<Tracker<SqliteStore>>,
}

/// Starts the HTTP server.
///
/// Binds to the address configured in `[server].bind` and registers all
/// route handlers. The server runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();

    let pool = db::connect(config).await?;
    let state = AppState {
        tracker: Arc::new(Tracker::new(SqliteStore::new(pool))),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/items", get(handle_list_items).post(handle_add_item))
        .route("/tags", get(handle_list_tags))
        .route("/branches", get(handle_list_branches).post(handle_add_branch))
        .route("/search", get(handle_search))
        .route("/prices", post(handle_set_price))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    println!("Price Tally server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Inner error detail with a machine-readable code and human-readable
/// message.
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
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

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

/// Constructs a 404 Not Found error.
fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

/// Constructs a 409 Conflict error.
fn conflict(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::CONFLICT,
        code: "conflict".to_string(),
        message: message.into(),
    }
}

/// Constructs a 500 Internal Server Error.
fn internal_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

/// Maps catalog and sheet errors to the most appropriate HTTP status.
/// Validation failures are the client's fault; a sheet that no longer
/// parses is ours.
fn classify_error(err: anyhow::Error) -> AppError {
    match err.downcast_ref::<TallyError>() {
        Some(TallyError::ItemNotFound(_)) | Some(TallyError::BranchNotFound(_)) => {
            not_found(err.to_string())
        }
        Some(TallyError::DuplicateBranch(_)) => conflict(err.to_string()),
        Some(TallyError::InvalidRecord { .. }) | Some(TallyError::EmptyRequiredField(_)) => {
            bad_request(err.to_string())
        }
        Some(TallyError::MalformedSheet(_)) | None => internal_error(err.to_string()),
    }
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Handler for `GET /health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /items, POST /items ============

/// One item in the `GET /items` response.
#[derive(Serialize)]
struct ItemSummary {
    name: String,
    prices: usize,
    tags: Vec<String>,
}

/// JSON response body for `GET /items`.
#[derive(Serialize)]
struct ItemsResponse {
    items: Vec<ItemSummary>,
}

/// Handler for `GET /items`.
async fn handle_list_items(
    State(state): State<AppState>,
) -> Result<Json<ItemsResponse>, AppError> {
    let catalog = state.tracker.load().await.map_err(classify_error)?;

    let items = catalog
        .items()
        .map(|name| {
            let records = catalog.get(name).unwrap_or(&[]);
            let tags: BTreeSet<&str> = records
                .iter()
                .flat_map(|r| r.tags().iter().map(String::as_str))
                .collect();
            ItemSummary {
                name: name.to_string(),
                prices: records.len(),
                tags: tags.into_iter().map(str::to_string).collect(),
            }
        })
        .collect();

    Ok(Json(ItemsResponse { items }))
}

/// Handler for `POST /items`. Body is a [`NewItem`].
async fn handle_add_item(
    State(state): State<AppState>,
    Json(item): Json<NewItem>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    state.tracker.add_item(&item).await.map_err(classify_error)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "name": item.name.trim() })),
    ))
}

// ============ GET /tags ============

/// JSON response body for `GET /tags`.
#[derive(Serialize)]
struct TagsResponse {
    tags: Vec<String>,
}

/// Handler for `GET /tags`.
async fn handle_list_tags(State(state): State<AppState>) -> Result<Json<TagsResponse>, AppError> {
    let catalog = state.tracker.load().await.map_err(classify_error)?;

    Ok(Json(TagsResponse {
        tags: catalog.all_tags().into_iter().collect(),
    }))
}

// ============ GET /branches, POST /branches ============

/// JSON response body for `GET /branches`.
#[derive(Serialize)]
struct BranchesResponse {
    branches: Vec<String>,
}

/// JSON request body for `POST /branches`.
#[derive(Deserialize)]
struct NewBranch {
    name: String,
}

/// Handler for `GET /branches`.
async fn handle_list_branches(
    State(state): State<AppState>,
) -> Result<Json<BranchesResponse>, AppError> {
    let sheet = state.tracker.load_sheet().await.map_err(classify_error)?;

    Ok(Json(BranchesResponse {
        branches: sheet.branches().to_vec(),
    }))
}

/// Handler for `POST /branches`.
async fn handle_add_branch(
    State(state): State<AppState>,
    Json(branch): Json<NewBranch>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    state
        .tracker
        .add_branch(&branch.name)
        .await
        .map_err(classify_error)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "name": branch.name.trim() })),
    ))
}

// ============ GET /search ============

/// Query parameters for `GET /search`. `tags` is comma-separated.
#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    item: String,
    #[serde(default)]
    tags: String,
}

/// Handler for `GET /search`.
///
/// Returns `{ "cheapest": [...], "others": [...] }` with full records
/// including the derived unit price.
async fn handle_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let catalog = state.tracker.load().await.map_err(classify_error)?;

    let tags: Vec<String> = query
        .tags
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    let ranking = search::search(&catalog, &query.item, &tags);
    let body = serde_json::to_value(&ranking).map_err(|e| internal_error(e.to_string()))?;

    Ok(Json(body))
}

// ============ POST /prices ============

/// JSON request body for `POST /prices`. A `null` (or absent) price
/// clears the cell.
#[derive(Deserialize)]
struct SetPriceRequest {
    item: String,
    branch: String,
    price: Option<f64>,
}

/// Handler for `POST /prices`.
async fn handle_set_price(
    State(state): State<AppState>,
    Json(req): Json<SetPriceRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .tracker
        .set_price(&req.item, &req.branch, req.price)
        .await
        .map_err(classify_error)?;

    Ok(Json(serde_json::json!({
        "item": req.item.trim(),
        "branch": req.branch.trim(),
        "price": req.price,
    })))
}
