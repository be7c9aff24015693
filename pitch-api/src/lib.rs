use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{header, Method, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod bookings;
pub mod error;
pub mod pitches;
pub mod state;

pub use error::AppError;
pub use state::AppState;

/// Success envelope: `{ "data": ... }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .merge(pitches::routes())
        .merge(bookings::routes())
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(cors)
        .layer(middleware::from_fn(options_no_content))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "data": { "status": "ok" } }))
}

async fn route_not_found() -> Response {
    AppError::RouteNotFound.into_response()
}

/// `CorsLayer` answers every `OPTIONS` request itself with an empty 200;
/// report those as 204 No Content.
async fn options_no_content(req: Request<Body>, next: Next) -> Response {
    let is_options = req.method() == Method::OPTIONS;
    let mut response = next.run(req).await;
    if is_options && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
