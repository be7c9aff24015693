use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use pitch_core::Pitch;

use crate::error::{parse_payload, AppError};
use crate::state::AppState;
use crate::ApiResponse;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/pitches", get(list_pitches).post(create_pitch))
}

/// GET /api/pitches
async fn list_pitches(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Pitch>>>, AppError> {
    let pitches = state.service.list_pitches().await?;
    Ok(Json(ApiResponse::new(pitches)))
}

/// POST /api/pitches
async fn create_pitch(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Pitch>>), AppError> {
    let payload = parse_payload(body)?;
    let pitch = state.service.create_pitch(&payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(pitch))))
}
