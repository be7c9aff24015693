use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use pitch_core::{Booking, BookingFilter};

use crate::error::{parse_payload, AppError};
use crate::state::AppState;
use crate::ApiResponse;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListBookingsQuery {
    pub pitch_id: Option<String>,
    pub date: Option<String>,
}

impl ListBookingsQuery {
    /// Repeated parameters keep their first value; unknown ones are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "pitchId" if query.pitch_id.is_none() => query.pitch_id = Some(value),
                "date" if query.date.is_none() => query.date = Some(value),
                _ => {}
            }
        }
        query
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/{id}", get(get_booking))
        .route("/api/bookings/{id}/status", patch(update_booking_status))
}

/// GET /api/bookings?pitchId=&date=
async fn list_bookings(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Booking>>>, AppError> {
    let Query(pairs) = query?;
    let query = ListBookingsQuery::from_pairs(pairs);
    let filter = BookingFilter::new(query.pitch_id, query.date);
    let bookings = state.service.list_bookings(&filter).await?;
    Ok(Json(ApiResponse::new(bookings)))
}

/// POST /api/bookings
async fn create_booking(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Booking>>), AppError> {
    let payload = parse_payload(body)?;
    let booking = state.service.create_booking(&payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(booking))))
}

/// GET /api/bookings/{id}
async fn get_booking(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let Path(id) = path?;
    let booking = state.service.get_booking(&id).await?;
    Ok(Json(ApiResponse::new(booking)))
}

/// PATCH /api/bookings/{id}/status
async fn update_booking_status(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let Path(id) = path?;
    // An unknown booking wins over a bad body.
    let payload = match parse_payload(body) {
        Ok(payload) => payload,
        Err(err) => {
            state.service.get_booking(&id).await?;
            return Err(err);
        }
    };
    let booking = state.service.update_booking_status(&id, &payload).await?;
    Ok(Json(ApiResponse::new(booking)))
}
