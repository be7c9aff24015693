use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::conflict::find_conflict;
use crate::models::{Booking, BookingFilter, Pitch};
use crate::repository::{BookingRepository, PitchRepository};
use crate::status::apply_status;
use crate::validation::{validate_booking, validate_pitch, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("validation failed: {0:?}")]
    Validation(Vec<ValidationError>),
    #[error("booking not found: {0}")]
    BookingNotFound(String),
    #[error("slot {slot} on {date} is already booked for pitch {pitch_id}")]
    SlotTaken {
        pitch_id: String,
        date: String,
        slot: String,
    },
    #[error("invalid booking status: {0}")]
    InvalidStatus(String),
    #[error("storage failure: {0}")]
    Storage(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Pitch and booking operations over injected repositories.
///
/// Every mutation loads what it needs, checks it and writes it back while
/// holding `write_lock`, so two requests in this process cannot both pass
/// the conflict check for the same slot. Nothing guards against a second
/// process writing to the same store.
pub struct BookingService {
    pitches: Arc<dyn PitchRepository>,
    bookings: Arc<dyn BookingRepository>,
    write_lock: Mutex<()>,
}

impl BookingService {
    pub fn new(pitches: Arc<dyn PitchRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self {
            pitches,
            bookings,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list_pitches(&self) -> ServiceResult<Vec<Pitch>> {
        Ok(self.pitches.list_pitches().await?)
    }

    pub async fn create_pitch(&self, payload: &Value) -> ServiceResult<Pitch> {
        let data = validate_pitch(payload)
            .into_result()
            .map_err(ServiceError::Validation)?;

        let pitch = Pitch::new(data);

        let _guard = self.write_lock.lock().await;
        self.pitches.put_pitch(&pitch).await?;

        info!("Pitch created: {} ({})", pitch.id, pitch.name);
        Ok(pitch)
    }

    pub async fn list_bookings(&self, filter: &BookingFilter) -> ServiceResult<Vec<Booking>> {
        Ok(self.bookings.list_bookings(filter).await?)
    }

    pub async fn get_booking(&self, id: &str) -> ServiceResult<Booking> {
        self.bookings
            .get_booking(id)
            .await?
            .ok_or_else(|| ServiceError::BookingNotFound(id.to_string()))
    }

    pub async fn create_booking(&self, payload: &Value) -> ServiceResult<Booking> {
        let pitch = match payload.get("pitchId").and_then(Value::as_str) {
            Some(id) => self.pitches.get_pitch(id).await?,
            None => None,
        };

        let data = validate_booking(payload, pitch.as_ref())
            .into_result()
            .map_err(ServiceError::Validation)?;
        // Validation fails when the pitch is missing.
        let Some(pitch) = pitch else {
            return Err(ServiceError::Validation(vec![ValidationError::PitchNotFound]));
        };

        let _guard = self.write_lock.lock().await;

        let same_day = self
            .bookings
            .list_bookings(&BookingFilter::new(Some(pitch.id.clone()), Some(data.date.clone())))
            .await?;
        if let Some(existing) = find_conflict(&same_day, &pitch.id, &data.date, &data.slot) {
            warn!(
                "Slot {} on {} for pitch {} already held by booking {}",
                data.slot, data.date, pitch.id, existing.id
            );
            return Err(ServiceError::SlotTaken {
                pitch_id: pitch.id,
                date: data.date,
                slot: data.slot,
            });
        }

        let booking = Booking::new(pitch.id, data);
        self.bookings.put_booking(&booking).await?;

        info!("Booking created: {} for pitch {}", booking.id, booking.pitch_id);
        Ok(booking)
    }

    /// Looks the booking up before reading `payload`, so an unknown id is
    /// reported even when the requested status is also invalid.
    pub async fn update_booking_status(&self, id: &str, payload: &Value) -> ServiceResult<Booking> {
        let _guard = self.write_lock.lock().await;

        let mut booking = self.get_booking(id).await?;

        let requested = payload.get("status").and_then(Value::as_str).unwrap_or_default();
        if let Err(err) = apply_status(&mut booking, requested, Utc::now()) {
            warn!("Rejected status change for booking {}: {}", id, err);
            return Err(ServiceError::InvalidStatus(err.0));
        }

        self.bookings.put_booking(&booking).await?;

        info!("Booking {} moved to {}", booking.id, booking.status);
        Ok(booking)
    }
}
