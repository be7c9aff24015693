use async_trait::async_trait;

use crate::models::{Booking, BookingFilter, Pitch};

pub type RepoResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Repository trait for pitch data access
#[async_trait]
pub trait PitchRepository: Send + Sync {
    /// All pitches, in insertion order
    async fn list_pitches(&self) -> RepoResult<Vec<Pitch>>;

    async fn get_pitch(&self, id: &str) -> RepoResult<Option<Pitch>>;

    async fn put_pitch(&self, pitch: &Pitch) -> RepoResult<()>;
}

/// Repository trait for booking data access
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Matching bookings, in insertion order
    async fn list_bookings(&self, filter: &BookingFilter) -> RepoResult<Vec<Booking>>;

    async fn get_booking(&self, id: &str) -> RepoResult<Option<Booking>>;

    /// Inserts `booking`, or replaces the stored booking with the same id
    /// in place.
    async fn put_booking(&self, booking: &Booking) -> RepoResult<()>;
}
