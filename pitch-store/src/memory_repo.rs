use async_trait::async_trait;
use pitch_core::repository::{BookingRepository, PitchRepository, RepoResult};
use pitch_core::{Booking, BookingFilter, Pitch};
use tokio::sync::RwLock;

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pitches: RwLock<Vec<Pitch>>,
    bookings: RwLock<Vec<Booking>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(pitches: Vec<Pitch>, bookings: Vec<Booking>) -> Self {
        Self {
            pitches: RwLock::new(pitches),
            bookings: RwLock::new(bookings),
        }
    }
}

#[async_trait]
impl PitchRepository for InMemoryStore {
    async fn list_pitches(&self) -> RepoResult<Vec<Pitch>> {
        Ok(self.pitches.read().await.clone())
    }

    async fn get_pitch(&self, id: &str) -> RepoResult<Option<Pitch>> {
        Ok(self.pitches.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn put_pitch(&self, pitch: &Pitch) -> RepoResult<()> {
        let mut pitches = self.pitches.write().await;
        match pitches.iter_mut().find(|p| p.id == pitch.id) {
            Some(existing) => *existing = pitch.clone(),
            None => pitches.push(pitch.clone()),
        }
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn list_bookings(&self, filter: &BookingFilter) -> RepoResult<Vec<Booking>> {
        Ok(self
            .bookings
            .read()
            .await
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect())
    }

    async fn get_booking(&self, id: &str) -> RepoResult<Option<Booking>> {
        Ok(self.bookings.read().await.iter().find(|b| b.id == id).cloned())
    }

    async fn put_booking(&self, booking: &Booking) -> RepoResult<()> {
        let mut bookings = self.bookings.write().await;
        match bookings.iter_mut().find(|b| b.id == booking.id) {
            Some(existing) => *existing = booking.clone(),
            None => bookings.push(booking.clone()),
        }
        Ok(())
    }
}
