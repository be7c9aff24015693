use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pitch_core::repository::{BookingRepository, PitchRepository, RepoResult};
use pitch_core::{Booking, BookingFilter, Pitch};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, info};

use crate::error::StoreError;

const PITCHES_FILE: &str = "pitches.json";
const BOOKINGS_FILE: &str = "bookings.json";

/// Flat-file store keeping each collection as one pretty-printed JSON array.
///
/// Every read loads the whole file and every write rewrites it. Writers are
/// expected to be serialized by the caller; two processes sharing a data
/// directory will overwrite each other.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    pitches_path: PathBuf,
    bookings_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            pitches_path: data_dir.join(PITCHES_FILE),
            bookings_path: data_dir.join(BOOKINGS_FILE),
        }
    }

    async fn ensure_exists(path: &Path) -> Result<(), StoreError> {
        if fs::try_exists(path).await.map_err(StoreError::io(path))? {
            return Ok(());
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await.map_err(StoreError::io(dir))?;
        }
        fs::write(path, b"[]").await.map_err(StoreError::io(path))?;
        info!("Created empty collection at {}", path.display());
        Ok(())
    }

    async fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
        Self::ensure_exists(path).await?;
        let raw = fs::read(path).await.map_err(StoreError::io(path))?;
        serde_json::from_slice(&raw).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replaces the file via a sibling temp file so a crash mid-write
    /// leaves the previous contents intact.
    async fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await.map_err(StoreError::io(dir))?;
        }
        let body = serde_json::to_vec_pretty(items)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, body).await.map_err(StoreError::io(&tmp))?;
        fs::rename(&tmp, path).await.map_err(StoreError::io(path))?;
        debug!("Wrote {} records to {}", items.len(), path.display());
        Ok(())
    }
}

#[async_trait]
impl PitchRepository for JsonFileStore {
    async fn list_pitches(&self) -> RepoResult<Vec<Pitch>> {
        Ok(Self::read_collection(&self.pitches_path).await?)
    }

    async fn get_pitch(&self, id: &str) -> RepoResult<Option<Pitch>> {
        let pitches: Vec<Pitch> = Self::read_collection(&self.pitches_path).await?;
        Ok(pitches.into_iter().find(|p| p.id == id))
    }

    async fn put_pitch(&self, pitch: &Pitch) -> RepoResult<()> {
        let mut pitches: Vec<Pitch> = Self::read_collection(&self.pitches_path).await?;
        match pitches.iter_mut().find(|p| p.id == pitch.id) {
            Some(existing) => *existing = pitch.clone(),
            None => pitches.push(pitch.clone()),
        }
        Self::write_collection(&self.pitches_path, &pitches).await?;
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for JsonFileStore {
    async fn list_bookings(&self, filter: &BookingFilter) -> RepoResult<Vec<Booking>> {
        let bookings: Vec<Booking> = Self::read_collection(&self.bookings_path).await?;
        Ok(bookings.into_iter().filter(|b| filter.matches(b)).collect())
    }

    async fn get_booking(&self, id: &str) -> RepoResult<Option<Booking>> {
        let bookings: Vec<Booking> = Self::read_collection(&self.bookings_path).await?;
        Ok(bookings.into_iter().find(|b| b.id == id))
    }

    async fn put_booking(&self, booking: &Booking) -> RepoResult<()> {
        let mut bookings: Vec<Booking> = Self::read_collection(&self.bookings_path).await?;
        match bookings.iter_mut().find(|b| b.id == booking.id) {
            Some(existing) => *existing = booking.clone(),
            None => bookings.push(booking.clone()),
        }
        Self::write_collection(&self.bookings_path, &bookings).await?;
        Ok(())
    }
}
