use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

pub const DEFAULT_SURFACE_TYPE: &str = "Artificial Turf";

/// Booking status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown booking status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A bookable sports field with a fixed menu of time slots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pitch {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(serialize_with = "serialize_price")]
    pub price_per_hour: f64,
    pub surface_type: String,
    pub amenities: Vec<String>,
    pub slots: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Pitch {
    pub fn new(data: NewPitch) -> Self {
        Self {
            id: new_id("pitch"),
            name: data.name,
            location: data.location,
            price_per_hour: data.price_per_hour,
            surface_type: data.surface_type,
            amenities: data.amenities,
            slots: data.slots,
            created_at: Utc::now(),
        }
    }

    pub fn offers_slot(&self, slot: &str) -> bool {
        self.slots.iter().any(|s| s == slot)
    }
}

/// Normalized pitch fields produced by the validator
#[derive(Debug, Clone, PartialEq)]
pub struct NewPitch {
    pub name: String,
    pub location: String,
    pub price_per_hour: f64,
    pub surface_type: String,
    pub amenities: Vec<String>,
    pub slots: Vec<String>,
}

/// A reservation of one pitch slot on one date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub pitch_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub date: String,
    pub slot: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_updated_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// New bookings always start out pending.
    pub fn new(pitch_id: String, data: NewBooking) -> Self {
        Self {
            id: new_id("booking"),
            pitch_id,
            customer_name: data.customer_name,
            customer_phone: data.customer_phone,
            date: data.date,
            slot: data.slot,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
            status_updated_at: None,
        }
    }

    /// Cancelled bookings release their slot
    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    pub fn occupies(&self, pitch_id: &str, date: &str, slot: &str) -> bool {
        self.pitch_id == pitch_id && self.date == date && self.slot == slot
    }
}

/// Normalized booking fields produced by the validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub customer_name: String,
    pub customer_phone: String,
    pub date: String,
    pub slot: String,
}

/// Optional exact-match constraints for listing bookings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub pitch_id: Option<String>,
    pub date: Option<String>,
}

impl BookingFilter {
    /// Empty values place no constraint, same as an absent one.
    pub fn new(pitch_id: Option<String>, date: Option<String>) -> Self {
        Self {
            pitch_id: pitch_id.filter(|v| !v.is_empty()),
            date: date.filter(|v| !v.is_empty()),
        }
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(pitch_id) = &self.pitch_id {
            if &booking.pitch_id != pitch_id {
                return false;
            }
        }
        if let Some(date) = &self.date {
            if &booking.date != date {
                return false;
            }
        }
        true
    }
}

/// Whole prices are written as integers (`200`, not `200.0`).
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // Beyond 2^53 an f64 no longer holds every integer exactly.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if price.fract() == 0.0 && price.abs() <= MAX_EXACT {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(pitch_id: &str, date: &str) -> Booking {
        Booking::new(
            pitch_id.to_string(),
            NewBooking {
                customer_name: "Sara".to_string(),
                customer_phone: "0100".to_string(),
                date: date.to_string(),
                slot: "09:00-10:00".to_string(),
            },
        )
    }

    #[test]
    fn test_status_parsing_is_exact() {
        assert_eq!("pending".parse::<BookingStatus>(), Ok(BookingStatus::Pending));
        assert_eq!("cancelled".parse::<BookingStatus>(), Ok(BookingStatus::Cancelled));
        assert!("Confirmed".parse::<BookingStatus>().is_err());
        assert!("archived".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_booking_wire_format() {
        let b = booking("pitch-1", "2024-06-01");
        assert!(b.id.starts_with("booking-"));

        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["pitchId"], "pitch-1");
        assert_eq!(json["status"], "pending");
        assert!(json.get("statusUpdatedAt").is_none());

        let back: Booking = serde_json::from_value(json).unwrap();
        assert_eq!(back, b);
    }

    #[test]
    fn test_whole_prices_serialize_as_integers() {
        let mut pitch = Pitch::new(NewPitch {
            name: "Arena".to_string(),
            location: "Cairo".to_string(),
            price_per_hour: 200.0,
            surface_type: DEFAULT_SURFACE_TYPE.to_string(),
            amenities: vec![],
            slots: vec!["09:00-10:00".to_string()],
        });

        let raw = serde_json::to_string(&pitch).unwrap();
        assert!(raw.contains("\"pricePerHour\":200,"), "{raw}");
        let back: Pitch = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.price_per_hour, 200.0);

        pitch.price_per_hour = 99.5;
        let raw = serde_json::to_string(&pitch).unwrap();
        assert!(raw.contains("\"pricePerHour\":99.5,"), "{raw}");
    }

    #[test]
    fn test_filter_treats_empty_as_absent() {
        let b = booking("pitch-1", "2024-06-01");

        assert!(BookingFilter::new(Some(String::new()), Some(String::new())).matches(&b));
        assert!(BookingFilter::new(Some("pitch-1".into()), None).matches(&b));
        assert!(!BookingFilter::new(Some("pitch-2".into()), None).matches(&b));
        assert!(!BookingFilter::new(Some("pitch-1".into()), Some("2024-06-02".into())).matches(&b));
    }
}
