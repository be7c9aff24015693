use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::models::{NewBooking, NewPitch, Pitch, DEFAULT_SURFACE_TYPE};

static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern"));

/// Field-level problems reported back to the client.
///
/// The `Display` text is user facing; [`ValidationError::code`] is the
/// stable identifier clients should branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is required.")]
    NameRequired,
    #[error("Location is required.")]
    LocationRequired,
    #[error("Price per hour must be a number greater than zero.")]
    InvalidPrice,
    #[error("At least one available slot is required.")]
    SlotsRequired,
    #[error("Pitch not found.")]
    PitchNotFound,
    #[error("Customer name is required.")]
    CustomerNameRequired,
    #[error("Customer phone is required.")]
    CustomerPhoneRequired,
    #[error("Date must use the YYYY-MM-DD format.")]
    InvalidDate,
    #[error("A slot must be selected.")]
    SlotRequired,
    #[error("The selected slot is not available for this pitch.")]
    SlotUnavailable,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::NameRequired => "name_required",
            ValidationError::LocationRequired => "location_required",
            ValidationError::InvalidPrice => "invalid_price",
            ValidationError::SlotsRequired => "slots_required",
            ValidationError::PitchNotFound => "pitch_not_found",
            ValidationError::CustomerNameRequired => "customer_name_required",
            ValidationError::CustomerPhoneRequired => "customer_phone_required",
            ValidationError::InvalidDate => "invalid_date",
            ValidationError::SlotRequired => "slot_required",
            ValidationError::SlotUnavailable => "slot_unavailable",
        }
    }
}

/// Outcome of validating an untyped payload. All problems are collected
/// rather than stopping at the first one.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation<T> {
    Valid(T),
    Invalid(Vec<ValidationError>),
}

impl<T> Validation<T> {
    fn from_parts(errors: Vec<ValidationError>, data: impl FnOnce() -> T) -> Self {
        if errors.is_empty() {
            Validation::Valid(data())
        } else {
            Validation::Invalid(errors)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Validation::Valid(_) => &[],
            Validation::Invalid(errors) => errors,
        }
    }

    pub fn into_result(self) -> Result<T, Vec<ValidationError>> {
        match self {
            Validation::Valid(data) => Ok(data),
            Validation::Invalid(errors) => Err(errors),
        }
    }
}

pub fn validate_pitch(payload: &Value) -> Validation<NewPitch> {
    let mut errors = Vec::new();

    let name = non_blank(payload.get("name"));
    if name.is_none() {
        errors.push(ValidationError::NameRequired);
    }

    let location = non_blank(payload.get("location"));
    if location.is_none() {
        errors.push(ValidationError::LocationRequired);
    }

    let price = coerce_number(payload.get("pricePerHour")).filter(|p| p.is_finite() && *p > 0.0);
    if price.is_none() {
        errors.push(ValidationError::InvalidPrice);
    }

    let surface_type = non_blank(payload.get("surfaceType"))
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| DEFAULT_SURFACE_TYPE.to_string());

    let mut amenities: Vec<String> = Vec::new();
    for amenity in text_entries(payload.get("amenities")) {
        let amenity = amenity.trim();
        if !amenities.iter().any(|a| a == amenity) {
            amenities.push(amenity.to_string());
        }
    }

    // Slot labels are matched verbatim when booking, so they are not trimmed.
    let slots: Vec<String> = text_entries(payload.get("slots")).map(str::to_string).collect();
    if slots.is_empty() {
        errors.push(ValidationError::SlotsRequired);
    }

    Validation::from_parts(errors, || NewPitch {
        name: name.unwrap_or_default().trim().to_string(),
        location: location.unwrap_or_default().trim().to_string(),
        price_per_hour: price.unwrap_or_default(),
        surface_type,
        amenities,
        slots,
    })
}

/// `pitch` is the pitch the caller resolved from the payload's `pitchId`.
pub fn validate_booking(payload: &Value, pitch: Option<&Pitch>) -> Validation<NewBooking> {
    let mut errors = Vec::new();

    if pitch.is_none() {
        errors.push(ValidationError::PitchNotFound);
    }

    let customer_name = non_blank(payload.get("customerName"));
    if customer_name.is_none() {
        errors.push(ValidationError::CustomerNameRequired);
    }

    let customer_phone = non_blank(payload.get("customerPhone"));
    if customer_phone.is_none() {
        errors.push(ValidationError::CustomerPhoneRequired);
    }

    // Pattern only; "2024-02-31" is accepted.
    let date = payload
        .get("date")
        .and_then(Value::as_str)
        .filter(|d| ISO_DATE.is_match(d));
    if date.is_none() {
        errors.push(ValidationError::InvalidDate);
    }

    let slot = non_blank(payload.get("slot"));
    match (slot, pitch) {
        (None, _) => errors.push(ValidationError::SlotRequired),
        (Some(slot), Some(pitch)) if !pitch.offers_slot(slot) => {
            errors.push(ValidationError::SlotUnavailable)
        }
        _ => {}
    }

    Validation::from_parts(errors, || NewBooking {
        customer_name: customer_name.unwrap_or_default().trim().to_string(),
        customer_phone: customer_phone.unwrap_or_default().trim().to_string(),
        date: date.unwrap_or_default().to_string(),
        slot: slot.unwrap_or_default().to_string(),
    })
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn text_entries(value: Option<&Value>) -> impl Iterator<Item = &str> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|v| non_blank(Some(v)))
}

/// Loose numeric coercion for form-style clients that send prices as text.
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pitch_with_slots(slots: &[&str]) -> Pitch {
        Pitch::new(NewPitch {
            name: "Downtown Arena".to_string(),
            location: "Cairo".to_string(),
            price_per_hour: 250.0,
            surface_type: DEFAULT_SURFACE_TYPE.to_string(),
            amenities: vec![],
            slots: slots.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn booking_payload(date: &str, slot: &str) -> Value {
        json!({
            "customerName": "  Omar  ",
            "customerPhone": " 0100 ",
            "date": date,
            "slot": slot,
        })
    }

    #[test]
    fn test_empty_pitch_reports_every_field_in_order() {
        let result = validate_pitch(&json!({}));
        assert_eq!(
            result.errors(),
            &[
                ValidationError::NameRequired,
                ValidationError::LocationRequired,
                ValidationError::InvalidPrice,
                ValidationError::SlotsRequired,
            ]
        );
    }

    #[test]
    fn test_non_object_payload_is_treated_as_empty() {
        assert_eq!(validate_pitch(&json!("nope")).errors().len(), 4);
        assert_eq!(validate_booking(&Value::Null, None).errors().len(), 5);
    }

    #[test]
    fn test_only_failing_fields_are_reported() {
        let result = validate_pitch(&json!({
            "name": "   ",
            "location": "Giza",
            "pricePerHour": 100,
            "slots": ["09:00-10:00"],
        }));
        assert_eq!(result.errors(), &[ValidationError::NameRequired]);
    }

    #[test]
    fn test_valid_pitch_is_normalized() {
        let result = validate_pitch(&json!({
            "name": "  Downtown Arena ",
            "location": " Cairo ",
            "pricePerHour": "150",
            "amenities": ["Showers", "", 7, " Parking ", "Showers"],
            "slots": ["09:00-10:00", "  ", null, "10:00-11:00"],
        }));

        let data = result.into_result().unwrap();
        assert_eq!(data.name, "Downtown Arena");
        assert_eq!(data.location, "Cairo");
        assert_eq!(data.price_per_hour, 150.0);
        assert_eq!(data.surface_type, DEFAULT_SURFACE_TYPE);
        assert_eq!(data.amenities, vec!["Showers", "Parking"]);
        assert_eq!(data.slots, vec!["09:00-10:00", "10:00-11:00"]);
    }

    #[test]
    fn test_surface_type_defaults_only_when_missing_or_blank() {
        let base = |surface: Value| {
            json!({
                "name": "A", "location": "B", "pricePerHour": 1,
                "slots": ["x"], "surfaceType": surface,
            })
        };

        let given = validate_pitch(&base(json!("Natural Grass"))).into_result().unwrap();
        assert_eq!(given.surface_type, "Natural Grass");

        let blank = validate_pitch(&base(json!("  "))).into_result().unwrap();
        assert_eq!(blank.surface_type, DEFAULT_SURFACE_TYPE);

        let missing = validate_pitch(&base(Value::Null)).into_result().unwrap();
        assert_eq!(missing.surface_type, DEFAULT_SURFACE_TYPE);
    }

    #[test]
    fn test_price_coercion() {
        for bad in [json!(0), json!(-5), json!("abc"), json!(""), Value::Null, json!([10]), json!(false)] {
            let result = validate_pitch(&json!({ "pricePerHour": bad.clone() }));
            assert!(
                result.errors().contains(&ValidationError::InvalidPrice),
                "expected {bad} to be rejected"
            );
        }
        for good in [json!(0.5), json!(" 99.9 "), json!(true)] {
            let result = validate_pitch(&json!({ "pricePerHour": good.clone() }));
            assert!(
                !result.errors().contains(&ValidationError::InvalidPrice),
                "expected {good} to be accepted"
            );
        }
    }

    #[test]
    fn test_non_array_slots_are_rejected() {
        let result = validate_pitch(&json!({
            "name": "A", "location": "B", "pricePerHour": 1, "slots": "09:00-10:00",
        }));
        assert_eq!(result.errors(), &[ValidationError::SlotsRequired]);
    }

    #[test]
    fn test_booking_without_pitch_folds_into_errors() {
        let result = validate_booking(&booking_payload("2024-06-01", "09:00-10:00"), None);
        assert_eq!(result.errors(), &[ValidationError::PitchNotFound]);
    }

    #[test]
    fn test_booking_date_is_pattern_checked_only() {
        let pitch = pitch_with_slots(&["09:00-10:00"]);

        for bad in ["2024-6-01", "01-06-2024", "2024/06/01", "", "2024-06-01T10:00"] {
            let result = validate_booking(&booking_payload(bad, "09:00-10:00"), Some(&pitch));
            assert_eq!(result.errors(), &[ValidationError::InvalidDate], "date {bad:?}");
        }

        let result = validate_booking(&booking_payload("2024-13-99", "09:00-10:00"), Some(&pitch));
        assert!(result.is_valid());
    }

    #[test]
    fn test_booking_slot_must_be_offered_by_pitch() {
        let pitch = pitch_with_slots(&["09:00-10:00", "10:00-11:00"]);

        let result = validate_booking(&booking_payload("2024-06-01", "11:00-12:00"), Some(&pitch));
        assert_eq!(result.errors(), &[ValidationError::SlotUnavailable]);

        let result = validate_booking(&booking_payload("2024-06-01", " "), Some(&pitch));
        assert_eq!(result.errors(), &[ValidationError::SlotRequired]);
    }

    #[test]
    fn test_valid_booking_is_normalized() {
        let pitch = pitch_with_slots(&["09:00-10:00"]);
        let data = validate_booking(&booking_payload("2024-06-01", "09:00-10:00"), Some(&pitch))
            .into_result()
            .unwrap();

        assert_eq!(data.customer_name, "Omar");
        assert_eq!(data.customer_phone, "0100");
        assert_eq!(data.date, "2024-06-01");
        assert_eq!(data.slot, "09:00-10:00");
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ValidationError::SlotUnavailable.code(), "slot_unavailable");
        assert_eq!(ValidationError::InvalidPrice.to_string(), "Price per hour must be a number greater than zero.");
    }
}
