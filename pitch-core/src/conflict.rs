use crate::models::Booking;

/// Returns the active booking already holding `slot` on `date` at `pitch_id`.
///
/// Matching is exact string equality on all three fields. Slot labels are
/// opaque, so overlapping windows with different labels never conflict.
pub fn find_conflict<'a>(
    bookings: &'a [Booking],
    pitch_id: &str,
    date: &str,
    slot: &str,
) -> Option<&'a Booking> {
    bookings
        .iter()
        .find(|b| b.is_active() && b.occupies(pitch_id, date, slot))
}

pub fn is_slot_taken(bookings: &[Booking], pitch_id: &str, date: &str, slot: &str) -> bool {
    find_conflict(bookings, pitch_id, date, slot).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, NewBooking};

    fn booking(pitch_id: &str, date: &str, slot: &str, status: BookingStatus) -> Booking {
        let mut b = Booking::new(
            pitch_id.to_string(),
            NewBooking {
                customer_name: "Omar".to_string(),
                customer_phone: "0100".to_string(),
                date: date.to_string(),
                slot: slot.to_string(),
            },
        );
        b.status = status;
        b
    }

    #[test]
    fn test_active_booking_blocks_same_triple() {
        let existing = vec![booking("p1", "2024-06-01", "09:00-10:00", BookingStatus::Pending)];
        let hit = find_conflict(&existing, "p1", "2024-06-01", "09:00-10:00");
        assert_eq!(hit.map(|b| b.id.as_str()), Some(existing[0].id.as_str()));

        let confirmed = vec![booking("p1", "2024-06-01", "09:00-10:00", BookingStatus::Confirmed)];
        assert!(is_slot_taken(&confirmed, "p1", "2024-06-01", "09:00-10:00"));
    }

    #[test]
    fn test_cancelled_booking_frees_slot() {
        let existing = vec![booking("p1", "2024-06-01", "09:00-10:00", BookingStatus::Cancelled)];
        assert!(!is_slot_taken(&existing, "p1", "2024-06-01", "09:00-10:00"));
    }

    #[test]
    fn test_any_differing_field_means_no_conflict() {
        let existing = vec![booking("p1", "2024-06-01", "09:00-10:00", BookingStatus::Pending)];
        assert!(!is_slot_taken(&existing, "p2", "2024-06-01", "09:00-10:00"));
        assert!(!is_slot_taken(&existing, "p1", "2024-06-02", "09:00-10:00"));
        assert!(!is_slot_taken(&existing, "p1", "2024-06-01", "09:30-10:30"));
        assert!(!is_slot_taken(&[], "p1", "2024-06-01", "09:00-10:00"));
    }
}
