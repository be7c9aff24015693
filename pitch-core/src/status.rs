use chrono::{DateTime, Utc};

use crate::models::{Booking, BookingStatus, UnknownStatus};

/// Moves a booking to `requested`, stamping `status_updated_at`.
///
/// There is no transition graph: every status can move to every other,
/// including itself, and a cancelled booking can be reinstated.
pub fn apply_status(
    booking: &mut Booking,
    requested: &str,
    now: DateTime<Utc>,
) -> Result<BookingStatus, UnknownStatus> {
    let next: BookingStatus = requested.parse()?;
    booking.status = next;
    booking.status_updated_at = Some(now);
    Ok(next)
}
