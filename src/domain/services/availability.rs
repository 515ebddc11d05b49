use chrono::NaiveDate;
use crate::domain::models::booking::Booking;
use crate::domain::models::room::Room;
use crate::domain::ports::BookingRepository;
use crate::error::AppError;

/// Half-open overlap test on `[check_in, check_out)` stays. A checkout on day X
/// does not collide with a check-in on day X.
pub fn stays_overlap(
    existing_in: NaiveDate,
    existing_out: NaiveDate,
    new_in: NaiveDate,
    new_out: NaiveDate,
) -> bool {
    existing_in < new_out && existing_out > new_in
}

/// True if any of `bookings` blocks `[check_in, check_out)`.
pub fn has_conflict(bookings: &[Booking], check_in: NaiveDate, check_out: NaiveDate) -> bool {
    bookings.iter().any(|b| {
        b.status.is_blocking() && stays_overlap(b.check_in_date, b.check_out_date, check_in, check_out)
    })
}

/// A room is available when its static status is `available` and no
/// confirmed or checked-in booking overlaps the requested stay.
pub async fn is_room_available(
    booking_repo: &dyn BookingRepository,
    room: &Room,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<bool, AppError> {
    if !room.is_bookable() {
        return Ok(false);
    }

    let candidates = booking_repo.find_overlapping(&room.id, check_in, check_out).await?;
    Ok(!has_conflict(&candidates, check_in, check_out))
}
