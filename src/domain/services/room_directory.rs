use chrono::NaiveDate;
use crate::domain::models::room::{Room, RoomStatus};
use crate::domain::ports::{BookingRepository, RoomRepository};
use crate::domain::services::availability::is_room_available;
use crate::error::AppError;

/// Conjunction of optional room search criteria. An unset field does not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomFilters {
    pub stay: Option<(NaiveDate, NaiveDate)>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Every listed amenity must be present on the room type.
    pub amenities: Vec<String>,
    /// Minimum max-occupancy of the room type.
    pub guests: Option<i64>,
}

impl RoomFilters {
    /// Criteria that depend only on the room record, not on the booking ledger.
    pub fn matches_attributes(&self, room: &Room) -> bool {
        let room_type = &room.room_type;
        let price = room_type.base_price.as_f64();

        if let Some(min) = self.min_price && price < min {
            return false;
        }
        if let Some(max) = self.max_price && price > max {
            return false;
        }
        if let Some(guests) = self.guests && i64::from(room_type.max_occupancy) < guests {
            return false;
        }
        self.amenities.iter().all(|a| room_type.has_amenity(a))
    }
}

/// Rooms with static status `available` that satisfy every filter, ordered by
/// room number. Rooms in any other status are never returned, whatever the dates.
pub async fn list_available(
    room_repo: &dyn RoomRepository,
    booking_repo: &dyn BookingRepository,
    filters: &RoomFilters,
) -> Result<Vec<Room>, AppError> {
    let candidates = room_repo.list_by_status(RoomStatus::Available).await?;

    let mut rooms = Vec::with_capacity(candidates.len());
    for room in candidates {
        if !filters.matches_attributes(&room) {
            continue;
        }
        if let Some((check_in, check_out)) = filters.stay
            && !is_room_available(booking_repo, &room, check_in, check_out).await? {
            continue;
        }
        rooms.push(room);
    }

    Ok(rooms)
}
