use crate::domain::models::{
    booking::{Booking, BookingDetails, BookingStatus},
    guest::Guest,
    room::{Room, RoomStatus, RoomType},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create_room_type(&self, room_type: &RoomType) -> Result<RoomType, AppError>;
    async fn create_room(&self, room: &Room) -> Result<Room, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Room>, AppError>;
    /// Rooms with the given static status, ordered by room number ascending.
    async fn list_by_status(&self, status: RoomStatus) -> Result<Vec<Room>, AppError>;
}

#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Guest>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Guest>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Upserts `guest` by email and inserts `booking` in one transaction. The
    /// insert only happens if the room is still available and no blocking
    /// booking overlaps `[check_in_date, check_out_date)`; otherwise the whole
    /// transaction is rolled back and `AppError::Unavailable` is returned.
    /// The stored booking references the persisted guest id.
    async fn create_with_guest(&self, guest: &Guest, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<BookingDetails>, AppError>;
    /// All bookings, newest first.
    async fn list(&self) -> Result<Vec<BookingDetails>, AppError>;
    /// Blocking bookings on `room_id` whose stay overlaps `[check_in, check_out)`.
    async fn find_overlapping(&self, room_id: &str, check_in: NaiveDate, check_out: NaiveDate) -> Result<Vec<Booking>, AppError>;
    /// Sets `status` only if the current status is one of `expected`.
    /// Returns `None` when the booking exists but the guard did not match.
    async fn update_status(&self, id: &str, expected: &[BookingStatus], status: BookingStatus) -> Result<Option<Booking>, AppError>;
}
