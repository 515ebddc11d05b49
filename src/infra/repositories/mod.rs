pub mod rows;

pub mod sqlite_booking_repo;
pub mod sqlite_guest_repo;
pub mod sqlite_room_repo;

pub mod postgres_booking_repo;
pub mod postgres_guest_repo;
pub mod postgres_room_repo;
