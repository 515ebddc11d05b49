//! Flat row shapes shared by the SQLite and PostgreSQL adapters. Joined queries
//! alias every column with a table prefix so one row can carry a booking, its
//! guest and its room without name clashes.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{types::Json, FromRow};

use crate::domain::models::{
    booking::{Booking, BookingDetails},
    guest::Guest,
    money::Money,
    room::{Room, RoomType},
};
use crate::error::AppError;

macro_rules! room_columns {
    () => {
        "r.id AS room_id, r.room_number AS room_number, r.floor_number AS room_floor_number, \
         r.status AS room_status, t.id AS room_type_id, t.name AS room_type_name, \
         t.description AS room_type_description, t.base_price AS room_type_base_price, \
         t.max_occupancy AS room_type_max_occupancy, t.amenities AS room_type_amenities"
    };
}

macro_rules! guest_columns {
    () => {
        "g.id AS guest_id, g.first_name AS guest_first_name, g.last_name AS guest_last_name, \
         g.email AS guest_email, g.phone AS guest_phone, g.address AS guest_address, \
         g.date_of_birth AS guest_date_of_birth, g.nationality AS guest_nationality, \
         g.created_at AS guest_created_at, g.updated_at AS guest_updated_at"
    };
}

macro_rules! booking_details_select {
    () => {
        concat!(
            "SELECT b.id, b.check_in_date, b.check_out_date, b.adults, b.children, b.total_amount, ",
            "b.status, b.special_requests, b.booking_date, ",
            $crate::infra::repositories::rows::room_columns!(), ", ",
            $crate::infra::repositories::rows::guest_columns!(),
            " FROM bookings b",
            " JOIN guests g ON g.id = b.guest_id",
            " JOIN rooms r ON r.id = b.room_id",
            " JOIN room_types t ON t.id = r.room_type_id"
        )
    };
}

pub(crate) use {booking_details_select, guest_columns, room_columns};

#[derive(Debug, FromRow)]
pub struct RoomRow {
    pub room_id: String,
    pub room_number: String,
    pub room_floor_number: i32,
    pub room_status: String,
    pub room_type_id: String,
    pub room_type_name: String,
    pub room_type_description: String,
    pub room_type_base_price: Money,
    pub room_type_max_occupancy: i32,
    pub room_type_amenities: Json<Vec<String>>,
}

impl TryFrom<RoomRow> for Room {
    type Error = AppError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        Ok(Room {
            id: row.room_id,
            room_number: row.room_number,
            floor_number: row.room_floor_number,
            status: row.room_status.parse().map_err(AppError::InternalWithMsg)?,
            room_type: RoomType {
                id: row.room_type_id,
                name: row.room_type_name,
                description: row.room_type_description,
                base_price: row.room_type_base_price,
                max_occupancy: row.room_type_max_occupancy,
                amenities: row.room_type_amenities.0,
            },
        })
    }
}

#[derive(Debug, FromRow)]
pub struct GuestRow {
    pub guest_id: String,
    pub guest_first_name: String,
    pub guest_last_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub guest_address: String,
    pub guest_date_of_birth: Option<NaiveDate>,
    pub guest_nationality: String,
    pub guest_created_at: DateTime<Utc>,
    pub guest_updated_at: DateTime<Utc>,
}

impl From<GuestRow> for Guest {
    fn from(row: GuestRow) -> Self {
        Guest {
            id: row.guest_id,
            first_name: row.guest_first_name,
            last_name: row.guest_last_name,
            email: row.guest_email,
            phone: row.guest_phone,
            address: row.guest_address,
            date_of_birth: row.guest_date_of_birth,
            nationality: row.guest_nationality,
            created_at: row.guest_created_at,
            updated_at: row.guest_updated_at,
        }
    }
}

/// Plain `bookings` row, as returned by `SELECT *` / `RETURNING *`.
#[derive(Debug, FromRow)]
pub struct BookingRow {
    pub id: String,
    pub guest_id: String,
    pub room_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub adults: i32,
    pub children: i32,
    pub total_amount: Money,
    pub status: String,
    pub special_requests: String,
    pub booking_date: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            guest_id: row.guest_id,
            room_id: row.room_id,
            check_in_date: row.check_in_date,
            check_out_date: row.check_out_date,
            adults: row.adults,
            children: row.children,
            total_amount: row.total_amount,
            status: row.status.parse().map_err(AppError::InternalWithMsg)?,
            special_requests: row.special_requests,
            booking_date: row.booking_date,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct BookingDetailsRow {
    pub id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub adults: i32,
    pub children: i32,
    pub total_amount: Money,
    pub status: String,
    pub special_requests: String,
    pub booking_date: DateTime<Utc>,
    #[sqlx(flatten)]
    pub room: RoomRow,
    #[sqlx(flatten)]
    pub guest: GuestRow,
}

impl TryFrom<BookingDetailsRow> for BookingDetails {
    type Error = AppError;

    fn try_from(row: BookingDetailsRow) -> Result<Self, Self::Error> {
        let booking = Booking {
            id: row.id,
            guest_id: row.guest.guest_id.clone(),
            room_id: row.room.room_id.clone(),
            check_in_date: row.check_in_date,
            check_out_date: row.check_out_date,
            adults: row.adults,
            children: row.children,
            total_amount: row.total_amount,
            status: row.status.parse().map_err(AppError::InternalWithMsg)?,
            special_requests: row.special_requests,
            booking_date: row.booking_date,
        };

        Ok(BookingDetails {
            booking,
            guest: row.guest.into(),
            room: row.room.try_into()?,
        })
    }
}

pub fn collect_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, AppError>
where
    T: TryFrom<R, Error = AppError>,
{
    rows.into_iter().map(T::try_from).collect()
}
