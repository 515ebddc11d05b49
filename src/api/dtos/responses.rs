use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::models::{
    booking::{BookingDetails, BookingStatus},
    guest::Guest,
    money::Money,
    room::Room,
};

#[derive(Serialize)]
pub struct GuestResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: String,
}

impl From<Guest> for GuestResponse {
    fn from(guest: Guest) -> Self {
        Self {
            full_name: guest.full_name(),
            id: guest.id,
            first_name: guest.first_name,
            last_name: guest.last_name,
            email: guest.email,
            phone: guest.phone,
            address: guest.address,
            date_of_birth: guest.date_of_birth,
            nationality: guest.nationality,
        }
    }
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub guest: GuestResponse,
    pub room: Room,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub adults: i32,
    pub children: i32,
    pub total_guests: i64,
    pub total_amount: Money,
    pub status: BookingStatus,
    pub special_requests: String,
    pub booking_date: DateTime<Utc>,
    pub nights: i64,
    pub can_be_cancelled: bool,
}

impl From<BookingDetails> for BookingResponse {
    fn from(details: BookingDetails) -> Self {
        let BookingDetails { booking, guest, room } = details;
        Self {
            total_guests: booking.total_guests(),
            nights: booking.nights(),
            can_be_cancelled: booking.status.can_be_cancelled(),
            id: booking.id,
            guest: guest.into(),
            room,
            check_in_date: booking.check_in_date,
            check_out_date: booking.check_out_date,
            adults: booking.adults,
            children: booking.children,
            total_amount: booking.total_amount,
            status: booking.status,
            special_requests: booking.special_requests,
            booking_date: booking.booking_date,
        }
    }
}
