use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{guest::Guest, money::Money, room::Room};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    /// Statuses that occupy the room for overlap purposes.
    pub const BLOCKING: [BookingStatus; 2] = [BookingStatus::Confirmed, BookingStatus::CheckedIn];
    pub const CANCELLABLE: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Confirmed];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CheckedIn => "checked_in",
            BookingStatus::CheckedOut => "checked_out",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_blocking(&self) -> bool {
        Self::BLOCKING.contains(self)
    }

    pub fn can_be_cancelled(&self) -> bool {
        Self::CANCELLABLE.contains(self)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "checked_in" => Ok(BookingStatus::CheckedIn),
            "checked_out" => Ok(BookingStatus::CheckedOut),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status '{}'", other)),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct Booking {
    pub id: String,
    pub guest_id: String,
    pub room_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub adults: i32,
    pub children: i32,
    pub total_amount: Money,
    pub status: BookingStatus,
    pub special_requests: String,
    pub booking_date: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub guest_id: String,
    pub room_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub adults: i32,
    pub children: i32,
    pub total_amount: Money,
    pub special_requests: String,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            guest_id: params.guest_id,
            room_id: params.room_id,
            check_in_date: params.check_in_date,
            check_out_date: params.check_out_date,
            adults: params.adults,
            children: params.children,
            total_amount: params.total_amount,
            status: BookingStatus::Confirmed,
            special_requests: params.special_requests,
            booking_date: Utc::now(),
        }
    }

    pub fn nights(&self) -> i64 {
        nights_between(self.check_in_date, self.check_out_date)
    }

    pub fn total_guests(&self) -> i64 {
        i64::from(self.adults) + i64::from(self.children)
    }
}

pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Flat rate: base nightly price times nights. `None` on overflow.
pub fn stay_total(base_price: Money, nights: i64) -> Option<Money> {
    base_price.checked_mul(nights)
}

/// A booking with its guest and room (including room type) resolved.
#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub booking: Booking,
    pub guest: Guest,
    pub room: Room,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_blocking_statuses() {
        assert!(BookingStatus::Confirmed.is_blocking());
        assert!(BookingStatus::CheckedIn.is_blocking());
        assert!(!BookingStatus::Pending.is_blocking());
        assert!(!BookingStatus::Cancelled.is_blocking());
        assert!(!BookingStatus::CheckedOut.is_blocking());
    }

    #[test]
    fn test_cancellation_guard() {
        assert!(BookingStatus::Pending.can_be_cancelled());
        assert!(BookingStatus::Confirmed.can_be_cancelled());
        assert!(!BookingStatus::CheckedIn.can_be_cancelled());
        assert!(!BookingStatus::CheckedOut.can_be_cancelled());
        assert!(!BookingStatus::Cancelled.can_be_cancelled());
    }

    #[test]
    fn test_nights_and_total() {
        let nights = nights_between(date(2025, 6, 1), date(2025, 6, 4));
        assert_eq!(nights, 3);
        assert_eq!(stay_total(Money::from_cents(8900), nights), Some(Money::from_cents(26700)));
    }

    #[test]
    fn test_nights_across_month_boundary() {
        assert_eq!(nights_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
    }

    #[test]
    fn test_new_booking_defaults_to_confirmed() {
        let booking = Booking::new(NewBookingParams {
            guest_id: "g".into(),
            room_id: "r".into(),
            check_in_date: date(2025, 6, 1),
            check_out_date: date(2025, 6, 4),
            adults: 2,
            children: 1,
            total_amount: Money::from_cents(26700),
            special_requests: String::new(),
        });
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.total_guests(), 3);
        assert_eq!(booking.nights(), 3);
    }

    #[test]
    fn test_total_guests_does_not_overflow() {
        let booking = Booking::new(NewBookingParams {
            guest_id: "g".into(),
            room_id: "r".into(),
            check_in_date: date(2025, 6, 1),
            check_out_date: date(2025, 6, 2),
            adults: i32::MAX,
            children: 1,
            total_amount: Money::from_cents(8900),
            special_requests: String::new(),
        });
        assert_eq!(booking.total_guests(), i64::from(i32::MAX) + 1);
    }
}
