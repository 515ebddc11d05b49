use std::sync::Arc;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::models::booking::{
    nights_between, stay_total, Booking, BookingDetails, BookingStatus, NewBookingParams,
};
use crate::domain::models::guest::{merge_guest, Guest, GuestDetails};
use crate::domain::ports::{BookingRepository, GuestRepository, RoomRepository};
use crate::domain::services::availability::is_room_available;
use crate::error::AppError;

pub struct CreateBookingCommand {
    pub guest: GuestDetails,
    pub room_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub adults: i32,
    pub children: i32,
    pub special_requests: String,
}

pub struct BookingService {
    room_repo: Arc<dyn RoomRepository>,
    guest_repo: Arc<dyn GuestRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    enforce_max_occupancy: bool,
}

impl BookingService {
    pub fn new(
        room_repo: Arc<dyn RoomRepository>,
        guest_repo: Arc<dyn GuestRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        enforce_max_occupancy: bool,
    ) -> Self {
        Self { room_repo, guest_repo, booking_repo, enforce_max_occupancy }
    }

    /// Validates and stores a reservation. `today` is the hotel's current date;
    /// a check-in on `today` is accepted.
    pub async fn create_booking(&self, cmd: CreateBookingCommand, today: NaiveDate) -> Result<BookingDetails, AppError> {
        if cmd.check_in_date < today {
            return Err(AppError::InvalidDate("Check-in date must be in the future.".into()));
        }
        if cmd.check_out_date <= cmd.check_in_date {
            return Err(AppError::InvalidDate("Check-out date must be after check-in date.".into()));
        }

        let room = self.room_repo.find_by_id(&cmd.room_id).await?
            .ok_or(AppError::NotFound("Room not found.".into()))?;

        if !is_room_available(self.booking_repo.as_ref(), &room, cmd.check_in_date, cmd.check_out_date).await? {
            return Err(AppError::Unavailable("Room is not available for selected dates.".into()));
        }

        if self.enforce_max_occupancy {
            let total_guests = i64::from(cmd.adults) + i64::from(cmd.children);
            if total_guests > i64::from(room.room_type.max_occupancy) {
                return Err(AppError::Validation(format!(
                    "Too many guests. Maximum occupancy for this room: {}",
                    room.room_type.max_occupancy
                )));
            }
        }

        let nights = nights_between(cmd.check_in_date, cmd.check_out_date);
        if nights < 1 {
            return Err(AppError::InvalidStay("Minimum stay is 1 night.".into()));
        }

        let total_amount = stay_total(room.room_type.base_price, nights)
            .ok_or(AppError::Validation("Stay total exceeds the supported amount.".into()))?;

        let guest = match self.guest_repo.find_by_email(&cmd.guest.email).await? {
            Some(existing) => merge_guest(&existing, &cmd.guest),
            None => Guest::from_details(&cmd.guest),
        };

        let booking = Booking::new(NewBookingParams {
            guest_id: guest.id.clone(),
            room_id: room.id.clone(),
            check_in_date: cmd.check_in_date,
            check_out_date: cmd.check_out_date,
            adults: cmd.adults,
            children: cmd.children,
            total_amount,
            special_requests: cmd.special_requests,
        });

        let created = self.booking_repo.create_with_guest(&guest, &booking).await?;
        info!(
            booking_id = %created.id,
            room_number = %room.room_number,
            nights,
            total_amount = %created.total_amount,
            "Booking confirmed"
        );

        self.get(&created.id).await
    }

    /// Only cancellation is supported, and only from pending or confirmed.
    pub async fn update_status(&self, id: &str, requested: Option<BookingStatus>) -> Result<BookingDetails, AppError> {
        let mut details = self.get(id).await?;

        if requested != Some(BookingStatus::Cancelled) {
            return Err(AppError::UnsupportedOperation("Only cancellation is allowed".into()));
        }

        if !details.booking.status.can_be_cancelled() {
            return Err(AppError::InvalidTransition("Booking cannot be cancelled in current status".into()));
        }

        let updated = self.booking_repo
            .update_status(id, &BookingStatus::CANCELLABLE, BookingStatus::Cancelled)
            .await?
            .ok_or_else(|| {
                warn!(booking_id = %id, "Booking status changed concurrently, cancellation rejected");
                AppError::InvalidTransition("Booking cannot be cancelled in current status".into())
            })?;

        info!(booking_id = %id, "Booking cancelled");
        details.booking = updated;
        Ok(details)
    }

    pub async fn get(&self, id: &str) -> Result<BookingDetails, AppError> {
        self.booking_repo.find_by_id(id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))
    }

    pub async fn list(&self) -> Result<Vec<BookingDetails>, AppError> {
        self.booking_repo.list().await
    }
}
