use crate::domain::{
    models::{booking::{Booking, BookingDetails, BookingStatus}, guest::Guest, room::RoomStatus},
    ports::BookingRepository,
};
use crate::error::AppError;
use crate::infra::repositories::rows::{booking_details_select, collect_rows, BookingDetailsRow, BookingRow};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create_with_guest(&self, guest: &Guest, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Row lock on the room serializes every creator for this room until commit.
        let room_status: Option<String> = sqlx::query_scalar("SELECT status FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(&booking.room_id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        match room_status {
            None => return Err(AppError::NotFound("Room not found.".into())),
            Some(s) if s != RoomStatus::Available.as_str() => {
                return Err(AppError::Unavailable("Room is not available for selected dates.".into()));
            }
            Some(_) => {}
        }

        let conflicts: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings
             WHERE room_id = $1 AND status IN ('confirmed', 'checked_in')
               AND check_in_date < $2 AND check_out_date > $3"
        )
            .bind(&booking.room_id).bind(booking.check_out_date).bind(booking.check_in_date)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        if conflicts > 0 {
            return Err(AppError::Unavailable("Room is not available for selected dates.".into()));
        }

        let guest_id: String = sqlx::query_scalar(
            "INSERT INTO guests (id, first_name, last_name, email, phone, address, date_of_birth, nationality, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (email) DO UPDATE SET
                first_name = CASE WHEN excluded.first_name <> '' THEN excluded.first_name ELSE guests.first_name END,
                last_name = CASE WHEN excluded.last_name <> '' THEN excluded.last_name ELSE guests.last_name END,
                phone = CASE WHEN excluded.phone <> '' THEN excluded.phone ELSE guests.phone END,
                address = CASE WHEN excluded.address <> '' THEN excluded.address ELSE guests.address END,
                nationality = CASE WHEN excluded.nationality <> '' THEN excluded.nationality ELSE guests.nationality END,
                date_of_birth = COALESCE(excluded.date_of_birth, guests.date_of_birth),
                updated_at = excluded.updated_at
             RETURNING id"
        )
            .bind(&guest.id).bind(&guest.first_name).bind(&guest.last_name).bind(&guest.email)
            .bind(&guest.phone).bind(&guest.address).bind(guest.date_of_birth).bind(&guest.nationality)
            .bind(guest.created_at).bind(guest.updated_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, BookingRow>(
            "INSERT INTO bookings (id, guest_id, room_id, check_in_date, check_out_date, adults, children, total_amount, status, special_requests, booking_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *"
        )
            .bind(&booking.id).bind(&guest_id).bind(&booking.room_id)
            .bind(booking.check_in_date).bind(booking.check_out_date)
            .bind(booking.adults).bind(booking.children).bind(booking.total_amount)
            .bind(booking.status.as_str()).bind(&booking.special_requests).bind(booking.booking_date)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        created.try_into()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<BookingDetails>, AppError> {
        let row = sqlx::query_as::<_, BookingDetailsRow>(concat!(booking_details_select!(), " WHERE b.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        row.map(BookingDetails::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<BookingDetails>, AppError> {
        let rows = sqlx::query_as::<_, BookingDetailsRow>(concat!(
            booking_details_select!(), " ORDER BY b.booking_date DESC, b.id DESC"
        ))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;
        collect_rows(rows)
    }

    async fn find_overlapping(&self, room_id: &str, check_in: NaiveDate, check_out: NaiveDate) -> Result<Vec<Booking>, AppError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT * FROM bookings
             WHERE room_id = $1 AND status IN ('confirmed', 'checked_in')
               AND check_in_date < $2 AND check_out_date > $3
             ORDER BY check_in_date ASC"
        )
            .bind(room_id)
            .bind(check_out)
            .bind(check_in)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;
        collect_rows(rows)
    }

    async fn update_status(&self, id: &str, expected: &[BookingStatus], status: BookingStatus) -> Result<Option<Booking>, AppError> {
        let expected: Vec<String> = expected.iter().map(|s| s.as_str().to_string()).collect();

        let row = sqlx::query_as::<_, BookingRow>(
            "UPDATE bookings SET status = $1 WHERE id = $2 AND status = ANY($3) RETURNING *"
        )
            .bind(status.as_str())
            .bind(id)
            .bind(&expected)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        row.map(Booking::try_from).transpose()
    }
}
