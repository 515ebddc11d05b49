use crate::domain::{
    models::{booking::{Booking, BookingDetails, BookingStatus}, guest::Guest},
    ports::BookingRepository,
};
use crate::error::AppError;
use crate::infra::repositories::rows::{booking_details_select, collect_rows, BookingDetailsRow, BookingRow};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create_with_guest(&self, guest: &Guest, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // First statement is a write so the transaction holds the database write
        // lock for the availability re-check below.
        let guest_id: String = sqlx::query_scalar(
            "INSERT INTO guests (id, first_name, last_name, email, phone, address, date_of_birth, nationality, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(email) DO UPDATE SET
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

        let inserted = sqlx::query_as::<_, BookingRow>(
            "INSERT INTO bookings (id, guest_id, room_id, check_in_date, check_out_date, adults, children, total_amount, status, special_requests, booking_date)
             SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
             WHERE EXISTS (SELECT 1 FROM rooms WHERE id = ? AND status = 'available')
               AND NOT EXISTS (
                   SELECT 1 FROM bookings
                   WHERE room_id = ? AND status IN ('confirmed', 'checked_in')
                     AND check_in_date < ? AND check_out_date > ?
               )
             RETURNING *"
        )
            .bind(&booking.id).bind(&guest_id).bind(&booking.room_id)
            .bind(booking.check_in_date).bind(booking.check_out_date)
            .bind(booking.adults).bind(booking.children).bind(booking.total_amount)
            .bind(booking.status.as_str()).bind(&booking.special_requests).bind(booking.booking_date)
            .bind(&booking.room_id)
            .bind(&booking.room_id).bind(booking.check_out_date).bind(booking.check_in_date)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        let Some(row) = inserted else {
            return Err(AppError::Unavailable("Room is not available for selected dates.".into()));
        };

        tx.commit().await.map_err(AppError::Database)?;
        row.try_into()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<BookingDetails>, AppError> {
        let row = sqlx::query_as::<_, BookingDetailsRow>(concat!(booking_details_select!(), " WHERE b.id = ?"))
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
             WHERE room_id = ? AND status IN ('confirmed', 'checked_in')
               AND check_in_date < ? AND check_out_date > ?
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
        if expected.is_empty() {
            return Ok(None);
        }
        let placeholders = vec!["?"; expected.len()].join(", ");
        let sql = format!("UPDATE bookings SET status = ? WHERE id = ? AND status IN ({}) RETURNING *", placeholders);

        let mut query = sqlx::query_as::<_, BookingRow>(&sql).bind(status.as_str()).bind(id);
        for s in expected {
            query = query.bind(s.as_str());
        }

        let row = query.fetch_optional(&self.pool).await.map_err(AppError::Database)?;
        row.map(Booking::try_from).transpose()
    }
}
