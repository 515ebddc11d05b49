use crate::domain::{models::guest::Guest, ports::GuestRepository};
use crate::error::AppError;
use crate::infra::repositories::rows::{guest_columns, GuestRow};
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteGuestRepo {
    pool: SqlitePool,
}

impl SqliteGuestRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuestRepository for SqliteGuestRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<Guest>, AppError> {
        let row = sqlx::query_as::<_, GuestRow>(concat!("SELECT ", guest_columns!(), " FROM guests g WHERE g.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.map(Guest::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Guest>, AppError> {
        let row = sqlx::query_as::<_, GuestRow>(concat!("SELECT ", guest_columns!(), " FROM guests g WHERE g.email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.map(Guest::from))
    }
}
