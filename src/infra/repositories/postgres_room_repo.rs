use crate::domain::{models::room::{Room, RoomStatus, RoomType}, ports::RoomRepository};
use crate::error::AppError;
use crate::infra::repositories::rows::{collect_rows, room_columns, RoomRow};
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

pub struct PostgresRoomRepo {
    pool: PgPool,
}

impl PostgresRoomRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PostgresRoomRepo {
    async fn create_room_type(&self, room_type: &RoomType) -> Result<RoomType, AppError> {
        sqlx::query(
            "INSERT INTO room_types (id, name, description, base_price, max_occupancy, amenities) VALUES ($1, $2, $3, $4, $5, $6)",
        )
            .bind(&room_type.id)
            .bind(&room_type.name)
            .bind(&room_type.description)
            .bind(room_type.base_price)
            .bind(room_type.max_occupancy)
            .bind(Json(&room_type.amenities))
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(room_type.clone())
    }

    async fn create_room(&self, room: &Room) -> Result<Room, AppError> {
        sqlx::query(
            "INSERT INTO rooms (id, room_number, room_type_id, floor_number, status) VALUES ($1, $2, $3, $4, $5)",
        )
            .bind(&room.id)
            .bind(&room.room_number)
            .bind(&room.room_type.id)
            .bind(room.floor_number)
            .bind(room.status.as_str())
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(room.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Room>, AppError> {
        let row = sqlx::query_as::<_, RoomRow>(concat!(
            "SELECT ", room_columns!(),
            " FROM rooms r JOIN room_types t ON t.id = r.room_type_id WHERE r.id = $1"
        ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        row.map(Room::try_from).transpose()
    }

    async fn list_by_status(&self, status: RoomStatus) -> Result<Vec<Room>, AppError> {
        let rows = sqlx::query_as::<_, RoomRow>(concat!(
            "SELECT ", room_columns!(),
            " FROM rooms r JOIN room_types t ON t.id = r.room_type_id WHERE r.status = $1 ORDER BY r.room_number ASC"
        ))
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;
        collect_rows(rows)
    }
}
