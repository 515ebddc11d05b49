#![allow(dead_code)]

use hotel_backend::{
    api::router::create_router,
    config::Config,
    domain::models::{
        money::Money,
        room::{Room, RoomStatus, RoomType},
    },
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_guest_repo::SqliteGuestRepo,
        sqlite_room_repo::SqliteRoomRepo,
    },
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::build(false).await
    }

    pub async fn with_occupancy_limit() -> Self {
        Self::build(true).await
    }

    async fn build(enforce_max_occupancy: bool) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
            timezone: chrono_tz::Tz::UTC,
            enforce_max_occupancy,
        };

        let state = Arc::new(AppState::new(
            config,
            Arc::new(SqliteRoomRepo::new(pool.clone())),
            Arc::new(SqliteGuestRepo::new(pool.clone())),
            Arc::new(SqliteBookingRepo::new(pool.clone())),
        ));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.state.config.today()
    }

    /// Date `days` after the hotel's today.
    pub fn day(&self, days: i64) -> NaiveDate {
        self.today() + Duration::days(days)
    }

    pub async fn seed_room_type(&self, name: &str, price_cents: i64, max_occupancy: i32, amenities: &[&str]) -> RoomType {
        let room_type = RoomType::new(
            name.to_string(),
            format!("{} room", name),
            Money::from_cents(price_cents),
            max_occupancy,
            amenities.iter().map(|a| a.to_string()).collect(),
        );
        self.state.room_repo.create_room_type(&room_type).await.expect("Failed to seed room type")
    }

    pub async fn seed_room(&self, number: &str, room_type: &RoomType, status: RoomStatus) -> Room {
        let floor = number.chars().next().and_then(|c| c.to_digit(10)).unwrap_or(1) as i32;
        let room = Room::new(number.to_string(), room_type.clone(), floor, status);
        self.state.room_repo.create_room(&room).await.expect("Failed to seed room")
    }

    /// Standard fixture: a 89.00 double with WiFi and TV in room 101.
    pub async fn seed_standard_room(&self) -> Room {
        let room_type = self.seed_room_type("Standard Double", 8900, 2, &["WiFi", "TV"]).await;
        self.seed_room("101", &room_type, RoomStatus::Available).await
    }

    pub async fn set_booking_status(&self, booking_id: &str, status: &str) {
        sqlx::query("UPDATE bookings SET status = ? WHERE id = ?")
            .bind(status)
            .bind(booking_id)
            .execute(&self.pool)
            .await
            .unwrap();
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(b) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(b.to_string())
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    pub async fn book(&self, room_id: &str, email: &str, check_in: NaiveDate, check_out: NaiveDate) -> (StatusCode, Value) {
        self.request("POST", "/bookings", Some(booking_payload(room_id, email, check_in, check_out))).await
    }

    pub async fn cancel(&self, booking_id: &str) -> (StatusCode, Value) {
        self.request(
            "PATCH",
            &format!("/bookings/{}/update", booking_id),
            Some(json!({"status": "cancelled"})),
        ).await
    }
}

pub fn booking_payload(room_id: &str, email: &str, check_in: NaiveDate, check_out: NaiveDate) -> Value {
    json!({
        "guest_details": {
            "first_name": "Jane",
            "last_name": "Doe",
            "email": email,
            "phone": "+1-555-0100"
        },
        "room_id": room_id,
        "check_in_date": check_in.to_string(),
        "check_out_date": check_out.to_string(),
        "adults": 2,
        "children": 0,
        "special_requests": "Late arrival"
    })
}

pub fn room_numbers(rooms: &Value) -> Vec<String> {
    rooms.as_array()
        .unwrap()
        .iter()
        .map(|r| r["room_number"].as_str().unwrap().to_string())
        .collect()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
