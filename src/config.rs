use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use std::env;
use tracing::warn;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Zone whose calendar date counts as "today" for check-in validation.
    pub timezone: Tz,
    /// adults + children must fit the room type's max occupancy. Off by default.
    pub enforce_max_occupancy: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            timezone: parse_timezone(&env::var("HOTEL_TIMEZONE").unwrap_or_else(|_| "UTC".to_string())),
            enforce_max_occupancy: parse_flag(env::var("ENFORCE_MAX_OCCUPANCY").ok().as_deref()),
        }
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

fn parse_timezone(name: &str) -> Tz {
    name.parse().unwrap_or_else(|_| {
        warn!("Unknown HOTEL_TIMEZONE '{}', falling back to UTC", name);
        chrono_tz::UTC
    })
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(value.map(|v| v.trim().to_ascii_lowercase()).as_deref(), Some("1" | "true" | "yes" | "on"))
}
