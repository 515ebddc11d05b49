use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    OutOfOrder,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Maintenance => "maintenance",
            RoomStatus::OutOfOrder => "out_of_order",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(RoomStatus::Available),
            "occupied" => Ok(RoomStatus::Occupied),
            "maintenance" => Ok(RoomStatus::Maintenance),
            "out_of_order" => Ok(RoomStatus::OutOfOrder),
            other => Err(format!("unknown room status '{}'", other)),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct RoomType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub base_price: Money,
    pub max_occupancy: i32,
    pub amenities: Vec<String>,
}

impl RoomType {
    pub fn new(name: String, description: String, base_price: Money, max_occupancy: i32, amenities: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            base_price,
            max_occupancy,
            amenities,
        }
    }

    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities.iter().any(|a| a == amenity)
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct Room {
    pub id: String,
    pub room_number: String,
    pub room_type: RoomType,
    pub floor_number: i32,
    pub status: RoomStatus,
}

impl Room {
    pub fn new(room_number: String, room_type: RoomType, floor_number: i32, status: RoomStatus) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            room_number,
            room_type,
            floor_number,
            status,
        }
    }

    /// Static status gate. Date availability is computed separately from the booking ledger.
    pub fn is_bookable(&self) -> bool {
        self.status == RoomStatus::Available
    }
}
