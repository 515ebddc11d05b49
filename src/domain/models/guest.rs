use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Guest {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Guest fields as supplied with a booking request. `None` and empty strings
/// both mean "not supplied".
#[derive(Debug, Clone, Default)]
pub struct GuestDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
}

impl Guest {
    pub fn from_details(details: &GuestDetails) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            first_name: details.first_name.clone(),
            last_name: details.last_name.clone(),
            email: details.email.clone(),
            phone: details.phone.clone().unwrap_or_default(),
            address: details.address.clone().unwrap_or_default(),
            date_of_birth: details.date_of_birth,
            nationality: details.nationality.clone().unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn supplied(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Applies only the supplied, non-empty fields of `details` on top of `existing`.
/// Identity (`id`, `email`, `created_at`) is never touched.
pub fn merge_guest(existing: &Guest, details: &GuestDetails) -> Guest {
    let mut merged = existing.clone();

    if let Some(v) = supplied(Some(details.first_name.as_str())) { merged.first_name = v.to_string(); }
    if let Some(v) = supplied(Some(details.last_name.as_str())) { merged.last_name = v.to_string(); }
    if let Some(v) = supplied(details.phone.as_deref()) { merged.phone = v.to_string(); }
    if let Some(v) = supplied(details.address.as_deref()) { merged.address = v.to_string(); }
    if let Some(v) = supplied(details.nationality.as_deref()) { merged.nationality = v.to_string(); }
    if details.date_of_birth.is_some() { merged.date_of_birth = details.date_of_birth; }

    if merged != *existing {
        merged.updated_at = Utc::now();
    }
    merged
}
