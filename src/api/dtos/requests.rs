use chrono::NaiveDate;
use serde::Deserialize;
use std::str::FromStr;
use tracing::debug;
use validator::Validate;

use crate::domain::models::guest::GuestDetails;
use crate::domain::services::booking_service::CreateBookingCommand;
use crate::domain::services::room_directory::RoomFilters;

#[derive(Debug, Deserialize, Validate)]
pub struct GuestDetailsRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(length(max = 100))]
    pub nationality: Option<String>,
}

impl From<GuestDetailsRequest> for GuestDetails {
    fn from(req: GuestDetailsRequest) -> Self {
        GuestDetails {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            date_of_birth: req.date_of_birth,
            nationality: req.nationality,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(nested)]
    pub guest_details: GuestDetailsRequest,
    pub room_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[validate(range(min = 1))]
    pub adults: Option<i32>,
    #[validate(range(min = 0))]
    pub children: Option<i32>,
    pub special_requests: Option<String>,
}

impl From<CreateBookingRequest> for CreateBookingCommand {
    fn from(req: CreateBookingRequest) -> Self {
        CreateBookingCommand {
            guest: req.guest_details.into(),
            room_id: req.room_id,
            check_in_date: req.check_in_date,
            check_out_date: req.check_out_date,
            adults: req.adults.unwrap_or(1),
            children: req.children.unwrap_or(0),
            special_requests: req.special_requests.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: Option<String>,
}

/// Raw `GET /rooms` query. Every value stays a string so that malformed
/// input can be skipped per filter instead of failing the request.
#[derive(Debug, Default)]
pub struct RoomSearchQuery {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub amenities: Option<String>,
    pub guests: Option<String>,
}

/// Parses an optional filter value. Missing, blank, or unparseable values
/// yield `None` and the filter is simply not applied. This leniency is part
/// of the public contract of `GET /rooms`.
fn parse_or_skip<T: FromStr>(name: &str, raw: Option<&str>) -> Option<T> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty())?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            debug!(filter = name, value = raw, "Ignoring malformed room filter");
            None
        }
    }
}

fn parse_date(name: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty())?;
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            debug!(filter = name, value = raw, "Ignoring malformed room filter");
            None
        }
    }
}

fn parse_price(name: &str, raw: Option<&str>) -> Option<f64> {
    parse_or_skip::<f64>(name, raw).filter(|v| v.is_finite())
}

impl RoomSearchQuery {
    /// Builds the query from raw key/value pairs. A repeated key keeps its
    /// last value and unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut q = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "check_in" => &mut q.check_in,
                "check_out" => &mut q.check_out,
                "min_price" => &mut q.min_price,
                "max_price" => &mut q.max_price,
                "amenities" => &mut q.amenities,
                "guests" => &mut q.guests,
                _ => continue,
            };
            *slot = Some(value);
        }
        q
    }

    pub fn into_filters(self) -> RoomFilters {
        let stay = match (
            parse_date("check_in", self.check_in.as_deref()),
            parse_date("check_out", self.check_out.as_deref()),
        ) {
            (Some(check_in), Some(check_out)) => Some((check_in, check_out)),
            _ => None,
        };

        let amenities = self.amenities
            .as_deref()
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        RoomFilters {
            stay,
            min_price: parse_price("min_price", self.min_price.as_deref()),
            max_price: parse_price("max_price", self.max_price.as_deref()),
            amenities,
            guests: parse_or_skip("guests", self.guests.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> RoomSearchQuery {
        RoomSearchQuery::from_pairs(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    #[test]
    fn test_full_query_parses() {
        let filters = query(&[
            ("check_in", "2025-06-01"),
            ("check_out", "2025-06-04"),
            ("min_price", "50"),
            ("max_price", "150.5"),
            ("amenities", "WiFi, Balcony"),
            ("guests", "2"),
        ]).into_filters();

        assert_eq!(
            filters.stay,
            Some((NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), NaiveDate::from_ymd_opt(2025, 6, 4).unwrap()))
        );
        assert_eq!(filters.min_price, Some(50.0));
        assert_eq!(filters.max_price, Some(150.5));
        assert_eq!(filters.amenities, vec!["WiFi".to_string(), "Balcony".to_string()]);
        assert_eq!(filters.guests, Some(2));
    }

    #[test]
    fn test_malformed_values_are_skipped() {
        let filters = query(&[
            ("check_in", "06/01/2025"),
            ("check_out", "2025-06-04"),
            ("min_price", "cheap"),
            ("max_price", "nan"),
            ("guests", "two"),
        ]).into_filters();

        assert_eq!(filters, RoomFilters::default());
    }

    #[test]
    fn test_date_range_needs_both_ends() {
        let filters = query(&[("check_in", "2025-06-01")]).into_filters();
        assert_eq!(filters.stay, None);
    }

    #[test]
    fn test_blank_amenity_entries_are_dropped() {
        let filters = query(&[("amenities", "WiFi,, ,TV,")]).into_filters();
        assert_eq!(filters.amenities, vec!["WiFi".to_string(), "TV".to_string()]);
    }

    #[test]
    fn test_repeated_key_keeps_last_value_and_other_filters() {
        let filters = query(&[
            ("check_in", "2025-06-01"),
            ("check_out", "2025-06-04"),
            ("guests", "5"),
            ("guests", "2"),
            ("page", "3"),
        ]).into_filters();

        assert_eq!(filters.guests, Some(2));
        assert!(filters.stay.is_some());
    }

    #[test]
    fn test_fractional_guest_count_is_malformed() {
        assert_eq!(query(&[("guests", "2.5")]).into_filters().guests, None);
    }

    #[test]
    fn test_booking_request_defaults() {
        let req: CreateBookingRequest = serde_json::from_value(serde_json::json!({
            "guest_details": {"first_name": "A", "last_name": "B", "email": "a@b.com"},
            "room_id": "r1",
            "check_in_date": "2025-06-01",
            "check_out_date": "2025-06-04"
        })).unwrap();
        assert!(req.validate().is_ok());

        let cmd: CreateBookingCommand = req.into();
        assert_eq!(cmd.adults, 1);
        assert_eq!(cmd.children, 0);
        assert_eq!(cmd.special_requests, "");
    }

    #[test]
    fn test_booking_request_rejects_zero_adults_and_bad_email() {
        let req: CreateBookingRequest = serde_json::from_value(serde_json::json!({
            "guest_details": {"first_name": "A", "last_name": "B", "email": "not-an-email"},
            "room_id": "r1",
            "check_in_date": "2025-06-01",
            "check_out_date": "2025-06-04",
            "adults": 0
        })).unwrap();
        let errors = req.validate().unwrap_err().to_string();
        assert!(errors.contains("adults"));
        assert!(errors.contains("email"));
    }
}
