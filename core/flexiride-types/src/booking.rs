//! Bookings and booking requests.

use crate::{BookingId, Error, VehicleId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "COMPLETED")]
    Completed,
    #[serde(rename = "CANCELLED")]
    Cancelled,
    /// Rental period is over but the vehicle has not been checked back in.
    #[serde(rename = "AWAITING RETURN")]
    AwaitingReturn,
}

impl BookingStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::AwaitingReturn => "AWAITING RETURN",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "ACTIVE" => Ok(Self::Active),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            "AWAITING RETURN" => Ok(Self::AwaitingReturn),
            _ => Err(Error::InvalidBookingStatus(s.to_string())),
        }
    }
}

/// A booking as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    /// Matches [`crate::Session::id`] of the customer.
    pub user_id: String,
    pub vehicle_id: VehicleId,
    #[serde(with = "day")]
    pub start_date: NaiveDate,
    #[serde(with = "day")]
    pub end_date: NaiveDate,
    pub total_price: f64,
    pub status: BookingStatus,
    /// Server timestamp, kept verbatim.
    pub created_at: String,
}

impl Booking {
    /// Number of rental days, counting both ends.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Body for `POST /bookings/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub email: String,
    pub vehicle_id: VehicleId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Rental days as the API sends them: a bare `YYYY-MM-DD`, or a timestamp
/// whose date part is taken. Always written back as the bare day.
mod day {
    use chrono::NaiveDate;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid booking date: {raw}")))
    }

    fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        let rest = raw.get(10..)?;
        if !(rest.is_empty() || rest.starts_with(['T', ' '])) {
            return None;
        }
        NaiveDate::parse_from_str(raw.get(..10)?, FORMAT).ok()
    }
}
