//! Vehicle catalog entries and the request bodies built from them.

use crate::{Error, VehicleId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vehicle class offered for rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    #[serde(rename = "2-Wheeler")]
    TwoWheeler,
    #[serde(rename = "4-Wheeler")]
    FourWheeler,
}

impl VehicleType {
    /// Returns the wire name of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TwoWheeler => "2-Wheeler",
            Self::FourWheeler => "4-Wheeler",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2-wheeler" | "2" | "two-wheeler" => Ok(Self::TwoWheeler),
            "4-wheeler" | "4" | "four-wheeler" => Ok(Self::FourWheeler),
            _ => Err(Error::InvalidVehicleType(s.to_string())),
        }
    }
}

/// A vehicle in the rental catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    pub brand: String,
    pub model: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub price_per_day: f64,
    /// Deposit collected at booking time.
    pub advance: f64,
    pub image_url: String,
}

/// Body for creating or editing a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleUpdate {
    pub name: String,
    pub brand: String,
    pub model: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub price_per_day: f64,
    pub advance: f64,
    pub image_url: String,
}

impl From<&Vehicle> for VehicleUpdate {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            name: vehicle.name.clone(),
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            vehicle_type: vehicle.vehicle_type,
            price_per_day: vehicle.price_per_day,
            advance: vehicle.advance,
            image_url: vehicle.image_url.clone(),
        }
    }
}

/// Server-side catalog filter.
///
/// Empty lists are sent as `[]`; unset bounds are omitted. Dates go over the
/// wire as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFilterParams {
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub types: Vec<VehicleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}
