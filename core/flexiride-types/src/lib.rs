//! Core type definitions for the FlexiRide client.
//!
//! This crate defines the data model shared by the identity store, the API
//! client and its front ends:
//! - The authenticated [`Session`] and its [`Role`]
//! - Vehicle catalog entries and the filter/update DTOs sent to the API
//! - Bookings and booking requests
//!
//! Wire names follow the remote API (camelCase fields, upper-case enums).

mod booking;
mod ids;
mod session;
mod vehicle;

pub use booking::{Booking, BookingRequest, BookingStatus};
pub use ids::{BookingId, VehicleId};
pub use session::{Role, Session};
pub use vehicle::{Vehicle, VehicleFilterParams, VehicleType, VehicleUpdate};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("unknown role: {0}")]
    InvalidRole(String),

    #[error("unknown vehicle type: {0}")]
    InvalidVehicleType(String),

    #[error("unknown booking status: {0}")]
    InvalidBookingStatus(String),
}
