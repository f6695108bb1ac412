//! Booking endpoints.

use crate::auth::AuthClient;
use crate::error::ClientResult;
use flexiride_types::{Booking, BookingId, BookingRequest};
use std::sync::Arc;
use tracing::info;

/// Typed access to `/bookings`.
#[derive(Debug, Clone)]
pub struct BookingService {
    auth: Arc<AuthClient>,
}

impl BookingService {
    pub fn new(auth: Arc<AuthClient>) -> Self {
        Self { auth }
    }

    /// Lists every booking visible to the caller.
    pub async fn list(&self) -> ClientResult<Vec<Booking>> {
        self.auth.api_client().get("bookings", "fetch bookings").await
    }

    /// Lists the bookings made with `email`.
    pub async fn list_by_email(&self, email: &str) -> ClientResult<Vec<Booking>> {
        let path = format!("bookings/email/{}", urlencoding::encode(email));
        self.auth.api_client().get(&path, "fetch bookings").await
    }

    /// Books a vehicle for a date range.
    pub async fn create(&self, request: &BookingRequest) -> ClientResult<Booking> {
        let booking: Booking = self
            .auth
            .api_client()
            .post("bookings/create", request, "make a booking")
            .await?;
        info!(
            "Booked vehicle {} from {} to {}",
            booking.vehicle_id, booking.start_date, booking.end_date
        );
        Ok(booking)
    }

    /// Cancels a booking and returns its updated state.
    pub async fn cancel(&self, id: BookingId) -> ClientResult<Booking> {
        let booking: Booking = self
            .auth
            .api_client()
            .post_empty(&format!("bookings/cancel/{id}"), "cancel a booking")
            .await?;
        info!("Cancelled booking {}", id);
        Ok(booking)
    }
}
