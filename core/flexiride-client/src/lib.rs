//! Session cache and authenticated API client for FlexiRide.
//!
//! [`AuthClient`] is the in-process view of who is signed in. It hydrates
//! lazily from the [`IdentityStore`](flexiride_identity::IdentityStore), runs
//! login/register/logout against the auth service, and hands out
//! [`ApiClient`]s whose `Authorization` header is derived from the session
//! at the moment of the call.
//!
//! The resource services ([`VehicleService`], [`BookingService`]) ask the
//! facade for a fresh [`ApiClient`] on every request, so a login or logout in
//! between is always picked up.
//!
//! ```no_run
//! # async fn demo() -> flexiride_client::ClientResult<()> {
//! use flexiride_client::{AuthClient, ClientConfig, Deployment, VehicleService};
//! use flexiride_identity::IdentityStore;
//! use std::sync::Arc;
//!
//! let config = ClientConfig::for_deployment(Deployment::Development);
//! let auth = Arc::new(AuthClient::new(config, IdentityStore::detect())?);
//! auth.login("u@x.com", "secret").await?;
//!
//! let vehicles = VehicleService::new(auth.clone()).list().await?;
//! # let _ = vehicles;
//! # Ok(())
//! # }
//! ```

mod api;
mod auth;
mod bookings;
mod config;
mod error;
pub mod search;
mod vehicles;

pub use api::ApiClient;
pub use auth::AuthClient;
pub use bookings::BookingService;
pub use config::{
    ClientConfig, DEFAULT_TIMEOUT_SECS, DEVELOPMENT_ORIGIN, Deployment, ENV_VAR,
    PRODUCTION_ORIGIN,
};
pub use error::{ClientError, ClientResult};
pub use vehicles::VehicleService;
