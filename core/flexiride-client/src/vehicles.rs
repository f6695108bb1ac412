//! Vehicle catalog endpoints.

use crate::auth::AuthClient;
use crate::error::ClientResult;
use flexiride_types::{Vehicle, VehicleFilterParams, VehicleId, VehicleUpdate};
use std::sync::Arc;
use tracing::info;

/// Typed access to `/vehicles`.
#[derive(Debug, Clone)]
pub struct VehicleService {
    auth: Arc<AuthClient>,
}

impl VehicleService {
    pub fn new(auth: Arc<AuthClient>) -> Self {
        Self { auth }
    }

    /// Lists the whole catalog.
    pub async fn list(&self) -> ClientResult<Vec<Vehicle>> {
        self.auth.api_client().get("vehicles", "fetch vehicles").await
    }

    /// Fetches one vehicle.
    pub async fn get(&self, id: VehicleId) -> ClientResult<Vehicle> {
        self.auth
            .api_client()
            .get(&format!("vehicles/{id}"), "fetch vehicle")
            .await
    }

    /// Runs a server-side catalog filter.
    pub async fn filter(&self, params: &VehicleFilterParams) -> ClientResult<Vec<Vehicle>> {
        self.auth
            .api_client()
            .post("vehicles/filter", params, "filter vehicles")
            .await
    }

    /// Adds a vehicle. Requires an admin session.
    pub async fn create(&self, vehicle: &VehicleUpdate) -> ClientResult<Vehicle> {
        let created: Vehicle = self
            .auth
            .api_client()
            .post("vehicles/create", vehicle, "create vehicle")
            .await?;
        info!("Created vehicle {} ({})", created.id, created.name);
        Ok(created)
    }

    /// Replaces a vehicle's details. Requires an admin session.
    pub async fn update(&self, id: VehicleId, vehicle: &VehicleUpdate) -> ClientResult<Vehicle> {
        self.auth
            .api_client()
            .post(&format!("vehicles/edit/{id}"), vehicle, "update vehicle")
            .await
    }

    /// Removes a vehicle and returns it. Requires an admin session.
    pub async fn delete(&self, id: VehicleId) -> ClientResult<Vehicle> {
        let deleted: Vehicle = self
            .auth
            .api_client()
            .delete(&format!("vehicles/delete/{id}"), "delete vehicle")
            .await?;
        info!("Deleted vehicle {}", id);
        Ok(deleted)
    }
}
