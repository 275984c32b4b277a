use std::sync::Arc;

use serde_json::Value;

use crate::dto::vehicle_dto::VehicleResponse;
use crate::models::vehicle::{normalize_vin, Vehicle};
use crate::repositories::VehicleStore;
use crate::services::vehicle_validator;
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleController {
    repository: Arc<dyn VehicleStore>,
}

impl VehicleController {
    pub fn new(repository: Arc<dyn VehicleStore>) -> Self {
        Self { repository }
    }

    async fn find_existing(&self, vin: &str) -> Result<Vehicle, AppError> {
        let vin = normalize_vin(vin);
        self.repository
            .find_by_vin(&vin)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &vin))
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.list().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn create(&self, payload: Value) -> Result<VehicleResponse, AppError> {
        let draft = vehicle_validator::validate_create(self.repository.as_ref(), &payload).await?;
        let vehicle = self.repository.insert(draft).await?;

        tracing::info!("✅ Vehículo creado: {}", vehicle);
        Ok(vehicle.into())
    }

    pub async fn get_by_vin(&self, vin: &str) -> Result<VehicleResponse, AppError> {
        let vehicle = self.find_existing(vin).await?;
        Ok(vehicle.into())
    }

    pub async fn update(&self, vin: &str, payload: Value) -> Result<VehicleResponse, AppError> {
        let current = self.find_existing(vin).await?;
        let draft =
            vehicle_validator::validate_update(self.repository.as_ref(), &current, &payload).await?;
        let vehicle = self.repository.update(current.id, draft).await?;

        tracing::info!("✅ Vehículo actualizado: {}", vehicle);
        Ok(vehicle.into())
    }

    pub async fn delete(&self, vin: &str) -> Result<(), AppError> {
        let vehicle = self.find_existing(vin).await?;

        if !self.repository.delete(vehicle.id).await? {
            // borrado concurrente entre la búsqueda y el DELETE
            return Err(not_found_error("Vehicle", &vehicle.vin));
        }

        tracing::info!("🗑️ Vehículo eliminado: {}", vehicle);
        Ok(())
    }
}
