//! Repositorios
//!
//! Acceso a datos de vehículos. Los controladores dependen del trait
//! `VehicleStore`, no de una implementación concreta, para poder usar
//! PostgreSQL en producción y un store en memoria en tests.

pub mod memory_vehicle_repository;
pub mod vehicle_repository;

use async_trait::async_trait;

use crate::models::vehicle::{Vehicle, VehicleDraft};
use crate::utils::errors::AppResult;

pub use memory_vehicle_repository::InMemoryVehicleRepository;
pub use vehicle_repository::PgVehicleRepository;

/// Store de vehículos con el VIN (en mayúsculas) como clave única
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Todos los vehículos, ordenados por id
    async fn list(&self) -> AppResult<Vec<Vehicle>>;

    /// `vin` debe venir ya normalizado
    async fn find_by_vin(&self, vin: &str) -> AppResult<Option<Vehicle>>;

    async fn vin_exists(&self, vin: &str, exclude_id: Option<i64>) -> AppResult<bool>;

    async fn insert(&self, draft: VehicleDraft) -> AppResult<Vehicle>;

    async fn update(&self, id: i64, draft: VehicleDraft) -> AppResult<Vehicle>;

    /// `false` si no existía
    async fn delete(&self, id: i64) -> AppResult<bool>;
}
