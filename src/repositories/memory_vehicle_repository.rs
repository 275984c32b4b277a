//! Store de vehículos en memoria
//!
//! Se usa en tests y cuando no hay `DATABASE_URL`. Los datos se pierden al
//! reiniciar el proceso.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::vehicle::{Vehicle, VehicleDraft};
use crate::repositories::VehicleStore;
use crate::services::vehicle_validator::duplicate_vin;
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Vehicle>,
}

impl Table {
    fn vin_taken(&self, vin: &str, exclude_id: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|v| v.vin.eq_ignore_ascii_case(vin) && Some(v.id) != exclude_id)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryVehicleRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleRepository {
    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_vin(&self, vin: &str) -> AppResult<Option<Vehicle>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|v| v.vin == vin).cloned())
    }

    async fn vin_exists(&self, vin: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let table = self.table.read().await;
        Ok(table.vin_taken(vin, exclude_id))
    }

    async fn insert(&self, draft: VehicleDraft) -> AppResult<Vehicle> {
        let mut table = self.table.write().await;
        // revalidar bajo el lock de escritura
        if table.vin_taken(&draft.vin, None) {
            return Err(duplicate_vin());
        }

        table.next_id += 1;
        let vehicle = draft.into_vehicle(table.next_id);
        table.rows.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, id: i64, draft: VehicleDraft) -> AppResult<Vehicle> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }
        if table.vin_taken(&draft.vin, Some(id)) {
            return Err(duplicate_vin());
        }

        let vehicle = draft.into_vehicle(id);
        table.rows.insert(id, vehicle.clone());
        Ok(vehicle)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}
