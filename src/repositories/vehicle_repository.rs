use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::vehicle::{Vehicle, VehicleDraft};
use crate::repositories::VehicleStore;
use crate::services::vehicle_validator::duplicate_vin;
use crate::utils::errors::AppError;

const UNIQUE_VIOLATION: &str = "23505";

/// Mapear errores de escritura: la violación del índice único sobre el VIN
/// es un error de validación, no de base de datos
fn map_write_error(e: sqlx::Error, action: &str) -> AppError {
    if let sqlx::Error::Database(db_error) = &e {
        if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return duplicate_vin();
        }
    }
    tracing::error!("❌ Error {} vehicle: {}", action, e);
    AppError::Database(e)
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for PgVehicleRepository {
    async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    async fn find_by_vin(&self, vin: &str) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE vin = $1")
            .bind(vin)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn vin_exists(&self, vin: &str, exclude_id: Option<i64>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE UPPER(vin) = UPPER($1) AND ($2::BIGINT IS NULL OR id <> $2))"
        )
        .bind(vin)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    async fn insert(&self, draft: VehicleDraft) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (vin, manufacturer_name, description, horse_power, model_name, model_year, purchase_price, fuel_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#
        )
        .bind(draft.vin)
        .bind(draft.manufacturer_name)
        .bind(draft.description)
        .bind(draft.horse_power)
        .bind(draft.model_name)
        .bind(draft.model_year)
        .bind(draft.purchase_price)
        .bind(draft.fuel_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "creating"))?;

        Ok(vehicle)
    }

    async fn update(&self, id: i64, draft: VehicleDraft) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET vin = $2, manufacturer_name = $3, description = $4, horse_power = $5,
                model_name = $6, model_year = $7, purchase_price = $8, fuel_type = $9
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(draft.vin)
        .bind(draft.manufacturer_name)
        .bind(draft.description)
        .bind(draft.horse_power)
        .bind(draft.model_name)
        .bind(draft.model_year)
        .bind(draft.purchase_price)
        .bind(draft.fuel_type.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "updating"))?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        Ok(vehicle)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
