use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::vehicle::Vehicle;

// Response de vehículo. `purchase_price` se serializa como string ("22000.00")
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VehicleResponse {
    pub id: i64,
    pub vin: String,
    pub manufacturer_name: String,
    pub description: String,
    pub horse_power: i32,
    pub model_name: String,
    pub model_year: i32,
    pub purchase_price: Decimal,
    pub fuel_type: String,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            vin: vehicle.vin,
            manufacturer_name: vehicle.manufacturer_name,
            description: vehicle.description,
            horse_power: vehicle.horse_power,
            model_name: vehicle.model_name,
            model_year: vehicle.model_year,
            purchase_price: vehicle.purchase_price,
            fuel_type: vehicle.fuel_type,
        }
    }
}

// Response del health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}
