//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle, el tipo de combustible y los
//! conjuntos de campos ya validados que se entregan al repositorio.
//! Mapea exactamente a la tabla `vehicles` con primary key `id`.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Longitud exacta de un VIN
pub const VIN_LENGTH: usize = 17;

/// Año del primer automóvil (Benz Patent-Motorwagen)
pub const MIN_MODEL_YEAR: i32 = 1886;
pub const MAX_MODEL_YEAR: i32 = 2100;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_FUEL_TYPE_LENGTH: usize = 50;

/// NUMERIC(10, 2)
pub const PRICE_MAX_DIGITS: u32 = 10;
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Forma canónica de un VIN: mayúsculas. Se aplica antes de guardar y
/// antes de cualquier búsqueda.
pub fn normalize_vin(vin: &str) -> String {
    vin.trim().to_uppercase()
}

/// Tipo de combustible permitido
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [
        FuelType::Gasoline,
        FuelType::Diesel,
        FuelType::Electric,
        FuelType::Hybrid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "Gasoline",
            FuelType::Diesel => "Diesel",
            FuelType::Electric => "Electric",
            FuelType::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FuelType {
    type Err = String;

    /// Coincidencia exacta, sensible a mayúsculas
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelType::ALL
            .iter()
            .copied()
            .find(|fuel| fuel.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Vehicle {
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

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) - {}",
            self.manufacturer_name, self.model_name, self.model_year, self.vin
        )
    }
}

/// Conjunto completo de campos validados y normalizados, listo para
/// insertar o reemplazar una fila.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDraft {
    pub vin: String,
    pub manufacturer_name: String,
    pub description: String,
    pub horse_power: i32,
    pub model_name: String,
    pub model_year: i32,
    pub purchase_price: Decimal,
    pub fuel_type: FuelType,
}

impl VehicleDraft {
    pub fn into_vehicle(self, id: i64) -> Vehicle {
        Vehicle {
            id,
            vin: self.vin,
            manufacturer_name: self.manufacturer_name,
            description: self.description,
            horse_power: self.horse_power,
            model_name: self.model_name,
            model_year: self.model_year,
            purchase_price: self.purchase_price,
            fuel_type: self.fuel_type.to_string(),
        }
    }
}

/// Campos validados de una actualización parcial. `None` = no enviado.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehiclePatch {
    pub vin: Option<String>,
    pub manufacturer_name: Option<String>,
    pub description: Option<String>,
    pub horse_power: Option<i32>,
    pub model_name: Option<String>,
    pub model_year: Option<i32>,
    pub purchase_price: Option<Decimal>,
    pub fuel_type: Option<FuelType>,
}

impl VehiclePatch {
    /// Combinar con el registro actual. Un `fuel_type` guardado que ya no
    /// fuese válido se rechaza al reconstruir el draft.
    pub fn apply_to(self, current: &Vehicle) -> Result<VehicleDraft, String> {
        let fuel_type = match self.fuel_type {
            Some(fuel) => fuel,
            None => current.fuel_type.parse::<FuelType>()?,
        };

        Ok(VehicleDraft {
            vin: self.vin.unwrap_or_else(|| current.vin.clone()),
            manufacturer_name: self
                .manufacturer_name
                .unwrap_or_else(|| current.manufacturer_name.clone()),
            description: self.description.unwrap_or_else(|| current.description.clone()),
            horse_power: self.horse_power.unwrap_or(current.horse_power),
            model_name: self.model_name.unwrap_or_else(|| current.model_name.clone()),
            model_year: self.model_year.unwrap_or(current.model_year),
            purchase_price: self.purchase_price.unwrap_or(current.purchase_price),
            fuel_type,
        })
    }
}
