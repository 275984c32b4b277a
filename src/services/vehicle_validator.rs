//! Validación de vehículos
//!
//! Reglas de negocio aplicadas a un payload JSON antes de persistir.
//! Todas las reglas se evalúan y los errores se acumulan por campo en un
//! `ValidationErrors`; nunca se corta en el primer fallo.
//!
//! Las reglas por campo son puras (`check_payload`). La unicidad del VIN
//! necesita el store y se añade al mismo `ValidationErrors` en
//! `validate_create` / `validate_update`.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

use crate::models::vehicle::{
    normalize_vin, FuelType, Vehicle, VehicleDraft, VehiclePatch, MAX_FUEL_TYPE_LENGTH,
    MAX_MODEL_YEAR, MAX_NAME_LENGTH, MIN_MODEL_YEAR, PRICE_DECIMAL_PLACES, PRICE_MAX_DIGITS,
    VIN_LENGTH,
};
use crate::repositories::VehicleStore;
use crate::utils::errors::{internal_error, validation_error, AppError, AppResult};
use crate::utils::validation::{
    coerce_decimal, coerce_integer, coerce_string, error_with_message, validate_decimal_precision,
    validate_enum, validate_exact_length, validate_max_length, validate_not_empty,
    validate_positive, validate_range,
};

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

fn parse_vin(value: &Value) -> Result<String, ValidationError> {
    // la longitud se mide sobre la forma normalizada: `ß` pasa a `SS`
    let vin = normalize_vin(&coerce_string(value)?);
    validate_exact_length(&vin, VIN_LENGTH, "VIN must be exactly 17 characters long.")?;
    Ok(vin)
}

fn parse_name(value: &Value) -> Result<String, ValidationError> {
    let name = coerce_string(value)?;
    validate_max_length(&name, MAX_NAME_LENGTH)?;
    Ok(name)
}

fn parse_model_year(value: &Value) -> Result<i32, ValidationError> {
    let year = coerce_integer(value)?;
    validate_range(
        year,
        MIN_MODEL_YEAR,
        MAX_MODEL_YEAR,
        "Model year must be between 1886 and 2100.",
    )?;
    Ok(year)
}

fn parse_purchase_price(value: &Value) -> Result<Decimal, ValidationError> {
    let mut price = coerce_decimal(value)?;
    validate_positive(price, "Purchase price must be greater than 0.")?;
    validate_decimal_precision(price, PRICE_MAX_DIGITS, PRICE_DECIMAL_PLACES)?;
    price.rescale(PRICE_DECIMAL_PLACES);
    Ok(price)
}

fn parse_fuel_type(value: &Value) -> Result<FuelType, ValidationError> {
    let raw = coerce_string(value)?;
    validate_max_length(&raw, MAX_FUEL_TYPE_LENGTH)?;

    let allowed: Vec<&str> = FuelType::ALL.iter().map(FuelType::as_str).collect();
    let message = format!(
        "Invalid fuel type '{}'. Allowed values are: {}.",
        raw,
        allowed.join(", ")
    );
    validate_enum(&raw.as_str(), &allowed, message.clone())?;

    raw.parse::<FuelType>()
        .map_err(|_| error_with_message("enum", message))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Recorre los campos de un objeto acumulando errores
struct PayloadChecker<'a> {
    object: &'a Map<String, Value>,
    partial: bool,
    errors: ValidationErrors,
}

impl<'a> PayloadChecker<'a> {
    fn new(object: &'a Map<String, Value>, partial: bool) -> Self {
        Self {
            object,
            partial,
            errors: ValidationErrors::new(),
        }
    }

    fn field<T>(
        &mut self,
        name: &'static str,
        parse: impl Fn(&Value) -> Result<T, ValidationError>,
    ) -> Option<T> {
        let Some(value) = self.object.get(name) else {
            if !self.partial {
                self.errors
                    .add(name, error_with_message("required", "This field is required."));
            }
            return None;
        };

        match validate_not_empty(name, value).and_then(|_| parse(value)) {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                self.errors.add(name, error);
                None
            }
        }
    }

    fn check(mut self) -> (VehiclePatch, ValidationErrors) {
        let patch = VehiclePatch {
            vin: self.field("vin", parse_vin),
            manufacturer_name: self.field("manufacturer_name", parse_name),
            description: self.field("description", coerce_string),
            horse_power: self.field("horse_power", coerce_integer),
            model_name: self.field("model_name", parse_name),
            model_year: self.field("model_year", parse_model_year),
            purchase_price: self.field("purchase_price", parse_purchase_price),
            fuel_type: self.field("fuel_type", parse_fuel_type),
        };
        (patch, self.errors)
    }
}

fn check_payload(payload: &Value, partial: bool) -> (VehiclePatch, ValidationErrors) {
    match payload {
        Value::Object(object) => PayloadChecker::new(object, partial).check(),
        other => {
            let mut errors = ValidationErrors::new();
            errors.add(
                NON_FIELD_ERRORS,
                error_with_message(
                    "invalid",
                    format!(
                        "Invalid data. Expected a dictionary, but got {}.",
                        json_kind(other)
                    ),
                ),
            );
            (VehiclePatch::default(), errors)
        }
    }
}

fn into_draft(patch: VehiclePatch) -> Option<VehicleDraft> {
    Some(VehicleDraft {
        vin: patch.vin?,
        manufacturer_name: patch.manufacturer_name?,
        description: patch.description?,
        horse_power: patch.horse_power?,
        model_name: patch.model_name?,
        model_year: patch.model_year?,
        purchase_price: patch.purchase_price?,
        fuel_type: patch.fuel_type?,
    })
}

const DUPLICATE_VIN_MESSAGE: &str = "vehicle with this vin already exists.";

fn duplicate_vin_error() -> ValidationError {
    error_with_message("unique", DUPLICATE_VIN_MESSAGE)
}

/// Error de validación para un VIN duplicado, también usado cuando la base
/// de datos detecta la colisión
pub fn duplicate_vin() -> AppError {
    validation_error("vin", DUPLICATE_VIN_MESSAGE)
}

async fn check_unique_vin(
    store: &dyn VehicleStore,
    vin: Option<&str>,
    exclude_id: Option<i64>,
    errors: &mut ValidationErrors,
) -> AppResult<()> {
    if let Some(vin) = vin {
        if store.vin_exists(vin, exclude_id).await? {
            errors.add("vin", duplicate_vin_error());
        }
    }
    Ok(())
}

/// Validación completa para crear: reglas de campo + unicidad del VIN
pub async fn validate_create(store: &dyn VehicleStore, payload: &Value) -> AppResult<VehicleDraft> {
    let (patch, mut errors) = check_payload(payload, false);
    check_unique_vin(store, patch.vin.as_deref(), None, &mut errors).await?;

    if !errors.errors().is_empty() {
        return Err(AppError::Validation(errors));
    }
    into_draft(patch).ok_or(AppError::Validation(errors))
}

/// Validación para actualizar: sólo se revisan los campos enviados y el
/// resultado se combina con el registro actual
pub async fn validate_update(
    store: &dyn VehicleStore,
    current: &Vehicle,
    payload: &Value,
) -> AppResult<VehicleDraft> {
    let (patch, mut errors) = check_payload(payload, true);
    check_unique_vin(store, patch.vin.as_deref(), Some(current.id), &mut errors).await?;

    if !errors.errors().is_empty() {
        return Err(AppError::Validation(errors));
    }

    patch.apply_to(current).map_err(|stored| {
        internal_error(&format!(
            "stored fuel type '{}' for vehicle {} is not valid",
            stored, current.vin
        ))
    })
}
