//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de valores JSON a tipos del dominio. Cada función devuelve
//! un `ValidationError` con el mensaje listo para el cliente.

use std::borrow::Cow;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use validator::ValidationError;

/// Construir un `ValidationError` con código y mensaje
pub fn error_with_message(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// `null` o string vacío/solo espacios
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Validar que un valor no sea null ni esté vacío
pub fn validate_not_empty(field: &str, value: &Value) -> Result<(), ValidationError> {
    if is_blank(value) {
        let mut error = error_with_message("not_empty", format!("{} cannot be null or empty.", field));
        error.add_param("field".into(), &field.to_string());
        return Err(error);
    }
    Ok(())
}

/// Convertir a string recortado. Se aceptan números, como hace cualquier
/// cliente de formulario que no distingue tipos.
pub fn coerce_string(value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(error_with_message("invalid", "Not a valid string.")),
    }
}

/// Convertir a entero de 32 bits
pub fn coerce_integer(value: &Value) -> Result<i32, ValidationError> {
    let invalid = || error_with_message("invalid", "A valid integer is required.");

    let parsed: Option<i64> = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.fract() == 0.0 && f.is_finite())
                    .map(|f| f as i64)
            })
        }
        _ => None,
    };

    parsed
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(invalid)
}

/// Convertir a decimal. Los números JSON llegan como f64; su representación
/// textual es la que se parsea para no arrastrar error binario.
pub fn coerce_decimal(value: &Value) -> Result<Decimal, ValidationError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(error_with_message("invalid", "A valid number is required.")),
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| error_with_message("invalid", "A valid number is required."))
}

/// Validar longitud exacta
pub fn validate_exact_length(
    value: &str,
    expected: usize,
    message: impl Into<Cow<'static, str>>,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len != expected {
        let mut error = error_with_message("length", message);
        error.add_param("equal".into(), &expected);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Validar longitud máxima
pub fn validate_max_length(value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        let mut error = error_with_message(
            "max_length",
            format!("Ensure this field has no more than {} characters.", max),
        );
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico (inclusivo)
pub fn validate_range<T: PartialOrd + std::fmt::Display + Serialize>(
    value: T,
    min: T,
    max: T,
    message: impl Into<Cow<'static, str>>,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = error_with_message("range", message);
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea estrictamente positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
    message: impl Into<Cow<'static, str>>,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = error_with_message("positive", message);
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar precisión de un decimal: `max_digits` en total y
/// `decimal_places` fraccionarios. Los ceros a la derecha no cuentan.
pub fn validate_decimal_precision(
    value: Decimal,
    max_digits: u32,
    decimal_places: u32,
) -> Result<(), ValidationError> {
    let normalized = value.normalize();
    let scale = normalized.scale();
    let digits = normalized.mantissa().unsigned_abs().to_string().len() as u32;
    let total = digits.max(scale);
    let whole = total - scale;

    if total > max_digits {
        return Err(error_with_message(
            "max_digits",
            format!("Ensure that there are no more than {} digits in total.", max_digits),
        ));
    }
    if scale > decimal_places {
        return Err(error_with_message(
            "decimal_places",
            format!(
                "Ensure that there are no more than {} decimal places.",
                decimal_places
            ),
        ));
    }
    if whole > max_digits - decimal_places {
        return Err(error_with_message(
            "max_whole_digits",
            format!(
                "Ensure that there are no more than {} digits before the decimal point.",
                max_digits - decimal_places
            ),
        ));
    }
    Ok(())
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_enum<T: PartialEq + std::fmt::Display>(
    value: &T,
    allowed_values: &[T],
    message: impl Into<Cow<'static, str>>,
) -> Result<(), ValidationError> {
    if !allowed_values.contains(value) {
        let mut error = error_with_message("enum", message);
        error.add_param("value".into(), &value.to_string());
        error.add_param(
            "allowed_values".into(),
            &allowed_values.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
        );
        return Err(error);
    }
    Ok(())
}
