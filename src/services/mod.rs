//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: las reglas
//! de validación de vehículos.

pub mod vehicle_validator;
