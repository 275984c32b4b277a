//! Controladores
//!
//! Orquestan validación y repositorio para cada operación de la API.

pub mod vehicle_controller;
