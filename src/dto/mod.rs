//! DTOs
//!
//! Filas del CSV de origen y estructuras de request/response de la API.

pub mod car_dto;
pub mod vehicle_row;
