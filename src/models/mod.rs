//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del dataset de vehículos:
//! registros crudos, registros enriquecidos y el baseline de combustión.

pub mod baseline;
pub mod vehicle;

pub use baseline::{Baseline, BaselineSample};
pub use vehicle::{EnrichedVehicleRecord, FuelKind, GreenwashRisk, RawVehicleRecord};
