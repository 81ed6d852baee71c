//! Modelo de Vehicle
//!
//! Este módulo contiene el registro crudo de un vehículo (tal como llega del
//! dataset de origen) y el registro enriquecido con las métricas de ciclo de vida.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tipo de motorización, determinado una sola vez por registro
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FuelKind {
    Electric,
    Combustion,
}

impl FuelKind {
    /// Clasificar un `fuelType` del dataset. Solo la igualdad exacta con la
    /// etiqueta eléctrica produce `Electric`.
    pub fn from_fuel_type(fuel_type: &str, electric_label: &str) -> Self {
        if fuel_type == electric_label {
            FuelKind::Electric
        } else {
            FuelKind::Combustion
        }
    }

    /// Unidad de la eficiencia combinada
    pub fn efficiency_unit(&self) -> &'static str {
        match self {
            FuelKind::Electric => "kWh/100mi",
            FuelKind::Combustion => "MPG",
        }
    }
}

/// Riesgo de greenwashing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GreenwashRisk {
    Low,
    Medium,
    High,
}

impl GreenwashRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            GreenwashRisk::Low => "Low",
            GreenwashRisk::Medium => "Medium",
            GreenwashRisk::High => "High",
        }
    }
}

impl fmt::Display for GreenwashRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehículo crudo ya validado. Todas las emisiones en toneladas métricas CO2e,
/// salvo `tailpipe_co2_gpm` (gramos por milla).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVehicleRecord {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub fuel_type: String,
    pub manufacturing_emissions: f64,
    pub disposal_emissions: f64,
    pub tailpipe_co2_gpm: f64,
    /// Toneladas CO2e por cada 100 millas
    pub grid_impact_100mi: f64,
    /// MPG para combustión, kWh/100mi para eléctricos
    pub combined_efficiency: f64,
}

/// Vehículo enriquecido - es lo que consume la API de consulta.
/// Los nombres serializados coinciden con el JSON exportado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedVehicleRecord {
    pub make: String,
    pub model: String,
    pub model_year: i32,
    #[serde(rename = "fuelType")]
    pub fuel_type: String,
    pub total_lifecycle_tons: f64,
    pub annual_avg_tons: f64,
    pub ten_year_op_tons: f64,
    pub fuel_efficiency: String,
    pub breakeven_year: f64,
    pub trees_needed: u64,
    pub tailpipe_co2: f64,
    pub manufacturing_emission: f64,
    pub disposal_emission: f64,
    pub grid_100mi: f64,
    pub combined_efficiency: f64,
    pub greenwash_risk: GreenwashRisk,
}

impl EnrichedVehicleRecord {
    /// Identificador legible `make-model-year`
    pub fn slug(&self) -> String {
        format!("{}-{}-{}", self.make, self.model, self.model_year)
    }
}
