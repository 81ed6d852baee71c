//! Baseline del "coche de gasolina típico"

use serde::{Deserialize, Serialize};

/// Valores de referencia de la población de vehículos de combustión.
/// Se calcula una vez por ejecución y no se modifica después.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// Media de emisiones de fabricación (toneladas CO2e)
    pub avg_mfg_emissions: f64,
    /// Media de emisiones operativas (toneladas CO2e por milla)
    pub avg_op_emissions_per_mile: f64,
}

impl Baseline {
    pub fn new(avg_mfg_emissions: f64, avg_op_emissions_per_mile: f64) -> Self {
        Self {
            avg_mfg_emissions,
            avg_op_emissions_per_mile,
        }
    }
}

/// Aporte de un vehículo de combustión al baseline. Cada columna se promedia
/// por separado: una celda ausente solo se omite de su propia media.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BaselineSample {
    pub mfg_emissions: Option<f64>,
    pub tailpipe_co2_gpm: Option<f64>,
}
