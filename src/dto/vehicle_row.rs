use serde::Deserialize;

use crate::config::EmissionsConfig;
use crate::models::{BaselineSample, FuelKind, RawVehicleRecord};
use crate::utils::errors::EnrichmentError;

// Fila del CSV de origen, con los nombres de columna del informe de emisiones.
// Todas las celdas son texto opcional: la validación se hace en `into_record`
// para que una fila mala no tumbe la lectura completa.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleRow {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    #[serde(rename = "fuelType")]
    pub fuel_type: Option<String>,
    #[serde(rename = "mfg_emissions (MTCO_2e)")]
    pub mfg_emissions: Option<String>,
    #[serde(rename = "disposal_emissions (MTCO_2e)")]
    pub disposal_emissions: Option<String>,
    #[serde(rename = "co2TailpipeGpm")]
    pub co2_tailpipe_gpm: Option<String>,
    #[serde(rename = "grid_impact_(MTCO_2e / 100miles)")]
    pub grid_impact_100mi: Option<String>,
    /// MPG combinado
    pub comb08: Option<String>,
    /// kWh/100mi combinado
    #[serde(rename = "combE")]
    pub comb_e: Option<String>,
}

fn present(cell: &Option<String>) -> Option<&str> {
    cell.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required_text(cell: &Option<String>, field: &'static str) -> Result<String, EnrichmentError> {
    present(cell)
        .map(str::to_string)
        .ok_or(EnrichmentError::MissingField { field })
}

fn optional_number(cell: &Option<String>, field: &'static str) -> Result<Option<f64>, EnrichmentError> {
    match present(cell) {
        None => Ok(None),
        Some(raw) => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(EnrichmentError::InvalidValue {
                field,
                value: raw.to_string(),
            }),
        },
    }
}

fn required_number(cell: &Option<String>, field: &'static str) -> Result<f64, EnrichmentError> {
    optional_number(cell, field)?.ok_or(EnrichmentError::MissingField { field })
}

impl VehicleRow {
    /// Aporte de la fila al baseline, sin validar el resto de columnas.
    /// `None` si el combustible no está en la lista de combustión; una celda
    /// vacía o ilegible solo se omite de su propia media.
    pub fn baseline_sample(&self, config: &EmissionsConfig) -> Option<BaselineSample> {
        let fuel_type = present(&self.fuel_type)?;
        if !config.is_combustion_fuel(fuel_type) {
            return None;
        }
        Some(BaselineSample {
            mfg_emissions: optional_number(&self.mfg_emissions, "mfg_emissions (MTCO_2e)").ok().flatten(),
            tailpipe_co2_gpm: optional_number(&self.co2_tailpipe_gpm, "co2TailpipeGpm").ok().flatten(),
        })
    }

    /// Validar la fila y convertirla en un registro crudo.
    ///
    /// El término que no aplica al tipo de motor (escape en eléctricos, red en
    /// combustión) vale 0 si falta; el que aplica es obligatorio.
    pub fn into_record(self, config: &EmissionsConfig) -> Result<RawVehicleRecord, EnrichmentError> {
        let make = required_text(&self.make, "make")?;
        let model = required_text(&self.model, "model")?;
        let year_raw = required_text(&self.year, "year")?;
        let year = year_raw
            .parse::<i32>()
            .or_else(|_| {
                // pandas a veces exporta los años como "2021.0"
                year_raw
                    .parse::<f64>()
                    .ok()
                    .filter(|y| y.fract() == 0.0 && *y >= i32::MIN as f64 && *y <= i32::MAX as f64)
                    .map(|y| y as i32)
                    .ok_or(())
            })
            .map_err(|_| EnrichmentError::InvalidValue {
                field: "year",
                value: year_raw.clone(),
            })?;
        let fuel_type = required_text(&self.fuel_type, "fuelType")?;
        let kind = FuelKind::from_fuel_type(&fuel_type, &config.electric_fuel_type);

        let manufacturing_emissions = required_number(&self.mfg_emissions, "mfg_emissions (MTCO_2e)")?;
        let disposal_emissions = required_number(&self.disposal_emissions, "disposal_emissions (MTCO_2e)")?;
        let tailpipe = optional_number(&self.co2_tailpipe_gpm, "co2TailpipeGpm")?;
        let grid = optional_number(&self.grid_impact_100mi, "grid_impact_(MTCO_2e / 100miles)")?;

        let (tailpipe_co2_gpm, grid_impact_100mi, combined_efficiency) = match kind {
            FuelKind::Electric => (
                tailpipe.unwrap_or(0.0),
                grid.ok_or(EnrichmentError::MissingField {
                    field: "grid_impact_(MTCO_2e / 100miles)",
                })?,
                required_number(&self.comb_e, "combE")?,
            ),
            FuelKind::Combustion => (
                tailpipe.ok_or(EnrichmentError::MissingField { field: "co2TailpipeGpm" })?,
                grid.unwrap_or(0.0),
                required_number(&self.comb08, "comb08")?,
            ),
        };

        Ok(RawVehicleRecord {
            make,
            model,
            year,
            fuel_type,
            manufacturing_emissions,
            disposal_emissions,
            tailpipe_co2_gpm,
            grid_impact_100mi,
            combined_efficiency,
        })
    }
}
