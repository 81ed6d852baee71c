//! Estimación del baseline de combustión
//!
//! Calcula, sobre todos los vehículos de combustión del dataset, la media de
//! emisiones de fabricación y la media de emisiones operativas por milla.

use tracing::{info, warn};

use crate::config::EmissionsConfig;
use crate::models::{Baseline, BaselineSample, RawVehicleRecord};
use crate::utils::errors::EnrichmentError;

/// Gramos por tonelada métrica
pub const GRAMS_PER_TON: f64 = 1_000_000.0;

pub struct BaselineEstimator<'a> {
    config: &'a EmissionsConfig,
}

impl<'a> BaselineEstimator<'a> {
    pub fn new(config: &'a EmissionsConfig) -> Self {
        Self { config }
    }

    /// Estimar el baseline. Un dataset sin vehículos de combustión
    /// (p. ej. solo eléctricos) devuelve `UndefinedBaseline`.
    pub fn estimate(&self, records: &[RawVehicleRecord]) -> Result<Baseline, EnrichmentError> {
        let samples: Vec<BaselineSample> = records
            .iter()
            .filter(|r| self.config.is_combustion_fuel(&r.fuel_type))
            .map(|r| BaselineSample {
                mfg_emissions: Some(r.manufacturing_emissions),
                tailpipe_co2_gpm: Some(r.tailpipe_co2_gpm),
            })
            .collect();
        self.estimate_from_samples(&samples)
    }

    /// Media por columna sobre muestras ya filtradas a combustión.
    /// Las celdas ausentes no cuentan en el divisor de su columna.
    pub fn estimate_from_samples(&self, samples: &[BaselineSample]) -> Result<Baseline, EnrichmentError> {
        let mfg = mean(samples.iter().filter_map(|s| s.mfg_emissions));
        let op = mean(samples.iter().filter_map(|s| s.tailpipe_co2_gpm.map(|g| g / GRAMS_PER_TON)));

        let (Some((mfg_count, avg_mfg)), Some((op_count, avg_op))) = (mfg, op) else {
            warn!("⚠️ No hay vehículos de combustión utilizables en {} muestras", samples.len());
            return Err(EnrichmentError::UndefinedBaseline);
        };

        let baseline = Baseline::new(avg_mfg, avg_op);
        info!(
            "📏 Baseline sobre {} vehículos de combustión ({} con fabricación, {} con escape): fabricación={:.3} t, operación={:.6} t/milla",
            samples.len(), mfg_count, op_count, baseline.avg_mfg_emissions, baseline.avg_op_emissions_per_mile
        );
        Ok(baseline)
    }

    /// Baseline configurado si existe; si no, estimado del dataset
    pub fn resolve(&self, records: &[RawVehicleRecord]) -> Result<Baseline, EnrichmentError> {
        match self.configured() {
            Some(baseline) => Ok(baseline),
            None => self.estimate(records),
        }
    }

    /// Igual que `resolve`, a partir de muestras crudas
    pub fn resolve_samples(&self, samples: &[BaselineSample]) -> Result<Baseline, EnrichmentError> {
        match self.configured() {
            Some(baseline) => Ok(baseline),
            None => self.estimate_from_samples(samples),
        }
    }

    fn configured(&self) -> Option<Baseline> {
        let baseline = self.config.baseline_override?;
        info!("📏 Usando baseline configurado: {:?}", baseline);
        Some(baseline)
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<(usize, f64)> {
    let (count, sum) = values.fold((0usize, 0.0f64), |(n, sum), v| (n + 1, sum + v));
    (count > 0).then(|| (count, sum / count as f64))
}
