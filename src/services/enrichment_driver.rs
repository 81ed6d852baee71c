//! Driver de enriquecimiento del dataset
//!
//! Estima el baseline una sola vez y aplica el enriquecimiento a cada registro
//! de forma independiente. La salida conserva el orden y la cardinalidad de la
//! entrada; en modo paralelo también (rayon recoge por índice).

use std::collections::BTreeMap;

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::EmissionsConfig;
use crate::dto::vehicle_row::VehicleRow;
use crate::models::{Baseline, EnrichedVehicleRecord, RawVehicleRecord};
use crate::services::baseline_estimator::BaselineEstimator;
use crate::services::vehicle_enricher::VehicleEnricher;
use crate::utils::errors::EnrichmentError;

/// Fila descartada durante la validación
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RejectedRow {
    /// Posición en la entrada (0-based, sin cabecera)
    pub index: usize,
    pub make: Option<String>,
    pub model: Option<String>,
    pub reason: String,
}

/// Resultado de una ejecución completa
#[derive(Debug, Clone)]
pub struct EnrichmentReport {
    pub baseline: Baseline,
    pub records: Vec<EnrichedVehicleRecord>,
    pub rejected: Vec<RejectedRow>,
}

impl EnrichmentReport {
    /// Conteo por categoría de riesgo
    pub fn risk_summary(&self) -> BTreeMap<&'static str, usize> {
        let mut summary = BTreeMap::new();
        for record in &self.records {
            *summary.entry(record.greenwash_risk.as_str()).or_insert(0) += 1;
        }
        summary
    }
}

pub struct EnrichmentDriver {
    config: EmissionsConfig,
}

impl EnrichmentDriver {
    pub fn new(config: EmissionsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmissionsConfig {
        &self.config
    }

    /// Map puro: un registro enriquecido por registro crudo, mismo orden
    pub fn enrich_all(
        &self,
        records: &[RawVehicleRecord],
        baseline: Baseline,
    ) -> Vec<EnrichedVehicleRecord> {
        let enricher = VehicleEnricher::new(&self.config, baseline);
        if self.config.parallel {
            records.par_iter().map(|r| enricher.enrich(r)).collect()
        } else {
            records.iter().map(|r| enricher.enrich(r)).collect()
        }
    }

    /// Baseline (una vez) + enriquecimiento de todos los registros
    pub fn run(
        &self,
        records: &[RawVehicleRecord],
    ) -> Result<(Baseline, Vec<EnrichedVehicleRecord>), EnrichmentError> {
        let baseline = BaselineEstimator::new(&self.config).resolve(records)?;
        Ok((baseline, self.enrich_all(records, baseline)))
    }

    /// Validar filas del CSV, descartar las malas y enriquecer el resto.
    /// Una fila mala nunca aborta el lote.
    pub fn run_rows<I>(&self, rows: I) -> Result<EnrichmentReport, EnrichmentError>
    where
        I: IntoIterator<Item = Result<VehicleRow, EnrichmentError>>,
    {
        let mut valid = Vec::new();
        let mut samples = Vec::new();
        let mut rejected = Vec::new();

        for (index, row) in rows.into_iter().enumerate() {
            let (make, model, result) = match row {
                Ok(row) => {
                    samples.extend(row.baseline_sample(&self.config));
                    let make = row.make.clone();
                    let model = row.model.clone();
                    (make, model, row.into_record(&self.config))
                }
                Err(e) => (None, None, Err(e)),
            };
            match result {
                Ok(record) => valid.push(record),
                Err(e) => {
                    warn!("⚠️ Fila {} descartada ({:?} {:?}): {}", index, make, model, e);
                    rejected.push(RejectedRow {
                        index,
                        make,
                        model,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "🔄 Enriqueciendo {} vehículos ({} filas descartadas)",
            valid.len(),
            rejected.len()
        );

        // El baseline usa todas las filas de combustión, incluidas las
        // descartadas por columnas que no intervienen en él.
        let baseline = BaselineEstimator::new(&self.config).resolve_samples(&samples)?;
        let records = self.enrich_all(&valid, baseline);
        let report = EnrichmentReport {
            baseline,
            records,
            rejected,
        };

        info!("📊 Riesgo de greenwashing: {:?}", report.risk_summary());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GreenwashRisk;

    fn raw(make: &str, fuel_type: &str, mfg: f64, tailpipe: f64, grid: f64, eff: f64) -> RawVehicleRecord {
        RawVehicleRecord {
            make: make.to_string(),
            model: "X".to_string(),
            year: 2022,
            fuel_type: fuel_type.to_string(),
            manufacturing_emissions: mfg,
            disposal_emissions: 0.5,
            tailpipe_co2_gpm: tailpipe,
            grid_impact_100mi: grid,
            combined_efficiency: eff,
        }
    }

    fn fleet() -> Vec<RawVehicleRecord> {
        vec![
            raw("Nissan", "Electricity", 8.0, 0.0, 0.025, 30.0),
            raw("Toyota", "Regular", 5.0, 300.0, 0.0, 32.0),
            raw("Rivian", "Electricity", 14.0, 0.0, 0.025, 45.0),
            raw("Ford", "Premium", 7.0, 400.0, 0.0, 16.0),
            raw("Kia", "Electricity", 11.0, 0.0, 0.025, 29.0),
        ]
    }

    #[test]
    fn test_order_and_cardinality_preserved() {
        let driver = EnrichmentDriver::new(EmissionsConfig::default());
        let input = fleet();
        let (baseline, output) = driver.run(&input).unwrap();

        assert_eq!(baseline, Baseline::new(6.0, 0.00035));
        assert_eq!(output.len(), input.len());
        let makes: Vec<&str> = output.iter().map(|r| r.make.as_str()).collect();
        assert_eq!(makes, vec!["Nissan", "Toyota", "Rivian", "Ford", "Kia"]);

        let risks: Vec<GreenwashRisk> = output.iter().map(|r| r.greenwash_risk).collect();
        assert_eq!(
            risks,
            vec![
                GreenwashRisk::Low,
                GreenwashRisk::Low,
                GreenwashRisk::High,
                GreenwashRisk::High,
                GreenwashRisk::Medium
            ]
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let input: Vec<RawVehicleRecord> = (0..500)
            .map(|i| raw(&format!("Make{}", i), if i % 3 == 0 { "Electricity" } else { "Regular" }, 5.0 + (i % 10) as f64, if i % 3 == 0 { 0.0 } else { 250.0 + i as f64 }, if i % 3 == 0 { 0.02 } else { 0.0 }, 15.0 + (i % 20) as f64))
            .collect();

        let sequential = EnrichmentDriver::new(EmissionsConfig::default()).run(&input).unwrap();
        let parallel = EnrichmentDriver::new(EmissionsConfig {
            parallel: true,
            ..EmissionsConfig::default()
        })
        .run(&input)
        .unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_rerun_is_identical() {
        let driver = EnrichmentDriver::new(EmissionsConfig::default());
        let input = fleet();
        let first = serde_json::to_string(&driver.run(&input).unwrap().1).unwrap();
        let second = serde_json::to_string(&driver.run(&input).unwrap().1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invariants_hold_for_every_record() {
        let driver = EnrichmentDriver::new(EmissionsConfig::default());
        let input = fleet();
        let (_, output) = driver.run(&input).unwrap();

        for (raw, out) in input.iter().zip(&output) {
            assert!(out.breakeven_year >= 0.0);
            let ten_year = VehicleEnricher::operational_rate(raw) * 120_000.0;
            let expected_total = raw.manufacturing_emissions + raw.disposal_emissions + ten_year;
            assert_eq!(out.total_lifecycle_tons, (expected_total * 100.0).round() / 100.0);
            let expected_trees = (expected_total / 10.0 / 0.022).round() as u64;
            assert_eq!(out.trees_needed, expected_trees);
        }
    }

    #[test]
    fn test_bad_rows_are_flagged_not_fatal() {
        let driver = EnrichmentDriver::new(EmissionsConfig::default());
        let good = VehicleRow {
            make: Some("Toyota".to_string()),
            model: Some("Corolla".to_string()),
            year: Some("2021".to_string()),
            fuel_type: Some("Regular".to_string()),
            mfg_emissions: Some("6.0".to_string()),
            disposal_emissions: Some("0.4".to_string()),
            co2_tailpipe_gpm: Some("350".to_string()),
            grid_impact_100mi: None,
            comb08: Some("33".to_string()),
            comb_e: None,
        };
        let missing_mfg = VehicleRow {
            make: Some("Mystery".to_string()),
            mfg_emissions: None,
            ..good.clone()
        };

        let report = driver
            .run_rows(vec![
                Ok(good.clone()),
                Ok(missing_mfg),
                Err(EnrichmentError::InvalidValue {
                    field: "row",
                    value: "truncated".to_string(),
                }),
                Ok(good),
            ])
            .unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].index, 1);
        assert_eq!(report.rejected[0].make.as_deref(), Some("Mystery"));
        assert_eq!(report.rejected[1].index, 2);
        assert_eq!(report.risk_summary().get("Low"), Some(&2));
    }

    #[test]
    fn test_all_electric_without_override_fails() {
        let driver = EnrichmentDriver::new(EmissionsConfig::default());
        let input = vec![raw("Tesla", "Electricity", 10.0, 0.0, 0.03, 28.0)];
        assert_eq!(driver.run(&input), Err(EnrichmentError::UndefinedBaseline));
    }

    #[test]
    fn test_rejected_combustion_row_still_counts_in_baseline() {
        let driver = EnrichmentDriver::new(EmissionsConfig::default());
        let row = |fuel: &str, mfg: &str, tailpipe: &str, grid: &str, comb08: &str, comb_e: &str| VehicleRow {
            make: Some(fuel.to_string()),
            model: Some("X".to_string()),
            year: Some("2022".to_string()),
            fuel_type: Some(fuel.to_string()),
            mfg_emissions: Some(mfg.to_string()),
            disposal_emissions: Some("0.5".to_string()),
            co2_tailpipe_gpm: Some(tailpipe.to_string()),
            grid_impact_100mi: Some(grid.to_string()),
            comb08: Some(comb08.to_string()),
            comb_e: Some(comb_e.to_string()),
        };

        let report = driver
            .run_rows(vec![
                Ok(row("Regular", "5.0", "300", "0", "", "0")),
                Ok(row("Premium", "7.0", "400", "0", "30", "0")),
                Ok(row("Electricity", "8.0", "0", "0.025", "130", "25")),
            ])
            .unwrap();

        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].index, 0);
        assert!((report.baseline.avg_mfg_emissions - 6.0).abs() < 1e-12);
        assert!((report.baseline.avg_op_emissions_per_mile - 0.00035).abs() < 1e-12);

        let tesla = &report.records[1];
        assert_eq!(tesla.fuel_type, "Electricity");
        assert_eq!(tesla.breakeven_year, 1.7);
        assert_eq!(tesla.greenwash_risk, GreenwashRisk::Low);
    }
}
