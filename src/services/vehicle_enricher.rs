//! Enriquecimiento por vehículo
//!
//! A partir de un registro crudo y del baseline compartido calcula las
//! métricas de ciclo de vida: emisiones operativas a 10 años, total, media
//! anual, equivalencia en árboles, año de amortización frente al coche de
//! gasolina típico y riesgo de greenwashing.
//!
//! Los valores intermedios se calculan sin redondear; el redondeo se aplica
//! una sola vez al ensamblar el registro de salida.

use crate::config::{EmissionsConfig, RiskThresholds};
use crate::models::{Baseline, EnrichedVehicleRecord, FuelKind, GreenwashRisk, RawVehicleRecord};
use crate::services::baseline_estimator::GRAMS_PER_TON;
use crate::utils::rounding::{format_number, round_to};

pub struct VehicleEnricher<'a> {
    config: &'a EmissionsConfig,
    baseline: Baseline,
}

impl<'a> VehicleEnricher<'a> {
    pub fn new(config: &'a EmissionsConfig, baseline: Baseline) -> Self {
        Self { config, baseline }
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    /// Toneladas CO2e por milla: escape + red. No depende del tipo de motor.
    pub fn operational_rate(record: &RawVehicleRecord) -> f64 {
        record.tailpipe_co2_gpm / GRAMS_PER_TON + record.grid_impact_100mi / 100.0
    }

    /// Años hasta que el vehículo amortiza su deuda de fabricación frente al
    /// baseline. Sin ahorro operativo (o negativo) vale 0. Nunca negativo.
    pub fn breakeven_years(&self, manufacturing_emissions: f64, op_per_mile: f64) -> f64 {
        let mfg_debt = manufacturing_emissions - self.baseline.avg_mfg_emissions;
        let annual_saving =
            (self.baseline.avg_op_emissions_per_mile - op_per_mile) * self.config.annual_miles;
        let breakeven = if annual_saving > 0.0 {
            mfg_debt / annual_saving
        } else {
            0.0
        };
        breakeven.max(0.0)
    }

    pub fn enrich(&self, record: &RawVehicleRecord) -> EnrichedVehicleRecord {
        let kind = FuelKind::from_fuel_type(&record.fuel_type, &self.config.electric_fuel_type);

        let op_per_mile = Self::operational_rate(record);
        let ten_year_op_tons = op_per_mile * self.config.lifetime_miles();
        let total_lifecycle =
            record.manufacturing_emissions + record.disposal_emissions + ten_year_op_tons;
        let annual_avg = total_lifecycle / self.config.lifespan_years;
        let trees_needed = (annual_avg / self.config.tree_absorption_rate).round().max(0.0) as u64;

        let breakeven_year = round_to(
            self.breakeven_years(record.manufacturing_emissions, op_per_mile),
            1,
        );
        let greenwash_risk = classify_risk(
            kind,
            record.combined_efficiency,
            breakeven_year,
            &self.config.thresholds,
        );

        EnrichedVehicleRecord {
            make: record.make.clone(),
            model: record.model.clone(),
            model_year: record.year,
            fuel_type: record.fuel_type.clone(),
            total_lifecycle_tons: round_to(total_lifecycle, 2),
            annual_avg_tons: round_to(annual_avg, 2),
            ten_year_op_tons: round_to(ten_year_op_tons, 2),
            fuel_efficiency: efficiency_label(kind, record.combined_efficiency),
            breakeven_year,
            trees_needed,
            tailpipe_co2: record.tailpipe_co2_gpm,
            manufacturing_emission: record.manufacturing_emissions,
            disposal_emission: record.disposal_emissions,
            grid_100mi: record.grid_impact_100mi,
            combined_efficiency: record.combined_efficiency,
            greenwash_risk,
        }
    }
}

/// "30 kWh/100mi" o "16 MPG"
pub fn efficiency_label(kind: FuelKind, combined_efficiency: f64) -> String {
    format!("{} {}", format_number(combined_efficiency), kind.efficiency_unit())
}

/// Eléctricos por años de amortización, combustión por MPG.
pub fn classify_risk(
    kind: FuelKind,
    combined_efficiency: f64,
    breakeven_year: f64,
    thresholds: &RiskThresholds,
) -> GreenwashRisk {
    match kind {
        FuelKind::Electric => {
            if breakeven_year > thresholds.breakeven_medium_max_years {
                GreenwashRisk::High
            } else if breakeven_year > thresholds.breakeven_low_max_years {
                GreenwashRisk::Medium
            } else {
                GreenwashRisk::Low
            }
        }
        FuelKind::Combustion => {
            if combined_efficiency < thresholds.mpg_high_risk_below {
                GreenwashRisk::High
            } else if combined_efficiency < thresholds.mpg_low_risk_from {
                GreenwashRisk::Medium
            } else {
                GreenwashRisk::Low
            }
        }
    }
}
