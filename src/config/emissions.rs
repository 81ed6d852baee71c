//! Constantes del modelo de emisiones
//!
//! Kilometraje anual, vida útil, absorción por árbol, lista de combustibles
//! de combustión y umbrales de riesgo. Todo se puede sobrescribir por entorno.

use std::env;

use crate::config::environment::{list_or, parse_opt, parse_or};
use crate::models::Baseline;
use crate::utils::errors::{AppError, AppResult};

/// Umbrales de clasificación de greenwashing
#[derive(Debug, Clone, PartialEq)]
pub struct RiskThresholds {
    /// Eléctricos: breakeven <= este valor es Low
    pub breakeven_low_max_years: f64,
    /// Eléctricos: breakeven > este valor es High
    pub breakeven_medium_max_years: f64,
    /// Combustión: MPG por debajo de este valor es High
    pub mpg_high_risk_below: f64,
    /// Combustión: MPG desde este valor es Low
    pub mpg_low_risk_from: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            breakeven_low_max_years: 3.0,
            breakeven_medium_max_years: 6.0,
            mpg_high_risk_below: 18.0,
            mpg_low_risk_from: 25.0,
        }
    }
}

/// Configuración del enriquecimiento
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionsConfig {
    pub annual_miles: f64,
    pub lifespan_years: f64,
    /// Toneladas de CO2 que absorbe un árbol maduro por año
    pub tree_absorption_rate: f64,
    /// Valores exactos de `fuelType` que cuentan para el baseline
    pub combustion_fuel_types: Vec<String>,
    pub electric_fuel_type: String,
    pub thresholds: RiskThresholds,
    pub parallel: bool,
    /// Baseline fijo; si existe no se estima a partir del dataset
    pub baseline_override: Option<Baseline>,
}

impl Default for EmissionsConfig {
    fn default() -> Self {
        Self {
            annual_miles: 12_000.0,
            lifespan_years: 10.0,
            tree_absorption_rate: 0.022,
            combustion_fuel_types: vec![
                "Regular".to_string(),
                "Premium".to_string(),
                "Diesel".to_string(),
            ],
            electric_fuel_type: "Electricity".to_string(),
            thresholds: RiskThresholds::default(),
            parallel: false,
            baseline_override: None,
        }
    }
}

impl EmissionsConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        let t = d.thresholds.clone();

        let baseline_mfg: Option<f64> = parse_opt(&lookup, "BASELINE_MFG_TONS")?;
        let baseline_op: Option<f64> = parse_opt(&lookup, "BASELINE_OP_TONS_PER_MILE")?;
        let baseline_override = match (baseline_mfg, baseline_op) {
            (Some(mfg), Some(op)) => Some(Baseline::new(mfg, op)),
            (None, None) => None,
            _ => {
                return Err(AppError::Config(
                    "BASELINE_MFG_TONS and BASELINE_OP_TONS_PER_MILE must be set together".to_string(),
                ))
            }
        };

        let config = Self {
            annual_miles: parse_or(&lookup, "ANNUAL_MILES", d.annual_miles)?,
            lifespan_years: parse_or(&lookup, "LIFESPAN_YEARS", d.lifespan_years)?,
            tree_absorption_rate: parse_or(&lookup, "TREE_ABSORPTION_RATE", d.tree_absorption_rate)?,
            combustion_fuel_types: list_or(&lookup, "COMBUSTION_FUEL_TYPES", &["Regular", "Premium", "Diesel"]),
            electric_fuel_type: lookup("ELECTRIC_FUEL_TYPE").unwrap_or(d.electric_fuel_type),
            thresholds: RiskThresholds {
                breakeven_low_max_years: parse_or(&lookup, "BREAKEVEN_LOW_MAX_YEARS", t.breakeven_low_max_years)?,
                breakeven_medium_max_years: parse_or(
                    &lookup,
                    "BREAKEVEN_MEDIUM_MAX_YEARS",
                    t.breakeven_medium_max_years,
                )?,
                mpg_high_risk_below: parse_or(&lookup, "MPG_HIGH_RISK_BELOW", t.mpg_high_risk_below)?,
                mpg_low_risk_from: parse_or(&lookup, "MPG_LOW_RISK_FROM", t.mpg_low_risk_from)?,
            },
            parallel: parse_or(&lookup, "PARALLEL_ENRICHMENT", d.parallel)?,
            baseline_override,
        };

        config.validate()?;
        Ok(config)
    }

    /// Millas durante toda la vida útil
    pub fn lifetime_miles(&self) -> f64 {
        self.annual_miles * self.lifespan_years
    }

    pub fn is_combustion_fuel(&self, fuel_type: &str) -> bool {
        self.combustion_fuel_types.iter().any(|f| f == fuel_type)
    }

    fn validate(&self) -> AppResult<()> {
        if self.annual_miles <= 0.0 || self.lifespan_years <= 0.0 {
            return Err(AppError::Config(
                "ANNUAL_MILES and LIFESPAN_YEARS must be positive".to_string(),
            ));
        }
        if self.tree_absorption_rate <= 0.0 {
            return Err(AppError::Config("TREE_ABSORPTION_RATE must be positive".to_string()));
        }
        let t = &self.thresholds;
        if t.breakeven_low_max_years > t.breakeven_medium_max_years
            || t.mpg_high_risk_below > t.mpg_low_risk_from
        {
            return Err(AppError::Config("risk thresholds are out of order".to_string()));
        }
        Ok(())
    }
}
