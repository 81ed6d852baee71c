//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El dataset es de solo lectura.

use crate::config::environment::EnvironmentConfig;
use crate::models::Baseline;
use crate::services::car_catalog::CarCatalog;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub catalog: CarCatalog,
    /// `None` si el dataset se cargó ya enriquecido
    pub baseline: Option<Baseline>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, catalog: CarCatalog, baseline: Option<Baseline>) -> Self {
        Self {
            config,
            catalog,
            baseline,
        }
    }
}
