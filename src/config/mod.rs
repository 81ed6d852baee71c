//! Configuración del proyecto
//!
//! Este módulo contiene la configuración del servidor y las constantes
//! del modelo de emisiones.

pub mod emissions;
pub mod environment;

pub use emissions::{EmissionsConfig, RiskThresholds};
pub use environment::EnvironmentConfig;
