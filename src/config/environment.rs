//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del servidor y de las rutas del dataset.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::utils::errors::{config_error, AppResult};

/// Leer una variable con valor por defecto; un valor mal formado es un error
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| config_error(key, &raw)),
        _ => Ok(default),
    }
}

/// Leer una variable opcional
pub(crate) fn parse_opt<T, F>(lookup: &F, key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| config_error(key, &raw)),
        _ => Ok(None),
    }
}

/// Leer una lista separada por comas
pub(crate) fn list_or<F>(lookup: &F, key: &str, default: &[&str]) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => default.iter().map(|s| s.to_string()).collect(),
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub log_level: tracing::Level,
    /// Vacío o "*" = cualquier origen
    pub cors_origins: Vec<String>,
    /// CSV crudo o JSON ya enriquecido
    pub data_path: PathBuf,
    pub enriched_output_path: Option<PathBuf>,
    /// Enriquecer, exportar y salir sin levantar el servidor
    pub enrich_only: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 8000,
            host: "0.0.0.0".to_string(),
            log_level: tracing::Level::INFO,
            cors_origins: Vec::new(),
            data_path: PathBuf::from("data/vehicle_emissions_report.csv"),
            enriched_output_path: None,
            enrich_only: false,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar desde las variables de entorno del proceso
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            host: lookup("HOST").unwrap_or(defaults.host),
            log_level: parse_or(&lookup, "LOG_LEVEL", defaults.log_level)?,
            cors_origins: list_or(&lookup, "CORS_ORIGINS", &[]),
            data_path: lookup("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            enriched_output_path: lookup("ENRICHED_OUTPUT_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            enrich_only: parse_or(&lookup, "ENRICH_ONLY", defaults.enrich_only)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// CORS sin restricciones de origen
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.server_url(), "0.0.0.0:8000");
        assert!(config.allows_any_origin());
        assert!(config.enriched_output_path.is_none());
        assert!(!config.enrich_only);
    }

    #[test]
    fn test_overrides() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("PORT", "9090"),
            ("LOG_LEVEL", "debug"),
            ("CORS_ORIGINS", "http://localhost:5173, https://ecocar.app"),
            ("ENRICHED_OUTPUT_PATH", "out/cars.json"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert_eq!(config.cors_origins.len(), 2);
        assert!(!config.allows_any_origin());
        assert_eq!(config.enriched_output_path, Some(PathBuf::from("out/cars.json")));
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let result = EnvironmentConfig::from_lookup(lookup_from(&[("PORT", "http")]));
        assert!(matches!(result, Err(crate::utils::errors::AppError::Config(_))));
    }
}
