//! EcoCar backend
//!
//! Enriquecimiento de un dataset de vehículos con métricas de emisiones de
//! ciclo de vida (total, media anual, amortización frente al coche de gasolina
//! típico, equivalencia en árboles y riesgo de greenwashing) y API de consulta
//! sobre el dataset enriquecido.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
