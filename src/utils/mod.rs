//! Utilidades del sistema
//!
//! Este módulo contiene el manejo de errores y utilidades numéricas comunes.

pub mod errors;
pub mod rounding;

pub use errors::*;
