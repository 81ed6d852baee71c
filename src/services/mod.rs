//! Services module
//!
//! Este módulo contiene la lógica de negocio: estimación del baseline,
//! enriquecimiento por vehículo, driver del dataset, lectura/escritura
//! de ficheros y el catálogo de consultas.

pub mod baseline_estimator;
pub mod car_catalog;
pub mod dataset_loader;
pub mod enrichment_driver;
pub mod vehicle_enricher;

pub use baseline_estimator::BaselineEstimator;
pub use car_catalog::{CarCatalog, CarFilter};
pub use enrichment_driver::{EnrichmentDriver, EnrichmentReport, RejectedRow};
pub use vehicle_enricher::VehicleEnricher;
