//! Lectura y escritura del dataset
//!
//! - CSV crudo de origen -> filas `VehicleRow` (una fila rota no aborta la lectura)
//! - JSON enriquecido <-> `Vec<EnrichedVehicleRecord>`

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::info;

use crate::dto::vehicle_row::VehicleRow;
use crate::models::{Baseline, EnrichedVehicleRecord};
use crate::services::enrichment_driver::{EnrichmentDriver, RejectedRow};
use crate::utils::errors::{AppResult, EnrichmentError};

/// Formato del dataset según la extensión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    RawCsv,
    EnrichedJson,
}

impl DatasetFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DatasetFormat::EnrichedJson,
            _ => DatasetFormat::RawCsv,
        }
    }
}

/// Leer filas CSV de cualquier lector
pub fn read_rows<R: Read>(reader: R) -> AppResult<Vec<Result<VehicleRow, EnrichmentError>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Sin cabecera no hay forma de mapear columnas: eso sí es fatal
    rdr.headers()?;

    let rows = rdr
        .deserialize::<VehicleRow>()
        .map(|result| {
            result.map_err(|e| EnrichmentError::InvalidValue {
                field: "row",
                value: e.to_string(),
            })
        })
        .collect();
    Ok(rows)
}

pub fn read_csv_rows(path: &Path) -> AppResult<Vec<Result<VehicleRow, EnrichmentError>>> {
    let file = File::open(path)?;
    let rows = read_rows(BufReader::new(file))?;
    info!("📂 {} filas leídas de {}", rows.len(), path.display());
    Ok(rows)
}

pub fn read_enriched<R: Read>(reader: R) -> AppResult<Vec<EnrichedVehicleRecord>> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_enriched_json(path: &Path) -> AppResult<Vec<EnrichedVehicleRecord>> {
    let file = File::open(path)?;
    let records = read_enriched(BufReader::new(file))?;
    info!("📂 {} vehículos enriquecidos cargados de {}", records.len(), path.display());
    Ok(records)
}

/// JSON con indentación de 4 espacios (formato de `car_data_enriched.json`)
pub fn write_enriched<W: Write>(writer: W, records: &[EnrichedVehicleRecord]) -> AppResult<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    serde::Serialize::serialize(records, &mut serializer)?;
    Ok(())
}

pub fn write_enriched_json(path: &Path, records: &[EnrichedVehicleRecord]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write_enriched(&mut writer, records)?;
    writer.flush()?;
    info!("💾 {} vehículos guardados en {}", records.len(), path.display());
    Ok(())
}

/// Dataset listo para servir
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub records: Vec<EnrichedVehicleRecord>,
    /// `None` cuando el fichero ya venía enriquecido
    pub baseline: Option<Baseline>,
    pub rejected: Vec<RejectedRow>,
}

/// Cargar el dataset: un JSON se sirve tal cual, un CSV pasa por el driver
pub fn load_dataset(path: &Path, driver: &EnrichmentDriver) -> AppResult<LoadedDataset> {
    match DatasetFormat::from_path(path) {
        DatasetFormat::EnrichedJson => Ok(LoadedDataset {
            records: load_enriched_json(path)?,
            baseline: None,
            rejected: Vec::new(),
        }),
        DatasetFormat::RawCsv => {
            let report = driver.run_rows(read_csv_rows(path)?)?;
            Ok(LoadedDataset {
                records: report.records,
                baseline: Some(report.baseline),
                rejected: report.rejected,
            })
        }
    }
}
