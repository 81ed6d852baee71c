use std::fs;
use std::path::PathBuf;

use ecocar_backend::config::EmissionsConfig;
use ecocar_backend::models::{Baseline, GreenwashRisk};
use ecocar_backend::services::dataset_loader::{load_dataset, write_enriched_json};
use ecocar_backend::services::enrichment_driver::EnrichmentDriver;

const CSV: &str = "\
make,model,year,fuelType,mfg_emissions (MTCO_2e),disposal_emissions (MTCO_2e),co2TailpipeGpm,grid_impact_(MTCO_2e / 100miles),comb08,combE
Toyota,Prius,2022,Regular,5.0,0.4,300,0,52,0
Tesla,Model 3,2023,Electricity,8.0,0.5,0,0.025,130,25
Ford,F150,2021,Premium,7.0,0.5,400,0,16,0
Mystery,Car,2020,Regular,,0.5,350,0,20,0
";

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ecocar-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_csv_to_json_and_back() {
    let dir = scratch_dir("flow");
    let csv_path = dir.join("vehicle_emissions_report.csv");
    let json_path = dir.join("out").join("car_data_enriched.json");
    fs::write(&csv_path, CSV).unwrap();

    let driver = EnrichmentDriver::new(EmissionsConfig::default());
    let from_csv = load_dataset(&csv_path, &driver).unwrap();
    assert_eq!(from_csv.records.len(), 3);
    assert_eq!(from_csv.rejected.len(), 1);
    assert_eq!(from_csv.rejected[0].make.as_deref(), Some("Mystery"));
    // la fila rechazada aporta su escape al baseline, no su fabricación
    let baseline = from_csv.baseline.unwrap();
    assert!((baseline.avg_mfg_emissions - 6.0).abs() < 1e-12);
    assert!((baseline.avg_op_emissions_per_mile - 0.00035).abs() < 1e-12);
    assert_eq!(from_csv.records[2].greenwash_risk, GreenwashRisk::High);

    write_enriched_json(&json_path, &from_csv.records).unwrap();
    let from_json = load_dataset(&json_path, &driver).unwrap();
    assert_eq!(from_json.records, from_csv.records);
    assert!(from_json.baseline.is_none());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_all_electric_dataset_uses_override() {
    let dir = scratch_dir("ev-only");
    let csv_path = dir.join("evs.csv");
    fs::write(
        &csv_path,
        "make,model,year,fuelType,mfg_emissions (MTCO_2e),disposal_emissions (MTCO_2e),co2TailpipeGpm,grid_impact_(MTCO_2e / 100miles),comb08,combE\n\
         Tesla,Model Y,2023,Electricity,11.0,0.5,0,0.025,120,28\n",
    )
    .unwrap();

    let plain = EnrichmentDriver::new(EmissionsConfig::default());
    assert!(load_dataset(&csv_path, &plain).is_err());

    let with_override = EnrichmentDriver::new(EmissionsConfig {
        baseline_override: Some(Baseline::new(6.0, 0.00035)),
        ..EmissionsConfig::default()
    });
    let dataset = load_dataset(&csv_path, &with_override).unwrap();
    assert_eq!(dataset.records[0].breakeven_year, 4.2);
    assert_eq!(dataset.records[0].greenwash_risk, GreenwashRisk::Medium);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_row_missing_mpg_still_shapes_baseline() {
    let dir = scratch_dir("partial-row");
    let csv_path = dir.join("partial.csv");
    fs::write(
        &csv_path,
        "make,model,year,fuelType,mfg_emissions (MTCO_2e),disposal_emissions (MTCO_2e),co2TailpipeGpm,grid_impact_(MTCO_2e / 100miles),comb08,combE\n\
         Honda,Civic,2022,Regular,5.0,0.4,300,0,,0\n\
         BMW,330i,2022,Premium,7.0,0.5,400,0,30,0\n\
         Tesla,Model 3,2023,Electricity,8.0,0.5,0,0.025,130,25\n",
    )
    .unwrap();

    let driver = EnrichmentDriver::new(EmissionsConfig::default());
    let dataset = load_dataset(&csv_path, &driver).unwrap();
    assert_eq!(dataset.rejected.len(), 1);
    assert_eq!(dataset.rejected[0].make.as_deref(), Some("Honda"));

    let baseline = dataset.baseline.unwrap();
    assert!((baseline.avg_mfg_emissions - 6.0).abs() < 1e-12);
    assert!((baseline.avg_op_emissions_per_mile - 0.00035).abs() < 1e-12);
    assert_eq!(dataset.records[1].make, "Tesla");
    assert_eq!(dataset.records[1].breakeven_year, 1.7);

    fs::remove_dir_all(&dir).ok();
}
