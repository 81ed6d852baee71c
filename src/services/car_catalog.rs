//! Catálogo de coches enriquecidos
//!
//! Consultas en memoria sobre el dataset enriquecido: filtros, búsqueda del
//! primer match, ranking por emisiones y listados de valores distintos.
//! El dataset es inmutable una vez cargado.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::models::EnrichedVehicleRecord;

/// Filtros de búsqueda; `None` = sin filtro
#[derive(Debug, Clone, Default)]
pub struct CarFilter {
    /// Igualdad sin distinguir mayúsculas
    pub make: Option<String>,
    /// Igualdad sin distinguir mayúsculas
    pub model: Option<String>,
    pub year: Option<i32>,
    /// Igualdad sin distinguir mayúsculas
    pub risk: Option<String>,
    /// Subcadena sin distinguir mayúsculas sobre `fuelType`
    pub fuel: Option<String>,
}

impl CarFilter {
    pub fn matches(&self, car: &EnrichedVehicleRecord) -> bool {
        let eq = |wanted: &Option<String>, value: &str| {
            wanted
                .as_deref()
                .map_or(true, |w| w.eq_ignore_ascii_case(value))
        };

        eq(&self.make, &car.make)
            && eq(&self.model, &car.model)
            && self.year.map_or(true, |y| y == car.model_year)
            && eq(&self.risk, car.greenwash_risk.as_str())
            && self.fuel.as_deref().map_or(true, |f| {
                car.fuel_type.to_lowercase().contains(&f.to_lowercase())
            })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CarCatalog {
    records: Arc<Vec<EnrichedVehicleRecord>>,
}

impl CarCatalog {
    pub fn new(records: Vec<EnrichedVehicleRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Registro por posición en el dataset
    pub fn get(&self, index: usize) -> Option<&EnrichedVehicleRecord> {
        self.records.get(index)
    }

    /// Hasta `limit` coches que cumplen el filtro, en orden del dataset
    pub fn search(&self, filter: &CarFilter, limit: usize) -> Vec<&EnrichedVehicleRecord> {
        self.records
            .iter()
            .filter(|car| filter.matches(car))
            .take(limit)
            .collect()
    }

    /// Primer coche que cumple el filtro
    pub fn first_match(&self, filter: &CarFilter) -> Option<&EnrichedVehicleRecord> {
        self.records.iter().find(|car| filter.matches(car))
    }

    /// Coches con menor `total_lifecycle_tons` (orden estable ante empates)
    pub fn lowest_emissions(&self, limit: usize) -> Vec<&EnrichedVehicleRecord> {
        let mut sorted: Vec<&EnrichedVehicleRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| a.total_lifecycle_tons.total_cmp(&b.total_lifecycle_tons));
        sorted.truncate(limit);
        sorted
    }

    /// Marcas distintas, ordenadas
    pub fn makes(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|car| car.make.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Modelos distintos de una marca, ordenados
    pub fn models(&self, make: &str) -> Vec<String> {
        self.records
            .iter()
            .filter(|car| car.make.eq_ignore_ascii_case(make))
            .map(|car| car.model.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Años distintos, opcionalmente por marca y modelo
    pub fn years(&self, make: Option<&str>, model: Option<&str>) -> Vec<i32> {
        let filter = CarFilter {
            make: make.map(str::to_string),
            model: model.map(str::to_string),
            ..CarFilter::default()
        };
        self.records
            .iter()
            .filter(|car| filter.matches(car))
            .map(|car| car.model_year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GreenwashRisk;

    fn car(make: &str, model: &str, year: i32, fuel: &str, total: f64, risk: GreenwashRisk) -> EnrichedVehicleRecord {
        EnrichedVehicleRecord {
            make: make.to_string(),
            model: model.to_string(),
            model_year: year,
            fuel_type: fuel.to_string(),
            total_lifecycle_tons: total,
            annual_avg_tons: total / 10.0,
            ten_year_op_tons: total - 6.0,
            fuel_efficiency: "30 MPG".to_string(),
            breakeven_year: 0.0,
            trees_needed: 0,
            tailpipe_co2: 0.0,
            manufacturing_emission: 6.0,
            disposal_emission: 0.0,
            grid_100mi: 0.0,
            combined_efficiency: 30.0,
            greenwash_risk: risk,
        }
    }

    fn catalog() -> CarCatalog {
        CarCatalog::new(vec![
            car("Toyota", "Prius", 2022, "Regular", 40.0, GreenwashRisk::Low),
            car("Tesla", "Model 3", 2023, "Electricity", 35.0, GreenwashRisk::Low),
            car("Toyota", "Camry", 2021, "Regular", 60.0, GreenwashRisk::Low),
            car("Ford", "F150", 2021, "Premium", 80.0, GreenwashRisk::High),
            car("Toyota", "Prius", 2021, "Regular", 40.0, GreenwashRisk::Low),
            car("Toyota", "RAV4 Prime", 2023, "Regular and Electricity", 45.0, GreenwashRisk::Medium),
        ])
    }

    #[test]
    fn test_search_filters_case_insensitive() {
        let catalog = catalog();
        let filter = CarFilter {
            make: Some("toyota".to_string()),
            ..CarFilter::default()
        };
        assert_eq!(catalog.search(&filter, 20).len(), 4);
        assert_eq!(catalog.search(&filter, 2).len(), 2);

        let filter = CarFilter {
            risk: Some("HIGH".to_string()),
            ..CarFilter::default()
        };
        let found = catalog.search(&filter, 20);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].model, "F150");
    }

    #[test]
    fn test_fuel_is_substring_match() {
        let catalog = catalog();
        let filter = CarFilter {
            fuel: Some("electric".to_string()),
            ..CarFilter::default()
        };
        let models: Vec<&str> = catalog.search(&filter, 20).iter().map(|c| c.model.as_str()).collect();
        assert_eq!(models, vec!["Model 3", "RAV4 Prime"]);
    }

    #[test]
    fn test_first_match_and_year() {
        let catalog = catalog();
        let filter = CarFilter {
            model: Some("prius".to_string()),
            year: Some(2021),
            ..CarFilter::default()
        };
        assert_eq!(catalog.first_match(&filter).map(|c| c.model_year), Some(2021));

        let none = CarFilter {
            make: Some("Lada".to_string()),
            ..CarFilter::default()
        };
        assert!(catalog.first_match(&none).is_none());
    }

    #[test]
    fn test_lowest_emissions_stable() {
        let catalog = catalog();
        let lowest = catalog.lowest_emissions(3);
        let picked: Vec<(&str, i32)> = lowest.iter().map(|c| (c.model.as_str(), c.model_year)).collect();
        assert_eq!(picked, vec![("Model 3", 2023), ("Prius", 2022), ("Prius", 2021)]);
    }

    #[test]
    fn test_distinct_listings() {
        let catalog = catalog();
        assert_eq!(catalog.makes(), vec!["Ford", "Tesla", "Toyota"]);
        assert_eq!(catalog.models("TOYOTA"), vec!["Camry", "Prius", "RAV4 Prime"]);
        assert_eq!(catalog.years(None, None), vec![2021, 2022, 2023]);
        assert_eq!(catalog.years(Some("toyota"), Some("prius")), vec![2021, 2022]);
        assert!(catalog.models("Lada").is_empty());
    }
}
