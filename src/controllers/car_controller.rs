use validator::Validate;

use crate::dto::car_dto::{CarQuery, CarResponse, LowestEmissionsQuery, MatchQuery, YearsQuery, DEFAULT_LOWEST_LIMIT};
use crate::models::EnrichedVehicleRecord;
use crate::services::car_catalog::{CarCatalog, CarFilter};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct CarController {
    catalog: CarCatalog,
}

impl CarController {
    pub fn new(catalog: CarCatalog) -> Self {
        Self { catalog }
    }

    // El id de listado incluye la posición dentro de la página
    fn page(cars: Vec<&EnrichedVehicleRecord>) -> Vec<CarResponse> {
        cars.into_iter()
            .enumerate()
            .map(|(i, car)| CarResponse::new(format!("{}-{}", car.slug(), i), car))
            .collect()
    }

    pub fn list(&self, query: CarQuery) -> AppResult<Vec<CarResponse>> {
        query.validate()?;
        let (filter, limit) = query.into_filter();
        let cars = self.catalog.search(&filter, limit);
        tracing::debug!("🔍 {:?} -> {} coches", filter, cars.len());
        Ok(Self::page(cars))
    }

    pub fn find_match(&self, query: MatchQuery) -> AppResult<CarResponse> {
        let filter = CarFilter::from(query);
        self.catalog
            .first_match(&filter)
            .map(|car| CarResponse::new(car.slug(), car))
            .ok_or_else(|| AppError::NotFound("No matching car found".to_string()))
    }

    pub fn lowest_emissions(&self, query: LowestEmissionsQuery) -> AppResult<Vec<CarResponse>> {
        query.validate()?;
        let limit = query.limit.unwrap_or(DEFAULT_LOWEST_LIMIT);
        Ok(Self::page(self.catalog.lowest_emissions(limit)))
    }

    pub fn get_by_index(&self, car_id: usize) -> AppResult<CarResponse> {
        self.catalog
            .get(car_id)
            .map(|car| CarResponse::new(car_id.to_string(), car))
            .ok_or_else(|| not_found_error("Car", &car_id.to_string()))
    }

    pub fn makes(&self) -> Vec<String> {
        self.catalog.makes()
    }

    pub fn models(&self, make: &str) -> Vec<String> {
        self.catalog.models(make)
    }

    pub fn years(&self, query: YearsQuery) -> Vec<i32> {
        let (make, model) = query.normalized();
        self.catalog.years(make.as_deref(), model.as_deref())
    }
}
