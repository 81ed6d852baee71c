use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::EnrichedVehicleRecord;
use crate::services::car_catalog::CarFilter;

pub const DEFAULT_CARS_LIMIT: usize = 20;
pub const DEFAULT_LOWEST_LIMIT: usize = 5;

// Parámetros vacíos ("?make=") cuentan como ausentes
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// Query de GET /cars
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CarQuery {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub risk: Option<String>,
    pub fuel: Option<String>,
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<usize>,
}

impl CarQuery {
    pub fn into_filter(self) -> (CarFilter, usize) {
        let limit = self.limit.unwrap_or(DEFAULT_CARS_LIMIT);
        let filter = CarFilter {
            make: non_empty(self.make),
            model: non_empty(self.model),
            year: self.year,
            risk: non_empty(self.risk),
            fuel: non_empty(self.fuel),
        };
        (filter, limit)
    }
}

// Query de GET /cars/match
#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

impl From<MatchQuery> for CarFilter {
    fn from(query: MatchQuery) -> Self {
        CarFilter {
            make: non_empty(query.make),
            model: non_empty(query.model),
            year: query.year,
            ..CarFilter::default()
        }
    }
}

// Query de GET /cars/lowest-emissions
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LowestEmissionsQuery {
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<usize>,
}

// Query de GET /years
#[derive(Debug, Default, Deserialize)]
pub struct YearsQuery {
    pub make: Option<String>,
    pub model: Option<String>,
}

impl YearsQuery {
    pub fn normalized(self) -> (Option<String>, Option<String>) {
        (non_empty(self.make), non_empty(self.model))
    }
}

// Coche enriquecido con su id de presentación
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarResponse {
    pub id: String,
    #[serde(flatten)]
    pub car: EnrichedVehicleRecord,
}

impl CarResponse {
    pub fn new(id: String, car: &EnrichedVehicleRecord) -> Self {
        Self {
            id,
            car: car.clone(),
        }
    }
}
