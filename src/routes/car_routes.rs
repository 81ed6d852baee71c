use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::car_controller::CarController;
use crate::dto::car_dto::{CarQuery, CarResponse, LowestEmissionsQuery, MatchQuery, YearsQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_car_router() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list_cars))
        .route("/cars/match", get(match_car))
        .route("/cars/lowest-emissions", get(lowest_emissions))
        .route("/car/:car_id", get(get_car))
        .route("/makes", get(list_makes))
        .route("/models/:make", get(list_models))
        .route("/years", get(list_years))
}

async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<CarQuery>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let controller = CarController::new(state.catalog.clone());
    Ok(Json(controller.list(query)?))
}

async fn match_car(
    State(state): State<AppState>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<CarResponse>, AppError> {
    let controller = CarController::new(state.catalog.clone());
    Ok(Json(controller.find_match(query)?))
}

async fn lowest_emissions(
    State(state): State<AppState>,
    Query(query): Query<LowestEmissionsQuery>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let controller = CarController::new(state.catalog.clone());
    Ok(Json(controller.lowest_emissions(query)?))
}

async fn get_car(
    State(state): State<AppState>,
    Path(car_id): Path<usize>,
) -> Result<Json<CarResponse>, AppError> {
    let controller = CarController::new(state.catalog.clone());
    Ok(Json(controller.get_by_index(car_id)?))
}

async fn list_makes(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(CarController::new(state.catalog.clone()).makes())
}

async fn list_models(
    State(state): State<AppState>,
    Path(make): Path<String>,
) -> Json<Vec<String>> {
    Json(CarController::new(state.catalog.clone()).models(&make))
}

async fn list_years(
    State(state): State<AppState>,
    Query(query): Query<YearsQuery>,
) -> Json<Vec<i32>> {
    Json(CarController::new(state.catalog.clone()).years(query))
}
