use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::VehicleResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/vehicle", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicle/:vin",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<VehicleResponse>), AppError> {
    let Json(payload) = payload?;
    let controller = VehicleController::new(state.store.clone());
    let response = controller.create(payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(vin): Path<String>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let response = controller.get_by_vin(&vin).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(vin): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<VehicleResponse>, AppError> {
    let Json(payload) = payload?;
    let controller = VehicleController::new(state.store.clone());
    let response = controller.update(&vin, payload).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(vin): Path<String>,
) -> Result<StatusCode, AppError> {
    let controller = VehicleController::new(state.store.clone());
    controller.delete(&vin).await?;
    Ok(StatusCode::NO_CONTENT)
}
