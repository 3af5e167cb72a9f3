//! Vehicle handlers (`/api/vehicles`)

use axum::{extract::State, http::StatusCode, Json};

use core_kernel::VehicleId;

use crate::dto::MessageResponse;
use crate::dto::vehicle::{VehicleRequest, VehicleResponse};
use crate::error::ApiError;
use crate::extract::{ApiPath, ValidatedJson};
use crate::AppState;

pub async fn create_vehicle(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<VehicleRequest>,
) -> Result<(StatusCode, Json<VehicleResponse>), ApiError> {
    let vehicle = state.vehicles.create_vehicle(request.into()).await?;
    Ok((StatusCode::CREATED, Json(vehicle.into())))
}

pub async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, ApiError> {
    let vehicles = state.vehicles.list_vehicles().await?;
    Ok(Json(vehicles.into_iter().map(VehicleResponse::from).collect()))
}

pub async fn get_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<VehicleResponse>, ApiError> {
    let vehicle = state.vehicles.get_vehicle(VehicleId::new(id)).await?;
    Ok(Json(vehicle.into()))
}

pub async fn update_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<VehicleRequest>,
) -> Result<Json<VehicleResponse>, ApiError> {
    let vehicle = state
        .vehicles
        .update_vehicle(VehicleId::new(id), request.into())
        .await?;
    Ok(Json(vehicle.into()))
}

/// Refused with 409 while any policy still covers the vehicle
pub async fn delete_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.vehicles.delete_vehicle(VehicleId::new(id)).await?;
    Ok(Json(MessageResponse {
        message: format!("Vehicle deleted successfully with id: {id}"),
    }))
}
