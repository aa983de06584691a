use axum::{
    extract::{Query, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::fleet_controller::FleetController;
use crate::dto::fleet_dto::{
    AssignVehicleRequest, DeparturesQuery, DeparturesResponse, FleetStatusResponse,
};
use crate::dto::ApiResponse;
use crate::engine::{AssignOutcome, DepartOutcome};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fleet_router() -> Router<AppState> {
    Router::new()
        .route("/", get(fleet_status))
        .route("/depart", post(depart_vehicle))
        .route("/active", put(assign_vehicle))
        .route("/departures", get(recent_departures))
}

async fn fleet_status(State(state): State<AppState>) -> Result<Json<FleetStatusResponse>, AppError> {
    let controller = FleetController::new(state.engine.clone());
    let response = controller.status().await?;
    Ok(Json(response))
}

async fn depart_vehicle(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DepartOutcome>>, AppError> {
    let controller = FleetController::new(state.engine.clone());
    let response = controller.depart().await?;
    state.sync_store().await;
    Ok(Json(response))
}

async fn assign_vehicle(
    State(state): State<AppState>,
    Json(request): Json<AssignVehicleRequest>,
) -> Result<Json<ApiResponse<AssignOutcome>>, AppError> {
    let controller = FleetController::new(state.engine.clone());
    let response = controller.assign(request).await?;
    state.sync_store().await;
    Ok(Json(response))
}

async fn recent_departures(
    State(state): State<AppState>,
    Query(query): Query<DeparturesQuery>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let controller = FleetController::new(state.engine.clone());
    let response = controller.departures(query.limit).await?;
    Ok(Json(response))
}
