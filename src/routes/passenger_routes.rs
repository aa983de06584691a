use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::passenger_controller::PassengerController;
use crate::dto::passenger_dto::{
    CreatePassengerRequest, SearchQuery, SearchResponse, SeedPassengersRequest,
    UpdatePassengerRequest,
};
use crate::dto::ApiResponse;
use crate::engine::{AdmitOutcome, RemoveOutcome, SeedOutcome, UpdateOutcome};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_passenger_router() -> Router<AppState> {
    Router::new()
        .route("/", post(admit_passenger))
        .route("/seed", post(seed_passengers))
        .route("/search", get(search_passenger))
        .route("/:id", put(update_passenger))
        .route("/:id", delete(remove_passenger))
}

async fn admit_passenger(
    State(state): State<AppState>,
    Json(request): Json<CreatePassengerRequest>,
) -> Result<Json<ApiResponse<AdmitOutcome>>, AppError> {
    let controller = PassengerController::new(state.engine.clone());
    let response = controller.admit(request).await?;
    state.sync_store().await;
    Ok(Json(response))
}

async fn seed_passengers(
    State(state): State<AppState>,
    Json(request): Json<SeedPassengersRequest>,
) -> Result<Json<ApiResponse<SeedOutcome>>, AppError> {
    let controller = PassengerController::new(state.engine.clone());
    let response = controller.seed(request).await?;
    state.sync_store().await;
    Ok(Json(response))
}

async fn search_passenger(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let controller = PassengerController::new(state.engine.clone());
    let response = controller.search(query).await?;
    Ok(Json(response))
}

async fn update_passenger(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePassengerRequest>,
) -> Result<Json<ApiResponse<UpdateOutcome>>, AppError> {
    let controller = PassengerController::new(state.engine.clone());
    let response = controller.update(id, request).await?;
    state.sync_store().await;
    Ok(Json(response))
}

async fn remove_passenger(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<RemoveOutcome>>, AppError> {
    let controller = PassengerController::new(state.engine.clone());
    let response = controller.remove(id).await?;
    state.sync_store().await;
    Ok(Json(response))
}
