use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::queue_controller::QueueController;
use crate::dto::queue_dto::{QueueSnapshotResponse, QueuesOverviewResponse, ServedLogResponse};
use crate::dto::ApiResponse;
use crate::engine::{AdvanceOutcome, BoardOutcome, EngineError};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_queue_router() -> Router<AppState> {
    Router::new()
        .route("/", get(queues_overview))
        .route("/ticketing", get(ticketing_queue))
        .route("/boarding", get(boarding_queue))
        .route("/served", get(served_log))
        .route("/advance", post(advance_passenger))
        .route("/board", post(board_passenger))
}

async fn queues_overview(
    State(state): State<AppState>,
) -> Result<Json<QueuesOverviewResponse>, AppError> {
    let controller = QueueController::new(state.engine.clone());
    let response = controller.overview().await?;
    Ok(Json(response))
}

async fn ticketing_queue(
    State(state): State<AppState>,
) -> Result<Json<QueueSnapshotResponse>, AppError> {
    let controller = QueueController::new(state.engine.clone());
    let response = controller.ticketing().await?;
    Ok(Json(response))
}

async fn boarding_queue(
    State(state): State<AppState>,
) -> Result<Json<QueueSnapshotResponse>, AppError> {
    let controller = QueueController::new(state.engine.clone());
    let response = controller.boarding().await?;
    Ok(Json(response))
}

async fn served_log(State(state): State<AppState>) -> Result<Json<ServedLogResponse>, AppError> {
    let controller = QueueController::new(state.engine.clone());
    let response = controller.served().await?;
    Ok(Json(response))
}

async fn advance_passenger(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AdvanceOutcome>>, AppError> {
    let controller = QueueController::new(state.engine.clone());
    let result = controller.advance().await;
    // Un pago denegado también muta el motor: el pasajero ya salió de
    // boletería y el rechazo quedó asentado en el ledger. Ese resultado
    // se respalda igual que un avance exitoso.
    if matches!(
        &result,
        Ok(_) | Err(AppError::Engine(EngineError::Denied { .. }))
    ) {
        state.sync_store().await;
    }
    Ok(Json(result?))
}

async fn board_passenger(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BoardOutcome>>, AppError> {
    let controller = QueueController::new(state.engine.clone());
    let response = controller.board().await?;
    state.sync_store().await;
    Ok(Json(response))
}
