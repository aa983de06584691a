use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::report_controller::ReportController;
use crate::dto::report_dto::LedgerResponse;
use crate::engine::OperationsReport;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/operations", get(operations_report))
        .route("/ledger", get(ledger_report))
}

async fn operations_report(
    State(state): State<AppState>,
) -> Result<Json<OperationsReport>, AppError> {
    let controller = ReportController::new(state.engine.clone());
    let response = controller.operations().await?;
    Ok(Json(response))
}

async fn ledger_report(State(state): State<AppState>) -> Result<Json<LedgerResponse>, AppError> {
    let controller = ReportController::new(state.engine.clone());
    let response = controller.ledger().await?;
    Ok(Json(response))
}
