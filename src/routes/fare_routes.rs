use axum::Json;

use crate::dto::report_dto::FareTableResponse;

/// La tabla de tarifas es fija, el handler no necesita estado.
pub async fn fare_table() -> Json<FareTableResponse> {
    Json(FareTableResponse::collect())
}
