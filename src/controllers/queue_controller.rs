use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::dto::queue_dto::{QueueSnapshotResponse, QueuesOverviewResponse, ServedLogResponse};
use crate::dto::ApiResponse;
use crate::engine::{AdvanceOutcome, BoardOutcome, TransitEngine};
use crate::utils::errors::AppError;

pub struct QueueController {
    engine: Arc<RwLock<TransitEngine>>,
}

impl QueueController {
    pub fn new(engine: Arc<RwLock<TransitEngine>>) -> Self {
        Self { engine }
    }

    pub async fn overview(&self) -> Result<QueuesOverviewResponse, AppError> {
        let engine = self.engine.read().await;
        Ok(QueuesOverviewResponse::collect(&engine))
    }

    pub async fn ticketing(&self) -> Result<QueueSnapshotResponse, AppError> {
        let engine = self.engine.read().await;
        Ok(QueueSnapshotResponse::ticketing(&engine))
    }

    pub async fn boarding(&self) -> Result<QueueSnapshotResponse, AppError> {
        let engine = self.engine.read().await;
        Ok(QueueSnapshotResponse::boarding(&engine))
    }

    pub async fn served(&self) -> Result<ServedLogResponse, AppError> {
        let engine = self.engine.read().await;
        Ok(ServedLogResponse::collect(&engine))
    }

    /// Verifica el pago del primero de boletería y lo pasa a pre-abordaje.
    pub async fn advance(&self) -> Result<ApiResponse<AdvanceOutcome>, AppError> {
        let outcome = self.engine.write().await.advance_to_boarding()?;
        let message = outcome.summary();
        info!("✅ {}", message);
        Ok(ApiResponse::success_with_message(outcome, message))
    }

    /// Sube el primero de pre-abordaje a la unidad activa.
    pub async fn board(&self) -> Result<ApiResponse<BoardOutcome>, AppError> {
        let outcome = self.engine.write().await.board_active_vehicle()?;
        let message = outcome.summary();
        info!("🚌 {}", message);
        Ok(ApiResponse::success_with_message(outcome, message))
    }
}
