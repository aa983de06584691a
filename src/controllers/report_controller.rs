use std::sync::Arc;

use tokio::sync::RwLock;

use crate::dto::report_dto::LedgerResponse;
use crate::engine::{OperationsReport, TransitEngine};
use crate::utils::errors::AppError;

pub struct ReportController {
    engine: Arc<RwLock<TransitEngine>>,
}

impl ReportController {
    pub fn new(engine: Arc<RwLock<TransitEngine>>) -> Self {
        Self { engine }
    }

    pub async fn operations(&self) -> Result<OperationsReport, AppError> {
        let engine = self.engine.read().await;
        Ok(OperationsReport::collect(&engine))
    }

    pub async fn ledger(&self) -> Result<LedgerResponse, AppError> {
        let engine = self.engine.read().await;
        Ok(LedgerResponse::collect(&engine))
    }
}
