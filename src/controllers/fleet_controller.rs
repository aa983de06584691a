use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;
use validator::Validate;

use crate::dto::fleet_dto::{
    AssignVehicleRequest, DepartureResponse, DeparturesResponse, FleetStatusResponse,
};
use crate::dto::ApiResponse;
use crate::engine::{AssignOutcome, DepartOutcome, TransitEngine};
use crate::utils::errors::AppError;

/// Cuántas partidas devuelve el historial si el cliente no pide un límite.
const DEFAULT_DEPARTURES_LIMIT: usize = 10;
const MAX_DEPARTURES_LIMIT: usize = 100;

pub struct FleetController {
    engine: Arc<RwLock<TransitEngine>>,
}

impl FleetController {
    pub fn new(engine: Arc<RwLock<TransitEngine>>) -> Self {
        Self { engine }
    }

    pub async fn status(&self) -> Result<FleetStatusResponse, AppError> {
        let engine = self.engine.read().await;
        Ok(FleetStatusResponse::collect(&engine))
    }

    /// La unidad activa parte con su carga y la rotación avanza.
    pub async fn depart(&self) -> Result<ApiResponse<DepartOutcome>, AppError> {
        let outcome = self.engine.write().await.depart_active_vehicle()?;
        let message = outcome.summary();
        info!("🚌 {}", message);
        Ok(ApiResponse::success_with_message(outcome, message))
    }

    pub async fn assign(
        &self,
        request: AssignVehicleRequest,
    ) -> Result<ApiResponse<AssignOutcome>, AppError> {
        // Validar campos
        request.validate()?;

        let outcome = self
            .engine
            .write()
            .await
            .assign_vehicle(request.vehicle_id.trim())?;
        let message = outcome.summary();
        info!("🚌 {}", message);
        Ok(ApiResponse::success_with_message(outcome, message))
    }

    pub async fn departures(&self, limit: Option<usize>) -> Result<DeparturesResponse, AppError> {
        let limit = limit
            .unwrap_or(DEFAULT_DEPARTURES_LIMIT)
            .min(MAX_DEPARTURES_LIMIT);
        let engine = self.engine.read().await;
        let departures = engine
            .recent_departures(limit)
            .iter()
            .map(DepartureResponse::from)
            .collect();
        Ok(DeparturesResponse {
            total_recorded: engine.departures().len(),
            departures,
        })
    }
}
