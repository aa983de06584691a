use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;
use validator::Validate;

use crate::dto::passenger_dto::{
    CreatePassengerRequest, SearchQuery, SearchResponse, SeedPassengersRequest,
    UpdatePassengerRequest,
};
use crate::dto::ApiResponse;
use crate::engine::{
    AdmitOutcome, PassengerUpdate, RemoveOutcome, SeedOutcome, TransitEngine, UpdateOutcome,
};
use crate::models::{
    FareCategory, ParseFareCategoryError, ParsePaymentMethodError, PassengerDraft, PaymentMethod,
};
use crate::utils::errors::AppError;

pub struct PassengerController {
    engine: Arc<RwLock<TransitEngine>>,
}

impl PassengerController {
    pub fn new(engine: Arc<RwLock<TransitEngine>>) -> Self {
        Self { engine }
    }

    pub async fn admit(
        &self,
        request: CreatePassengerRequest,
    ) -> Result<ApiResponse<AdmitOutcome>, AppError> {
        // Validar campos
        request.validate()?;

        // Convertir texto a enums de dominio
        let category: FareCategory = request
            .category
            .parse()
            .map_err(|e: ParseFareCategoryError| AppError::BadRequest(e.to_string()))?;
        let payment_method = match request.payment_method {
            Some(raw) => raw
                .parse()
                .map_err(|e: ParsePaymentMethodError| AppError::BadRequest(e.to_string()))?,
            None => PaymentMethod::Cash,
        };

        let draft = PassengerDraft {
            name: request.name,
            destination: request.destination,
            category,
            payment_method,
            amount_paid: request.amount_paid,
        };

        let outcome = self.engine.write().await.admit(draft)?;
        let message = outcome.summary();
        info!("🎫 {}", message);
        Ok(ApiResponse::success_with_message(outcome, message))
    }

    pub async fn seed(
        &self,
        request: SeedPassengersRequest,
    ) -> Result<ApiResponse<SeedOutcome>, AppError> {
        // Validar campos
        request.validate()?;

        let outcome = self.engine.write().await.seed_from_roster(request.count);
        let message = outcome.summary();
        info!("🎫 {}", message);
        Ok(ApiResponse::success_with_message(outcome, message))
    }

    pub async fn search(&self, query: SearchQuery) -> Result<SearchResponse, AppError> {
        let engine = self.engine.read().await;
        let found = engine
            .search(&query.q)
            .ok_or_else(|| AppError::NotFound(format!("No passenger matches '{}'", query.q.trim())))?;
        Ok(SearchResponse::from(&found))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdatePassengerRequest,
    ) -> Result<ApiResponse<UpdateOutcome>, AppError> {
        // Validar campos
        request.validate()?;

        let category: FareCategory = request
            .category
            .parse()
            .map_err(|e: ParseFareCategoryError| AppError::BadRequest(e.to_string()))?;
        let update = PassengerUpdate {
            name: request.name,
            destination: request.destination,
            category,
        };

        let outcome = self.engine.write().await.update_passenger(id, update)?;
        let message = outcome.summary();
        info!("✏️ {}", message);
        Ok(ApiResponse::success_with_message(outcome, message))
    }

    pub async fn remove(&self, id: i64) -> Result<ApiResponse<RemoveOutcome>, AppError> {
        let outcome = self.engine.write().await.remove_passenger(id)?;
        let message = outcome.summary();
        info!("🗑️ {}", message);
        Ok(ApiResponse::success_with_message(outcome, message))
    }
}
