use serde::Serialize;

use crate::engine::{TransitEngine, VerificationRecord};
use crate::models::fare;

// Línea de la tabla de tarifas
#[derive(Debug, Serialize)]
pub struct FareLine {
    pub category: String,
    pub minimum_fare: String,
}

// Tabla de tarifas vigente
#[derive(Debug, Serialize)]
pub struct FareTableResponse {
    pub fares: Vec<FareLine>,
    pub summary: String,
}

impl FareTableResponse {
    pub fn collect() -> Self {
        let fares = fare::fare_table()
            .into_iter()
            .map(|(category, minimum)| FareLine {
                category: category.as_str().to_string(),
                minimum_fare: minimum.to_string(),
            })
            .collect();
        Self {
            fares,
            summary: fare::price_info(),
        }
    }
}

// Asiento de verificación para clientes HTTP
#[derive(Debug, Serialize)]
pub struct VerificationResponse {
    pub passenger_id: i64,
    pub category: String,
    pub required: String,
    pub tendered: String,
    pub amount_collected: Option<String>,
    pub outcome: String,
    pub recorded_at: String,
}

impl From<&VerificationRecord> for VerificationResponse {
    fn from(record: &VerificationRecord) -> Self {
        Self {
            passenger_id: record.passenger_id,
            category: record.category.as_str().to_string(),
            required: record.required.to_string(),
            tendered: record.tendered.clone(),
            amount_collected: record.amount_collected.map(|amount| amount.to_string()),
            outcome: match record.outcome {
                crate::engine::VerificationOutcome::Verified => "verified".to_string(),
                crate::engine::VerificationOutcome::Denied => "denied".to_string(),
            },
            recorded_at: record.recorded_at.to_rfc3339(),
        }
    }
}

// Estado del ledger: total recaudado más la bitácora completa
#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    pub total_collected: String,
    pub verified_total: u64,
    pub denied_total: u64,
    pub verifications: Vec<VerificationResponse>,
}

impl LedgerResponse {
    pub fn collect(engine: &TransitEngine) -> Self {
        let ledger = engine.ledger();
        Self {
            total_collected: ledger.total_collected().to_string(),
            verified_total: ledger.verified_count(),
            denied_total: ledger.denied_count(),
            verifications: ledger
                .records()
                .into_iter()
                .map(VerificationResponse::from)
                .collect(),
        }
    }
}
