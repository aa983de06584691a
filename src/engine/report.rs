//! Reporte operacional
//!
//! Proyección de solo lectura sobre el estado del motor: profundidades de
//! cola, rotación, recaudación y contadores de la sesión. Se arma bajo el
//! mismo lock de lectura que cualquier otra consulta.

use rust_decimal::Decimal;
use serde::Serialize;

use super::TransitEngine;
use crate::models::{fare, FareCategory};

/// Ventas acumuladas de una categoría.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySales {
    pub category: FareCategory,
    pub tickets_sold: u64,
    pub minimum_fare: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OperationsReport {
    pub waiting_ticketing: usize,
    pub ticket_capacity: usize,
    pub waiting_boarding: usize,
    pub boarding_capacity: usize,
    pub total_served: usize,
    pub active_vehicle: Option<String>,
    pub rotation: Vec<String>,
    pub reserve_remaining: usize,
    pub departures_recorded: usize,
    pub total_collected: Decimal,
    pub sales: Vec<CategorySales>,
    pub verified_total: u64,
    pub denied_total: u64,
    pub admitted_this_session: u64,
    pub removed_this_session: u64,
    pub roster_remaining: usize,
}

impl OperationsReport {
    pub fn collect(engine: &TransitEngine) -> Self {
        let ledger = engine.ledger();
        let sales = FareCategory::ALL
            .iter()
            .map(|category| CategorySales {
                category: *category,
                tickets_sold: ledger.sales_for(*category),
                minimum_fare: fare::minimum_fare(*category),
            })
            .collect();
        Self {
            waiting_ticketing: engine.ticketing().len(),
            ticket_capacity: engine.config().ticket_capacity,
            waiting_boarding: engine.boarding().len(),
            boarding_capacity: engine.config().boarding_capacity,
            total_served: engine.served().len(),
            active_vehicle: engine.fleet().active_id().map(str::to_owned),
            rotation: engine.fleet().rotation_order().map(str::to_owned).collect(),
            reserve_remaining: engine.fleet().reserve_len(),
            departures_recorded: engine.departures().len(),
            total_collected: ledger.total_collected(),
            sales,
            verified_total: ledger.verified_count(),
            denied_total: ledger.denied_count(),
            admitted_this_session: engine.admitted_this_session(),
            removed_this_session: engine.removed_this_session(),
            roster_remaining: engine.roster_remaining(),
        }
    }
}
