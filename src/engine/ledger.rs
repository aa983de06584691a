//! Ledger de recaudación
//!
//! Acumula lo cobrado en verificaciones exitosas y lleva la bitácora de
//! verificación por pasajero. Un pasajero pasa por verificación a lo sumo
//! una vez, así que la bitácora se indexa por su identificador.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::FareCategory;

/// Desenlace de una verificación de pago.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VerificationOutcome {
    Verified,
    Denied,
}

/// Asiento de la bitácora de verificación.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationRecord {
    pub passenger_id: i64,
    pub category: FareCategory,
    pub required: Decimal,
    /// Texto crudo que entregó el pasajero, legible o no.
    pub tendered: String,
    /// Monto efectivamente cobrado; solo presente si fue verificado.
    pub amount_collected: Option<Decimal>,
    pub outcome: VerificationOutcome,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct FareLedger {
    total_collected: Decimal,
    sales: HashMap<FareCategory, u64>,
    records: HashMap<i64, VerificationRecord>,
}

impl FareLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rearma el ledger desde asientos persistidos. Totales y ventas se
    /// recalculan de los asientos verificados.
    pub fn restore(records: Vec<VerificationRecord>) -> Self {
        let mut ledger = Self::new();
        for record in records {
            if record.outcome == VerificationOutcome::Verified {
                if let Some(amount) = record.amount_collected {
                    ledger.total_collected += amount;
                    *ledger.sales.entry(record.category).or_insert(0) += 1;
                }
            }
            ledger.records.insert(record.passenger_id, record);
        }
        ledger
    }

    /// Asienta una verificación exitosa y suma el monto al total.
    pub fn record_verified(
        &mut self,
        passenger_id: i64,
        category: FareCategory,
        required: Decimal,
        tendered: String,
        amount: Decimal,
        recorded_at: DateTime<Utc>,
    ) {
        self.total_collected += amount;
        *self.sales.entry(category).or_insert(0) += 1;
        let previous = self.records.insert(
            passenger_id,
            VerificationRecord {
                passenger_id,
                category,
                required,
                tendered,
                amount_collected: Some(amount),
                outcome: VerificationOutcome::Verified,
                recorded_at,
            },
        );
        debug_assert!(previous.is_none(), "passenger verified twice");
    }

    /// Asienta una denegación. No afecta el total recaudado.
    pub fn record_denied(
        &mut self,
        passenger_id: i64,
        category: FareCategory,
        required: Decimal,
        tendered: String,
        recorded_at: DateTime<Utc>,
    ) {
        let previous = self.records.insert(
            passenger_id,
            VerificationRecord {
                passenger_id,
                category,
                required,
                tendered,
                amount_collected: None,
                outcome: VerificationOutcome::Denied,
                recorded_at,
            },
        );
        debug_assert!(previous.is_none(), "passenger verified twice");
    }

    pub fn total_collected(&self) -> Decimal {
        self.total_collected
    }

    pub fn sales_for(&self, category: FareCategory) -> u64 {
        self.sales.get(&category).copied().unwrap_or(0)
    }

    pub fn verified_count(&self) -> u64 {
        self.records
            .values()
            .filter(|record| record.outcome == VerificationOutcome::Verified)
            .count() as u64
    }

    pub fn denied_count(&self) -> u64 {
        self.records
            .values()
            .filter(|record| record.outcome == VerificationOutcome::Denied)
            .count() as u64
    }

    pub fn record_for(&self, passenger_id: i64) -> Option<&VerificationRecord> {
        self.records.get(&passenger_id)
    }

    /// Asientos ordenados por fecha y, a igual fecha, por identificador.
    pub fn records(&self) -> Vec<&VerificationRecord> {
        let mut records: Vec<&VerificationRecord> = self.records.values().collect();
        records.sort_by_key(|record| (record.recorded_at, record.passenger_id));
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        use std::str::FromStr;
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_totals_accumulate_only_verified() {
        let mut ledger = FareLedger::new();
        let now = Utc::now();
        ledger.record_verified(1, FareCategory::Standard, dec("50.00"), "50.00".into(), dec("50.00"), now);
        ledger.record_verified(2, FareCategory::Vip, dec("100.00"), "120.00".into(), dec("120.00"), now);
        ledger.record_denied(3, FareCategory::Standard, dec("50.00"), "45.00".into(), now);

        assert_eq!(ledger.total_collected(), dec("170.00"));
        assert_eq!(ledger.sales_for(FareCategory::Standard), 1);
        assert_eq!(ledger.sales_for(FareCategory::Vip), 1);
        assert_eq!(ledger.sales_for(FareCategory::Discounted), 0);
        assert_eq!(ledger.verified_count(), 2);
        assert_eq!(ledger.denied_count(), 1);
    }

    #[test]
    fn test_restore_recomputes_totals() {
        let now = Utc::now();
        let records = vec![
            VerificationRecord {
                passenger_id: 1,
                category: FareCategory::Standard,
                required: dec("50.00"),
                tendered: "60.00".into(),
                amount_collected: Some(dec("60.00")),
                outcome: VerificationOutcome::Verified,
                recorded_at: now,
            },
            VerificationRecord {
                passenger_id: 2,
                category: FareCategory::Discounted,
                required: dec("35.00"),
                tendered: "abc".into(),
                amount_collected: None,
                outcome: VerificationOutcome::Denied,
                recorded_at: now,
            },
        ];
        let ledger = FareLedger::restore(records);
        assert_eq!(ledger.total_collected(), dec("60.00"));
        assert_eq!(ledger.sales_for(FareCategory::Standard), 1);
        assert_eq!(ledger.denied_count(), 1);
        assert!(ledger.record_for(2).is_some());
    }
}
