//! Política de tarifas
//!
//! Tabla pura de montos mínimos por categoría. No guarda estado: la
//! recaudación vive en el ledger del motor.

use rust_decimal::Decimal;

use crate::models::passenger::FareCategory;

/// Monto mínimo exigido para la categoría. El match es exhaustivo sobre el
/// enum cerrado; no hay categoría "desconocida" que caiga a Standard.
pub fn minimum_fare(category: FareCategory) -> Decimal {
    match category {
        FareCategory::Vip => Decimal::new(10000, 2),
        FareCategory::Standard => Decimal::new(5000, 2),
        FareCategory::Discounted => Decimal::new(3500, 2),
    }
}

/// Tabla completa en orden de presentación (VIP, Standard, Discounted).
pub fn fare_table() -> Vec<(FareCategory, Decimal)> {
    FareCategory::ALL
        .iter()
        .map(|category| (*category, minimum_fare(*category)))
        .collect()
}

/// Resumen de precios en una línea para pantallas de operador.
pub fn price_info() -> String {
    format!(
        "VIP: ₱{} | Standard: ₱{} | Discounted: ₱{}",
        minimum_fare(FareCategory::Vip),
        minimum_fare(FareCategory::Standard),
        minimum_fare(FareCategory::Discounted),
    )
}
