use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::engine::{DepartureRecord, VerificationOutcome, VerificationRecord};
use crate::models::FareCategory;
use crate::utils::errors::AppError;

// Fila persistida de la bitácora de verificación
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    passenger_id: i64,
    category: String,
    required: Decimal,
    tendered: String,
    amount: Option<Decimal>,
    verification_status: String,
    recorded_at: DateTime<Utc>,
}

impl PaymentRow {
    fn into_record(self) -> Result<VerificationRecord, String> {
        let category: FareCategory = self.category.parse().map_err(|e| format!("{}", e))?;
        let outcome = match self.verification_status.as_str() {
            "verified" => VerificationOutcome::Verified,
            "denied" => VerificationOutcome::Denied,
            other => return Err(format!("estado de verificación desconocido: {}", other)),
        };
        Ok(VerificationRecord {
            passenger_id: self.passenger_id,
            category,
            required: self.required,
            tendered: self.tendered,
            amount_collected: self.amount,
            outcome,
            recorded_at: self.recorded_at,
        })
    }
}

// Fila persistida de una salida de unidad
#[derive(Debug, sqlx::FromRow)]
struct DepartureRow {
    id: Uuid,
    vehicle_id: String,
    passengers_carried: i32,
    departed_at: DateTime<Utc>,
}

pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta los asientos que aún no estén en la tabla. La bitácora es
    /// solo-agregar: un pasajero ya asentado se deja como está.
    pub async fn append_verifications(
        &self,
        records: &[VerificationRecord],
    ) -> Result<(), AppError> {
        for record in records {
            let status = match record.outcome {
                VerificationOutcome::Verified => "verified",
                VerificationOutcome::Denied => "denied",
            };
            sqlx::query(
                r#"
                INSERT INTO tq_payments
                    (passenger_id, category, required, tendered, amount, verification_status, recorded_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (passenger_id) DO NOTHING
                "#,
            )
            .bind(record.passenger_id)
            .bind(record.category.as_str())
            .bind(record.required)
            .bind(&record.tendered)
            .bind(record.amount_collected)
            .bind(status)
            .bind(record.recorded_at)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    pub async fn load_verifications(&self) -> Result<Vec<VerificationRecord>, AppError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            "SELECT * FROM tq_payments ORDER BY recorded_at ASC, passenger_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::new();
        for row in rows {
            let passenger_id = row.passenger_id;
            match row.into_record() {
                Ok(record) => records.push(record),
                Err(reason) => {
                    warn!(
                        "⚠️ Asiento de pago ilegible para el pasajero {}: {}",
                        passenger_id, reason
                    );
                }
            }
        }
        Ok(records)
    }

    /// Inserta las salidas que aún no estén en la tabla, identificadas por
    /// su UUID.
    pub async fn append_departures(&self, departures: &[DepartureRecord]) -> Result<(), AppError> {
        for departure in departures {
            sqlx::query(
                r#"
                INSERT INTO tq_departures (id, vehicle_id, passengers_carried, departed_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(departure.id)
            .bind(&departure.vehicle_id)
            .bind(departure.passengers_carried as i32)
            .bind(departure.departed_at)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    pub async fn load_departures(&self) -> Result<Vec<DepartureRecord>, AppError> {
        let rows = sqlx::query_as::<_, DepartureRow>(
            "SELECT * FROM tq_departures ORDER BY departed_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let departures = rows
            .into_iter()
            .map(|row| DepartureRecord {
                id: row.id,
                vehicle_id: row.vehicle_id,
                passengers_carried: row.passengers_carried.max(0) as u32,
                departed_at: row.departed_at,
            })
            .collect();
        Ok(departures)
    }
}
