use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::str::FromStr;
use tracing::warn;

use crate::models::{FareCategory, Passenger, PassengerStatus, PaymentMethod};
use crate::utils::errors::AppError;

// Fila persistida de un pasajero encolado
#[derive(Debug, sqlx::FromRow)]
struct PassengerRow {
    passenger_id: i64,
    name: String,
    destination: String,
    category: String,
    payment_method: String,
    amount_paid: String,
    verified: bool,
    status: String,
    queue_position: i32,
    assigned_vehicle: Option<String>,
    admitted_at: DateTime<Utc>,
}

impl PassengerRow {
    fn into_passenger(self) -> Result<Passenger, String> {
        let category = FareCategory::from_str(&self.category).map_err(|e| e.to_string())?;
        let payment_method =
            PaymentMethod::from_str(&self.payment_method).map_err(|e| e.to_string())?;
        let status = PassengerStatus::from_str(&self.status).map_err(|e| e.to_string())?;
        Ok(Passenger::restore(
            self.passenger_id,
            self.name,
            self.destination,
            category,
            payment_method,
            self.amount_paid,
            self.verified,
            status,
            self.assigned_vehicle,
            self.admitted_at,
            None,
        ))
    }
}

pub struct PassengerRepository {
    pool: PgPool,
}

impl PassengerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reemplaza ambas colas en una transacción. La tabla refleja siempre
    /// el último snapshot completo; no hay updates parciales.
    pub async fn replace_queues(
        &self,
        ticketing: &[Passenger],
        boarding: &[Passenger],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM tq_passengers")
            .execute(&mut *tx)
            .await?;
        for (position, passenger) in ticketing.iter().enumerate() {
            Self::insert_row(&mut tx, passenger, position as i32).await?;
        }
        for (position, passenger) in boarding.iter().enumerate() {
            Self::insert_row(&mut tx, passenger, position as i32).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn insert_row(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        passenger: &Passenger,
        position: i32,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO tq_passengers
                (passenger_id, name, destination, category, payment_method,
                 amount_paid, verified, status, queue_position, assigned_vehicle, admitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(passenger.id())
        .bind(&passenger.name)
        .bind(&passenger.destination)
        .bind(passenger.category.as_str())
        .bind(passenger.payment_method.as_str())
        .bind(&passenger.amount_paid)
        .bind(passenger.verified)
        .bind(passenger.status.as_str())
        .bind(position)
        .bind(&passenger.assigned_vehicle)
        .bind(passenger.admitted_at)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Carga ambas colas en orden FIFO. Una fila ilegible se descarta con
    /// warning en vez de tumbar el arranque.
    pub async fn load_queues(&self) -> Result<(Vec<Passenger>, Vec<Passenger>), AppError> {
        let rows = sqlx::query_as::<_, PassengerRow>("SELECT * FROM tq_passengers")
            .fetch_all(&self.pool)
            .await?;
        Ok(Self::partition_rows(rows))
    }

    /// Separa las filas por cola y restituye el orden FIFO desde la
    /// posición persistida; el orden de llegada de las filas no cuenta.
    fn partition_rows(rows: Vec<PassengerRow>) -> (Vec<Passenger>, Vec<Passenger>) {
        let mut ticketing: Vec<(i32, Passenger)> = Vec::new();
        let mut boarding: Vec<(i32, Passenger)> = Vec::new();
        for row in rows {
            let passenger_id = row.passenger_id;
            let position = row.queue_position;
            match row.into_passenger() {
                Ok(passenger) => match passenger.status {
                    PassengerStatus::Ticketing => ticketing.push((position, passenger)),
                    PassengerStatus::Boarding => boarding.push((position, passenger)),
                    PassengerStatus::Boarded => {
                        warn!(
                            "⚠️ Pasajero {} aparece como abordado en la tabla de colas, se descarta",
                            passenger_id
                        );
                    }
                },
                Err(e) => {
                    warn!("⚠️ Fila de pasajero {} ilegible, se descarta: {}", passenger_id, e);
                }
            }
        }
        ticketing.sort_by_key(|(position, passenger)| (*position, passenger.id()));
        boarding.sort_by_key(|(position, passenger)| (*position, passenger.id()));
        (
            ticketing.into_iter().map(|(_, passenger)| passenger).collect(),
            boarding.into_iter().map(|(_, passenger)| passenger).collect(),
        )
    }
}
