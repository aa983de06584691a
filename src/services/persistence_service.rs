//! Servicio de persistencia del motor
//!
//! Este módulo respalda el estado del motor en PostgreSQL y lo restaura al
//! arrancar. El motor en memoria es el autoritativo: las colas y la flota se
//! guardan por reemplazo completo del snapshot, mientras que pagos y salidas
//! son bitácoras solo-agregar con inserción idempotente.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::config::environment::EnvironmentConfig;
use crate::database::create_pool;
use crate::engine::{vehicle_name, EngineSnapshot};
use crate::repositories::{LedgerRepository, PassengerRepository, VehicleRepository};
use crate::utils::errors::AppError;

/// Respaldo del estado del motor. `None` en `load_snapshot` significa que no
/// hay estado previo y la terminal arranca de cero.
#[async_trait]
pub trait EngineStore: Send + Sync {
    async fn load_snapshot(&self) -> Result<Option<EngineSnapshot>, AppError>;
    async fn persist_snapshot(&self, snapshot: &EngineSnapshot) -> Result<(), AppError>;
}

pub struct PgEngineStore {
    passengers: PassengerRepository,
    vehicles: VehicleRepository,
    ledger: LedgerRepository,
    /// Nombres de unidad que la configuración puede llegar a usar, en orden.
    /// La reserva se deriva de los que aún no aparecen en la tabla.
    configured_names: Vec<String>,
}

impl PgEngineStore {
    /// Abre el pool y garantiza el esquema. El DDL es idempotente, correr
    /// dos instancias contra la misma base no rompe nada.
    pub async fn connect(database_url: &str, config: &EnvironmentConfig) -> anyhow::Result<Self> {
        let pool = create_pool(database_url).await?;
        ensure_schema(&pool).await?;
        info!("💾 Esquema de persistencia listo");

        let configured_names = (0..config.fleet_size + config.reserve_size)
            .map(vehicle_name)
            .collect();
        Ok(Self {
            passengers: PassengerRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            ledger: LedgerRepository::new(pool),
            configured_names,
        })
    }
}

#[async_trait]
impl EngineStore for PgEngineStore {
    async fn load_snapshot(&self) -> Result<Option<EngineSnapshot>, AppError> {
        if self.vehicles.is_empty().await? {
            return Ok(None);
        }
        let (ticketing, boarding) = self.passengers.load_queues().await?;
        let (vehicles, rotation) = self.vehicles.load_fleet().await?;
        let verifications = self.ledger.load_verifications().await?;
        let departures = self.ledger.load_departures().await?;

        let present: HashSet<&str> = vehicles.iter().map(|v| v.id.as_str()).collect();
        let reserve = self
            .configured_names
            .iter()
            .filter(|name| !present.contains(name.as_str()))
            .cloned()
            .collect();

        // El contador de ids se deriva del máximo persistido al rearmar.
        Ok(Some(EngineSnapshot {
            ticketing,
            boarding,
            vehicles,
            rotation,
            reserve,
            verifications,
            departures,
            next_passenger_id: 0,
        }))
    }

    async fn persist_snapshot(&self, snapshot: &EngineSnapshot) -> Result<(), AppError> {
        self.passengers
            .replace_queues(&snapshot.ticketing, &snapshot.boarding)
            .await?;
        self.vehicles
            .replace_fleet(&snapshot.vehicles, &snapshot.rotation)
            .await?;
        self.ledger
            .append_verifications(&snapshot.verifications)
            .await?;
        self.ledger.append_departures(&snapshot.departures).await?;
        Ok(())
    }
}

async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tq_passengers (
            passenger_id BIGINT PRIMARY KEY,
            name TEXT NOT NULL,
            destination TEXT NOT NULL,
            category TEXT NOT NULL,
            payment_method TEXT NOT NULL,
            amount_paid TEXT NOT NULL,
            verified BOOLEAN NOT NULL,
            status TEXT NOT NULL,
            queue_position INTEGER NOT NULL,
            assigned_vehicle TEXT,
            admitted_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tq_vehicles (
            vehicle_id TEXT PRIMARY KEY,
            capacity INTEGER NOT NULL,
            current_load INTEGER NOT NULL,
            is_active BOOLEAN NOT NULL,
            rotation_position INTEGER
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tq_payments (
            passenger_id BIGINT PRIMARY KEY,
            category TEXT NOT NULL,
            required NUMERIC(10, 2) NOT NULL,
            tendered TEXT NOT NULL,
            amount NUMERIC(10, 2),
            verification_status TEXT NOT NULL,
            recorded_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tq_departures (
            id UUID PRIMARY KEY,
            vehicle_id TEXT NOT NULL,
            passengers_carried INTEGER NOT NULL,
            departed_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
