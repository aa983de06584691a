use sqlx::PgPool;
use tracing::warn;

use crate::models::Vehicle;
use crate::utils::errors::AppError;

// Fila persistida de una unidad del pool
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    vehicle_id: String,
    capacity: i32,
    current_load: i32,
    rotation_position: Option<i32>,
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// `true` cuando la tabla no tiene unidades, es decir, base recién
    /// creada sin estado que restaurar.
    pub async fn is_empty(&self) -> Result<bool, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tq_vehicles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count == 0)
    }

    /// Reemplaza el pool completo. `rotation_position` es NULL para las
    /// unidades retiradas; el activo es la posición 0.
    pub async fn replace_fleet(
        &self,
        vehicles: &[Vehicle],
        rotation: &[String],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM tq_vehicles").execute(&mut *tx).await?;
        for vehicle in vehicles {
            let rotation_position = rotation
                .iter()
                .position(|id| id == &vehicle.id)
                .map(|position| position as i32);
            let is_active = rotation_position == Some(0);
            sqlx::query(
                r#"
                INSERT INTO tq_vehicles
                    (vehicle_id, capacity, current_load, is_active, rotation_position)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(&vehicle.id)
            .bind(vehicle.capacity() as i32)
            .bind(vehicle.occupancy() as i32)
            .bind(is_active)
            .bind(rotation_position)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Carga el pool y el orden de rotación. Filas con números negativos
    /// se descartan con warning.
    pub async fn load_fleet(&self) -> Result<(Vec<Vehicle>, Vec<String>), AppError> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            "SELECT * FROM tq_vehicles ORDER BY rotation_position ASC NULLS LAST, vehicle_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut vehicles = Vec::new();
        let mut rotation: Vec<(i32, String)> = Vec::new();
        for row in rows {
            if row.capacity < 0 || row.current_load < 0 {
                warn!(
                    "⚠️ Unidad {} con números negativos en la tabla, se descarta",
                    row.vehicle_id
                );
                continue;
            }
            if row.current_load > row.capacity {
                warn!(
                    "⚠️ Unidad {} con carga {} sobre el cupo {}, se recorta",
                    row.vehicle_id, row.current_load, row.capacity
                );
            }
            vehicles.push(Vehicle::restore(
                row.vehicle_id.clone(),
                row.capacity as u32,
                row.current_load as u32,
            ));
            if let Some(position) = row.rotation_position {
                rotation.push((position, row.vehicle_id));
            }
        }
        rotation.sort_by_key(|(position, _)| *position);
        let rotation = rotation.into_iter().map(|(_, id)| id).collect();
        Ok((vehicles, rotation))
    }
}
