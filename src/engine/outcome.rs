//! Resultados tipados de las operaciones del motor
//!
//! Cada operación exitosa devuelve un struct con los hechos que la capa
//! de presentación necesita, más un resumen de una línea en el formato
//! que esperan las pantallas de operador.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::QueueArea;
use crate::models::Passenger;

/// Admisión al área de boletos.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdmitOutcome {
    pub passenger_id: i64,
    pub queue_depth: usize,
    pub capacity: usize,
}

impl AdmitOutcome {
    pub fn summary(&self) -> String {
        format!(
            "ENQUEUE: Added to Ticket Area. ID: {}. Queue: {}/{}",
            self.passenger_id, self.queue_depth, self.capacity
        )
    }
}

/// Verificación aprobada y traslado al área de abordaje.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdvanceOutcome {
    pub passenger_id: i64,
    pub name: String,
    pub amount_collected: Decimal,
    pub assigned_vehicle: Option<String>,
    pub boarding_depth: usize,
}

impl AdvanceOutcome {
    pub fn summary(&self) -> String {
        format!(
            "PASS: Passenger ID {} verified and moved to BOARDING AREA. Assigned Bus: {}",
            self.passenger_id,
            self.assigned_vehicle.as_deref().unwrap_or("(none)")
        )
    }
}

/// Abordaje consumado en el vehículo activo.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BoardOutcome {
    pub passenger_id: i64,
    pub vehicle_id: String,
    pub load: u32,
    pub capacity: u32,
}

impl BoardOutcome {
    pub fn summary(&self) -> String {
        format!(
            "BOARDED: Passenger ID {} has boarded {}. Load: {}/{}",
            self.passenger_id, self.vehicle_id, self.load, self.capacity
        )
    }
}

/// Partida del vehículo activo y corrimiento de la rotación.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DepartOutcome {
    pub record_id: Uuid,
    pub departed_vehicle: String,
    pub passengers_carried: u32,
    /// Unidad fresca que entró desde la reserva, si quedaba alguna.
    pub introduced_vehicle: Option<String>,
    pub active_vehicle: Option<String>,
}

impl DepartOutcome {
    pub fn summary(&self) -> String {
        let mut message = format!(
            "DEPARTED: {} has departed with {} passengers.",
            self.departed_vehicle, self.passengers_carried
        );
        if let Some(active) = &self.active_vehicle {
            message.push_str(&format!(" New active bus: {}", active));
        }
        message
    }
}

/// Reasignación manual del vehículo activo.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssignOutcome {
    pub vehicle_id: String,
    /// `true` cuando la orden no cambió nada porque ya estaba al frente.
    pub already_active: bool,
}

impl AssignOutcome {
    pub fn summary(&self) -> String {
        if self.already_active {
            format!("ASSIGN BUS: {} is already the active bus", self.vehicle_id)
        } else {
            format!("ASSIGN BUS: Queue is now assigned to {}", self.vehicle_id)
        }
    }
}

/// Campo tocado por una actualización.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UpdatedField {
    Name,
    Destination,
    Category,
}

impl UpdatedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdatedField::Name => "Name",
            UpdatedField::Destination => "Destination",
            UpdatedField::Category => "Ticket Type",
        }
    }
}

/// Actualización en sitio de un pasajero encolado.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpdateOutcome {
    pub passenger_id: i64,
    pub changed: Vec<UpdatedField>,
    pub passenger: Passenger,
}

impl UpdateOutcome {
    pub fn summary(&self) -> String {
        if self.changed.is_empty() {
            return format!(
                "UPDATE: Passenger ID {} unchanged (no differences submitted)",
                self.passenger_id
            );
        }
        let fields: Vec<&str> = self.changed.iter().map(UpdatedField::as_str).collect();
        format!(
            "UPDATE: Passenger ID {} updated successfully. Fields changed: {}",
            self.passenger_id,
            fields.join(", ")
        )
    }
}

/// Retiro de un pasajero aún encolado.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RemoveOutcome {
    pub passenger_id: i64,
    pub area: QueueArea,
    pub passenger: Passenger,
}

impl RemoveOutcome {
    pub fn summary(&self) -> String {
        format!(
            "REMOVE: Passenger ID {} removed from {}.",
            self.passenger_id, self.area
        )
    }
}

/// Siembra desde la nómina predefinida.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeedOutcome {
    pub added: u32,
    pub skipped: u32,
    pub queue_depth: usize,
    pub capacity: usize,
    /// `true` cuando toda la nómina ya estaba en el sistema al pedir la
    /// siembra; no se intentó ninguna alta.
    pub roster_exhausted: bool,
}

impl SeedOutcome {
    pub fn summary(&self) -> String {
        if self.roster_exhausted {
            return "ALERT: No more predefined passengers available.".to_string();
        }
        let mut message = format!("ADDED: {} predefined passenger(s) to Ticket Area.", self.added);
        if self.skipped > 0 {
            message.push_str(&format!(
                " {} passenger(s) were already in the system.",
                self.skipped
            ));
        }
        if self.queue_depth >= self.capacity {
            message.push_str(" Ticket Area is now full.");
        }
        message
    }
}

/// Coincidencia de búsqueda con su ubicación en cola.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchMatch {
    pub area: QueueArea,
    /// Posición cero-basada dentro de la cola.
    pub position: usize,
    pub passenger: Passenger,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admit_summary_format() {
        let outcome = AdmitOutcome {
            passenger_id: 3,
            queue_depth: 5,
            capacity: 15,
        };
        assert_eq!(
            outcome.summary(),
            "ENQUEUE: Added to Ticket Area. ID: 3. Queue: 5/15"
        );
    }

    #[test]
    fn test_depart_summary_names_next_active() {
        let outcome = DepartOutcome {
            record_id: Uuid::nil(),
            departed_vehicle: "BUS A".to_string(),
            passengers_carried: 2,
            introduced_vehicle: Some("BUS E".to_string()),
            active_vehicle: Some("BUS B".to_string()),
        };
        assert_eq!(
            outcome.summary(),
            "DEPARTED: BUS A has departed with 2 passengers. New active bus: BUS B"
        );
    }

    #[test]
    fn test_seed_summary_variants() {
        let outcome = SeedOutcome {
            added: 0,
            skipped: 0,
            queue_depth: 3,
            capacity: 15,
            roster_exhausted: true,
        };
        assert_eq!(outcome.summary(), "ALERT: No more predefined passengers available.");

        let outcome = SeedOutcome {
            added: 3,
            skipped: 2,
            queue_depth: 15,
            capacity: 15,
            roster_exhausted: false,
        };
        let text = outcome.summary();
        assert!(text.starts_with("ADDED: 3 predefined passenger(s)"));
        assert!(text.contains("2 passenger(s) were already in the system."));
        assert!(text.ends_with("Ticket Area is now full."));
    }
}
