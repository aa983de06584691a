//! Motor de colas y rotación
//!
//! Estado autoritativo de la terminal: las dos colas FIFO, la bitácora de
//! servidos, la rotación de flota y el ledger de recaudación. Todas las
//! operaciones mutan bajo `&mut self`; la capa HTTP lo envuelve en un
//! `RwLock` y cada operación corre completa o no corre. Los chequeos van
//! siempre antes de la primera mutación, así un rechazo deja el estado
//! intacto.

pub mod error;
pub mod fleet;
pub mod ledger;
pub mod outcome;
pub mod report;

use std::collections::VecDeque;
use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{fare, FareCategory, Passenger, PassengerDraft, PassengerStatus, VehicleFull};
use crate::models::{Vehicle, PREDEFINED_ROSTER};

pub use error::EngineError;
pub use fleet::{vehicle_name, DepartureRecord, FleetRotation, RotationShift};
pub use ledger::{FareLedger, VerificationOutcome, VerificationRecord};
pub use outcome::{
    AdmitOutcome, AdvanceOutcome, AssignOutcome, BoardOutcome, DepartOutcome, RemoveOutcome,
    SearchMatch, SeedOutcome, UpdateOutcome, UpdatedField,
};
pub use report::{CategorySales, OperationsReport};

/// Las dos colas activas de la terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueArea {
    Ticketing,
    Boarding,
}

impl fmt::Display for QueueArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueArea::Ticketing => f.write_str("TICKET AREA"),
            QueueArea::Boarding => f.write_str("BOARDING AREA"),
        }
    }
}

/// Parámetros fijos del motor, resueltos una vez al arranque.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub ticket_capacity: usize,
    pub boarding_capacity: usize,
    pub vehicle_capacity: u32,
    pub fleet_size: usize,
    pub reserve_size: usize,
    /// Con `true`, un cambio de categoría en una actualización exige que el
    /// monto ya entregado cubra la nueva tarifa. Con `false` se aplica el
    /// comportamiento histórico: la actualización nunca re-verifica.
    pub strict_update_reverification: bool,
    pub first_passenger_id: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ticket_capacity: 15,
            boarding_capacity: 15,
            vehicle_capacity: 10,
            fleet_size: 4,
            reserve_size: 6,
            strict_update_reverification: false,
            first_passenger_id: 1,
        }
    }
}

/// Cambios solicitados para un pasajero encolado. El identificador, el
/// método de pago y el monto entregado no se tocan nunca por esta vía.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerUpdate {
    pub name: String,
    pub destination: String,
    pub category: FareCategory,
}

/// Estado serializable completo del motor para persistencia.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineSnapshot {
    pub ticketing: Vec<Passenger>,
    pub boarding: Vec<Passenger>,
    pub vehicles: Vec<Vehicle>,
    pub rotation: Vec<String>,
    pub reserve: Vec<String>,
    pub verifications: Vec<VerificationRecord>,
    pub departures: Vec<DepartureRecord>,
    pub next_passenger_id: i64,
}

#[derive(Debug, Clone)]
pub struct TransitEngine {
    ticketing: VecDeque<Passenger>,
    boarding: VecDeque<Passenger>,
    served: Vec<Passenger>,
    fleet: FleetRotation,
    ledger: FareLedger,
    departures: Vec<DepartureRecord>,
    next_passenger_id: i64,
    admitted_this_session: u64,
    removed_this_session: u64,
    config: EngineConfig,
}

impl TransitEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            ticketing: VecDeque::new(),
            boarding: VecDeque::new(),
            served: Vec::new(),
            fleet: FleetRotation::seed(
                config.fleet_size,
                config.reserve_size,
                config.vehicle_capacity,
            ),
            ledger: FareLedger::new(),
            departures: Vec::new(),
            next_passenger_id: config.first_passenger_id,
            admitted_this_session: 0,
            removed_this_session: 0,
            config,
        }
    }

    /// Rearma el motor desde un snapshot persistido. La secuencia de
    /// identificadores retoma por encima de todo id ya visto para que
    /// ningún pasajero nuevo repita uno histórico. Los contadores de
    /// sesión y la bitácora de servidos arrancan vacíos.
    pub fn from_snapshot(config: EngineConfig, snapshot: EngineSnapshot) -> Self {
        let EngineSnapshot {
            ticketing,
            boarding,
            vehicles,
            rotation,
            reserve,
            verifications,
            departures,
            next_passenger_id,
        } = snapshot;
        let max_queued = ticketing
            .iter()
            .chain(boarding.iter())
            .map(Passenger::id)
            .max()
            .unwrap_or(0);
        let max_verified = verifications
            .iter()
            .map(|record| record.passenger_id)
            .max()
            .unwrap_or(0);
        let next_id = next_passenger_id
            .max(max_queued + 1)
            .max(max_verified + 1)
            .max(config.first_passenger_id);
        Self {
            ticketing: ticketing.into(),
            boarding: boarding.into(),
            served: Vec::new(),
            fleet: FleetRotation::restore(vehicles, rotation, reserve, config.vehicle_capacity),
            ledger: FareLedger::restore(verifications),
            departures,
            next_passenger_id: next_id,
            admitted_this_session: 0,
            removed_this_session: 0,
            config,
        }
    }

    // --- Admisión ---

    /// Admite un pasajero al final del área de boletos y le asigna el
    /// siguiente identificador de la secuencia.
    pub fn admit(&mut self, draft: PassengerDraft) -> Result<AdmitOutcome, EngineError> {
        if self.ticketing.len() >= self.config.ticket_capacity {
            return Err(EngineError::CapacityExceeded {
                area: QueueArea::Ticketing,
                capacity: self.config.ticket_capacity,
            });
        }
        let id = self.next_id();
        self.ticketing.push_back(Passenger::from_draft(id, draft));
        self.admitted_this_session += 1;
        Ok(AdmitOutcome {
            passenger_id: id,
            queue_depth: self.ticketing.len(),
            capacity: self.config.ticket_capacity,
        })
    }

    /// Siembra hasta `count` entradas de la nómina predefinida. Una entrada
    /// cuyo nombre y destino ya figuran en alguna cola o en la bitácora de
    /// servidos se salta y se cuenta aparte; el área llena detiene las
    /// altas pero no el conteo de repetidos.
    pub fn seed_from_roster(&mut self, count: u32) -> SeedOutcome {
        if self.roster_remaining() == 0 {
            return SeedOutcome {
                added: 0,
                skipped: 0,
                queue_depth: self.ticketing.len(),
                capacity: self.config.ticket_capacity,
                roster_exhausted: true,
            };
        }
        let mut added = 0u32;
        let mut skipped = 0u32;
        for entry in PREDEFINED_ROSTER.iter() {
            if added >= count {
                break;
            }
            if self.roster_entry_in_system(entry.name, entry.destination) {
                skipped += 1;
            } else if self.ticketing.len() < self.config.ticket_capacity {
                let id = self.next_id();
                self.ticketing.push_back(Passenger::from_draft(id, entry.draft()));
                self.admitted_this_session += 1;
                added += 1;
            }
        }
        SeedOutcome {
            added,
            skipped,
            queue_depth: self.ticketing.len(),
            capacity: self.config.ticket_capacity,
            roster_exhausted: false,
        }
    }

    // --- Verificación y abordaje ---

    /// Saca al primero del área de boletos, verifica su pago y lo pasa al
    /// área de abordaje. Un monto ilegible o corto deniega al pasajero: el
    /// registro sale del sistema y queda solo el asiento en la bitácora de
    /// verificación.
    pub fn advance_to_boarding(&mut self) -> Result<AdvanceOutcome, EngineError> {
        if self.ticketing.is_empty() {
            return Err(EngineError::EmptySource {
                area: QueueArea::Ticketing,
            });
        }
        if self.boarding.len() >= self.config.boarding_capacity {
            return Err(EngineError::CapacityExceeded {
                area: QueueArea::Boarding,
                capacity: self.config.boarding_capacity,
            });
        }
        let Some(mut passenger) = self.ticketing.pop_front() else {
            return Err(EngineError::EmptySource {
                area: QueueArea::Ticketing,
            });
        };
        let required = fare::minimum_fare(passenger.category);
        let now = Utc::now();
        match passenger.tendered_amount() {
            Some(amount) if amount >= required => {
                passenger.verified = true;
                passenger.status = PassengerStatus::Boarding;
                let assigned = self.fleet.active_id().map(str::to_owned);
                passenger.assigned_vehicle = assigned.clone();
                self.ledger.record_verified(
                    passenger.id(),
                    passenger.category,
                    required,
                    passenger.amount_paid.clone(),
                    amount,
                    now,
                );
                let outcome = AdvanceOutcome {
                    passenger_id: passenger.id(),
                    name: passenger.name.clone(),
                    amount_collected: amount,
                    assigned_vehicle: assigned,
                    boarding_depth: self.boarding.len() + 1,
                };
                self.boarding.push_back(passenger);
                Ok(outcome)
            }
            _ => {
                self.ledger.record_denied(
                    passenger.id(),
                    passenger.category,
                    required,
                    passenger.amount_paid.clone(),
                    now,
                );
                Err(EngineError::Denied {
                    id: passenger.id(),
                    name: passenger.name.clone(),
                    required,
                    tendered: passenger.amount_paid.clone(),
                })
            }
        }
    }

    /// Sube al primero del área de abordaje al vehículo activo. El cupo se
    /// verifica y consume en una sola llamada sobre el vehículo; si está
    /// lleno, el pasajero vuelve al frente de la cola y el orden no cambia.
    pub fn board_active_vehicle(&mut self) -> Result<BoardOutcome, EngineError> {
        if self.boarding.is_empty() {
            return Err(EngineError::EmptySource {
                area: QueueArea::Boarding,
            });
        }
        let Some(vehicle) = self.fleet.active_mut() else {
            return Err(EngineError::NoActiveVehicle);
        };
        let Some(mut passenger) = self.boarding.pop_front() else {
            return Err(EngineError::EmptySource {
                area: QueueArea::Boarding,
            });
        };
        match vehicle.board() {
            Ok(load) => {
                passenger.status = PassengerStatus::Boarded;
                passenger.boarded_at = Some(Utc::now());
                passenger.assigned_vehicle = Some(vehicle.id.clone());
                let outcome = BoardOutcome {
                    passenger_id: passenger.id(),
                    vehicle_id: vehicle.id.clone(),
                    load,
                    capacity: vehicle.capacity(),
                };
                self.served.push(passenger);
                Ok(outcome)
            }
            Err(VehicleFull) => {
                let id = vehicle.id.clone();
                self.boarding.push_front(passenger);
                Err(EngineError::VehicleFull { id })
            }
        }
    }

    // --- Flota ---

    /// Despacha al vehículo activo: registra la partida, lo reinicia y
    /// corre la rotación. Con reserva disponible entra una unidad fresca
    /// al final; sin reserva, la misma unidad se recicla.
    pub fn depart_active_vehicle(&mut self) -> Result<DepartOutcome, EngineError> {
        let Some(vehicle) = self.fleet.active_mut() else {
            return Err(EngineError::NoActiveVehicle);
        };
        if vehicle.is_empty() {
            return Err(EngineError::EmptyVehicle {
                id: vehicle.id.clone(),
            });
        }
        let carried = vehicle.occupancy();
        vehicle.reset();
        let Some(shift) = self.fleet.rotate_out_active() else {
            return Err(EngineError::NoActiveVehicle);
        };
        let record = DepartureRecord {
            id: Uuid::new_v4(),
            vehicle_id: shift.departed.clone(),
            passengers_carried: carried,
            departed_at: Utc::now(),
        };
        self.departures.push(record.clone());
        Ok(DepartOutcome {
            record_id: record.id,
            departed_vehicle: shift.departed,
            passengers_carried: carried,
            introduced_vehicle: shift.introduced,
            active_vehicle: shift.next_active,
        })
    }

    /// Trae un vehículo del pool al frente de la rotación. Solo procede si
    /// la unidad está vacía; una unidad retirada vuelve a entrar.
    pub fn assign_vehicle(&mut self, vehicle_id: &str) -> Result<AssignOutcome, EngineError> {
        let Some(vehicle) = self.fleet.get(vehicle_id) else {
            return Err(EngineError::UnknownVehicle {
                id: vehicle_id.to_string(),
            });
        };
        if self.fleet.active_id() == Some(vehicle_id) {
            return Ok(AssignOutcome {
                vehicle_id: vehicle_id.to_string(),
                already_active: true,
            });
        }
        if vehicle.is_full() {
            return Err(EngineError::AlreadyFull {
                id: vehicle_id.to_string(),
            });
        }
        if !vehicle.is_empty() {
            return Err(EngineError::OccupiedElsewhere {
                id: vehicle_id.to_string(),
                occupancy: vehicle.occupancy(),
            });
        }
        self.fleet.promote(vehicle_id);
        Ok(AssignOutcome {
            vehicle_id: vehicle_id.to_string(),
            already_active: false,
        })
    }

    // --- Consultas y mantenimiento ---

    /// Busca por identificador si el token parsea como entero; si no, por
    /// nombre exacto sin distinguir mayúsculas. Área de boletos primero.
    pub fn search(&self, token: &str) -> Option<SearchMatch> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        if let Ok(id) = token.parse::<i64>() {
            self.locate(|passenger| passenger.id() == id)
        } else {
            self.locate(|passenger| passenger.name_matches(token))
        }
    }

    /// Actualiza nombre, destino y categoría de un pasajero encolado. En
    /// modo histórico el cambio de categoría nunca re-verifica el pago; en
    /// modo estricto, un cambio de categoría cuya tarifa el monto entregado
    /// no cubre se rechaza completo sin tocar el registro.
    pub fn update_passenger(
        &mut self,
        id: i64,
        update: PassengerUpdate,
    ) -> Result<UpdateOutcome, EngineError> {
        let strict = self.config.strict_update_reverification;
        let Some(passenger) = self.find_queued_mut(id) else {
            return Err(EngineError::NotFound { id });
        };
        if strict && update.category != passenger.category {
            let required = fare::minimum_fare(update.category);
            let covers = passenger
                .tendered_amount()
                .map_or(false, |amount| amount >= required);
            if !covers {
                return Err(EngineError::Denied {
                    id,
                    name: passenger.name.clone(),
                    required,
                    tendered: passenger.amount_paid.clone(),
                });
            }
        }
        let mut changed = Vec::new();
        if passenger.name != update.name {
            passenger.name = update.name;
            changed.push(UpdatedField::Name);
        }
        if passenger.destination != update.destination {
            passenger.destination = update.destination;
            changed.push(UpdatedField::Destination);
        }
        if passenger.category != update.category {
            passenger.category = update.category;
            changed.push(UpdatedField::Category);
        }
        Ok(UpdateOutcome {
            passenger_id: id,
            changed,
            passenger: passenger.clone(),
        })
    }

    /// Retira a un pasajero de la cola donde esté. La bitácora de servidos
    /// es inmutable: un pasajero ya abordado no se puede retirar.
    pub fn remove_passenger(&mut self, id: i64) -> Result<RemoveOutcome, EngineError> {
        if let Some(position) = self.ticketing.iter().position(|p| p.id() == id) {
            if let Some(passenger) = self.ticketing.remove(position) {
                self.removed_this_session += 1;
                return Ok(RemoveOutcome {
                    passenger_id: id,
                    area: QueueArea::Ticketing,
                    passenger,
                });
            }
        }
        if let Some(position) = self.boarding.iter().position(|p| p.id() == id) {
            if let Some(passenger) = self.boarding.remove(position) {
                self.removed_this_session += 1;
                return Ok(RemoveOutcome {
                    passenger_id: id,
                    area: QueueArea::Boarding,
                    passenger,
                });
            }
        }
        Err(EngineError::NotFound { id })
    }

    // --- Lecturas ---

    pub fn ticketing(&self) -> &VecDeque<Passenger> {
        &self.ticketing
    }

    pub fn boarding(&self) -> &VecDeque<Passenger> {
        &self.boarding
    }

    pub fn served(&self) -> &[Passenger] {
        &self.served
    }

    pub fn fleet(&self) -> &FleetRotation {
        &self.fleet
    }

    pub fn ledger(&self) -> &FareLedger {
        &self.ledger
    }

    pub fn departures(&self) -> &[DepartureRecord] {
        &self.departures
    }

    /// Últimas partidas, la más reciente primero.
    pub fn recent_departures(&self, limit: usize) -> Vec<DepartureRecord> {
        self.departures.iter().rev().take(limit).cloned().collect()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn admitted_this_session(&self) -> u64 {
        self.admitted_this_session
    }

    pub fn removed_this_session(&self) -> u64 {
        self.removed_this_session
    }

    /// Entradas de la nómina que todavía no están en el sistema.
    pub fn roster_remaining(&self) -> usize {
        PREDEFINED_ROSTER
            .iter()
            .filter(|entry| !self.roster_entry_in_system(entry.name, entry.destination))
            .count()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        // Orden estable para que dos snapshots del mismo estado comparen igual
        let mut vehicles: Vec<Vehicle> = self.fleet.vehicles().cloned().collect();
        vehicles.sort_by(|a, b| a.id.cmp(&b.id));
        EngineSnapshot {
            ticketing: self.ticketing.iter().cloned().collect(),
            boarding: self.boarding.iter().cloned().collect(),
            vehicles,
            rotation: self.fleet.rotation_order().map(str::to_owned).collect(),
            reserve: self.fleet.reserve_ids().map(str::to_owned).collect(),
            verifications: self.ledger.records().into_iter().cloned().collect(),
            departures: self.departures.clone(),
            next_passenger_id: self.next_passenger_id,
        }
    }

    // --- Internos ---

    fn next_id(&mut self) -> i64 {
        let id = self.next_passenger_id;
        self.next_passenger_id += 1;
        id
    }

    fn locate(&self, matches: impl Fn(&Passenger) -> bool) -> Option<SearchMatch> {
        if let Some(position) = self.ticketing.iter().position(|p| matches(p)) {
            return self.ticketing.get(position).map(|passenger| SearchMatch {
                area: QueueArea::Ticketing,
                position,
                passenger: passenger.clone(),
            });
        }
        if let Some(position) = self.boarding.iter().position(|p| matches(p)) {
            return self.boarding.get(position).map(|passenger| SearchMatch {
                area: QueueArea::Boarding,
                position,
                passenger: passenger.clone(),
            });
        }
        None
    }

    fn find_queued_mut(&mut self, id: i64) -> Option<&mut Passenger> {
        if let Some(position) = self.ticketing.iter().position(|p| p.id() == id) {
            return self.ticketing.get_mut(position);
        }
        if let Some(position) = self.boarding.iter().position(|p| p.id() == id) {
            return self.boarding.get_mut(position);
        }
        None
    }

    fn roster_entry_in_system(&self, name: &str, destination: &str) -> bool {
        let matches = |p: &Passenger| p.name == name && p.destination == destination;
        self.ticketing.iter().any(matches)
            || self.boarding.iter().any(matches)
            || self.served.iter().any(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;

    fn draft(name: &str, amount: &str) -> PassengerDraft {
        PassengerDraft {
            name: name.to_string(),
            destination: "Downtown".to_string(),
            category: FareCategory::Standard,
            payment_method: PaymentMethod::Cash,
            amount_paid: amount.to_string(),
        }
    }

    #[test]
    fn test_ids_are_sequential_and_never_reused() {
        let mut engine = TransitEngine::new(EngineConfig::default());
        let first = engine.admit(draft("Ana", "50.00")).unwrap().passenger_id;
        let second = engine.admit(draft("Luis", "50.00")).unwrap().passenger_id;
        assert_eq!(second, first + 1);

        engine.remove_passenger(second).unwrap();
        let third = engine.admit(draft("Eva", "50.00")).unwrap().passenger_id;
        assert_eq!(third, second + 1);
    }

    #[test]
    fn test_search_prefers_id_parse_over_name() {
        let mut engine = TransitEngine::new(EngineConfig::default());
        engine.admit(draft("Ana", "50.00")).unwrap();
        engine.admit(draft("Luis", "50.00")).unwrap();

        let found = engine.search("2").unwrap();
        assert_eq!(found.passenger.name, "Luis");
        assert_eq!(found.area, QueueArea::Ticketing);
        assert_eq!(found.position, 1);

        let found = engine.search("  ana ").unwrap();
        assert_eq!(found.passenger.id(), 1);
        assert!(engine.search("").is_none());
        assert!(engine.search("nobody").is_none());
    }

    #[test]
    fn test_update_reports_changed_fields() {
        let mut engine = TransitEngine::new(EngineConfig::default());
        engine.admit(draft("Ana", "50.00")).unwrap();
        let outcome = engine
            .update_passenger(
                1,
                PassengerUpdate {
                    name: "Ana".to_string(),
                    destination: "Airport".to_string(),
                    category: FareCategory::Standard,
                },
            )
            .unwrap();
        assert_eq!(outcome.changed, vec![UpdatedField::Destination]);
        assert_eq!(outcome.passenger.destination, "Airport");
    }

    #[test]
    fn test_snapshot_round_trip_preserves_queues_and_sequence() {
        let mut engine = TransitEngine::new(EngineConfig::default());
        engine.admit(draft("Ana", "50.00")).unwrap();
        engine.admit(draft("Luis", "50.00")).unwrap();
        engine.advance_to_boarding().unwrap();

        let snapshot = engine.snapshot();
        let restored = TransitEngine::from_snapshot(EngineConfig::default(), snapshot);
        assert_eq!(restored.ticketing().len(), 1);
        assert_eq!(restored.boarding().len(), 1);
        assert_eq!(restored.fleet().active_id(), Some("BUS A"));

        let mut restored = restored;
        let next = restored.admit(draft("Eva", "50.00")).unwrap().passenger_id;
        assert_eq!(next, 3);
    }
}
