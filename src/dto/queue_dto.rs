use serde::Serialize;

use crate::dto::passenger_dto::PassengerResponse;
use crate::engine::{QueueArea, TransitEngine};
use crate::models::Passenger;

// Snapshot de una cola en orden FIFO
#[derive(Debug, Serialize)]
pub struct QueueSnapshotResponse {
    pub area: String,
    pub depth: usize,
    pub capacity: usize,
    pub passengers: Vec<PassengerResponse>,
}

impl QueueSnapshotResponse {
    fn build<'a>(
        area: QueueArea,
        capacity: usize,
        passengers: impl Iterator<Item = &'a Passenger>,
    ) -> Self {
        let passengers: Vec<PassengerResponse> =
            passengers.map(PassengerResponse::from).collect();
        Self {
            area: area.to_string(),
            depth: passengers.len(),
            capacity,
            passengers,
        }
    }

    pub fn ticketing(engine: &TransitEngine) -> Self {
        Self::build(
            QueueArea::Ticketing,
            engine.config().ticket_capacity,
            engine.ticketing().iter(),
        )
    }

    pub fn boarding(engine: &TransitEngine) -> Self {
        Self::build(
            QueueArea::Boarding,
            engine.config().boarding_capacity,
            engine.boarding().iter(),
        )
    }
}

// Vista combinada de la terminal
#[derive(Debug, Serialize)]
pub struct QueuesOverviewResponse {
    pub ticketing: QueueSnapshotResponse,
    pub boarding: QueueSnapshotResponse,
    pub served_total: usize,
    pub active_vehicle: Option<String>,
}

impl QueuesOverviewResponse {
    pub fn collect(engine: &TransitEngine) -> Self {
        Self {
            ticketing: QueueSnapshotResponse::ticketing(engine),
            boarding: QueueSnapshotResponse::boarding(engine),
            served_total: engine.served().len(),
            active_vehicle: engine.fleet().active_id().map(str::to_owned),
        }
    }
}

// Bitácora de pasajeros ya sentados, en orden de abordaje
#[derive(Debug, Serialize)]
pub struct ServedLogResponse {
    pub total: usize,
    pub passengers: Vec<PassengerResponse>,
}

impl ServedLogResponse {
    pub fn collect(engine: &TransitEngine) -> Self {
        let passengers: Vec<PassengerResponse> = engine
            .served()
            .iter()
            .map(PassengerResponse::from)
            .collect();
        Self {
            total: passengers.len(),
            passengers,
        }
    }
}
