use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::{DepartureRecord, TransitEngine};
use crate::models::Vehicle;

// Request para reasignar el vehículo activo
#[derive(Debug, Deserialize, Validate)]
pub struct AssignVehicleRequest {
    #[validate(length(min = 1, max = 50))]
    pub vehicle_id: String,
}

// Query para el historial de partidas
#[derive(Debug, Deserialize)]
pub struct DeparturesQuery {
    pub limit: Option<usize>,
}

// Response de un vehículo del pool
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: String,
    pub capacity: u32,
    pub occupancy: u32,
    pub is_full: bool,
    pub is_active: bool,
    pub in_rotation: bool,
}

impl VehicleResponse {
    fn build(vehicle: &Vehicle, is_active: bool, in_rotation: bool) -> Self {
        Self {
            id: vehicle.id.clone(),
            capacity: vehicle.capacity(),
            occupancy: vehicle.occupancy(),
            is_full: vehicle.is_full(),
            is_active,
            in_rotation,
        }
    }
}

// Vista completa de la flota: rotación en orden, retirados y reserva
#[derive(Debug, Serialize)]
pub struct FleetStatusResponse {
    pub active_vehicle: Option<String>,
    pub rotation: Vec<VehicleResponse>,
    pub retired: Vec<VehicleResponse>,
    pub reserve: Vec<String>,
    pub standard_capacity: u32,
}

impl FleetStatusResponse {
    pub fn collect(engine: &TransitEngine) -> Self {
        let fleet = engine.fleet();
        let active = fleet.active_id().map(str::to_owned);
        let rotation = fleet
            .rotation_order()
            .filter_map(|id| fleet.get(id))
            .map(|vehicle| {
                let is_active = active.as_deref() == Some(vehicle.id.as_str());
                VehicleResponse::build(vehicle, is_active, true)
            })
            .collect();
        let retired = fleet
            .retired_ids()
            .into_iter()
            .filter_map(|id| fleet.get(id))
            .map(|vehicle| VehicleResponse::build(vehicle, false, false))
            .collect();
        Self {
            active_vehicle: active,
            rotation,
            retired,
            reserve: fleet.reserve_ids().map(str::to_owned).collect(),
            standard_capacity: fleet.standard_capacity(),
        }
    }
}

// Response de una partida registrada
#[derive(Debug, Serialize)]
pub struct DepartureResponse {
    pub id: String,
    pub vehicle_id: String,
    pub passengers_carried: u32,
    pub departed_at: String,
}

impl From<&DepartureRecord> for DepartureResponse {
    fn from(record: &DepartureRecord) -> Self {
        Self {
            id: record.id.to_string(),
            vehicle_id: record.vehicle_id.clone(),
            passengers_carried: record.passengers_carried,
            departed_at: record.departed_at.to_rfc3339(),
        }
    }
}

// Historial de partidas, la más reciente primero
#[derive(Debug, Serialize)]
pub struct DeparturesResponse {
    pub total_recorded: usize,
    pub departures: Vec<DepartureResponse>,
}
