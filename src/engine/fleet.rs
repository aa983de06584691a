//! Rotación de flota
//!
//! Mantiene el pool de vehículos, el orden de rotación y la reserva de
//! identificadores aún no estrenados. El frente de la rotación es siempre
//! el vehículo activo. Un vehículo que sale de rotación sin reemplazo de
//! reserva se recicla al final; con reserva disponible queda retirado en
//! el pool y entra una unidad fresca, así el largo de la rotación nunca
//! cambia después del arranque.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Vehicle;

/// Nombre canónico para la unidad en la posición `index`: "BUS A", "BUS B"...
pub fn vehicle_name(index: usize) -> String {
    let letter = (b'A' + (index % 26) as u8) as char;
    format!("BUS {}", letter)
}

/// Constancia de una partida consumada.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartureRecord {
    pub id: Uuid,
    pub vehicle_id: String,
    pub passengers_carried: u32,
    pub departed_at: DateTime<Utc>,
}

/// Resultado estructural de sacar al activo de la rotación.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationShift {
    pub departed: String,
    /// Unidad de reserva que entró a la rotación, si había alguna.
    pub introduced: Option<String>,
    pub next_active: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FleetRotation {
    vehicles: HashMap<String, Vehicle>,
    rotation: VecDeque<String>,
    reserve: VecDeque<String>,
    standard_capacity: u32,
}

impl FleetRotation {
    /// Flota inicial: `fleet_size` unidades en rotación y `reserve_size`
    /// nombres en espera, todos con el mismo cupo.
    pub fn seed(fleet_size: usize, reserve_size: usize, capacity: u32) -> Self {
        let mut vehicles = HashMap::new();
        let mut rotation = VecDeque::new();
        for index in 0..fleet_size {
            let name = vehicle_name(index);
            vehicles.insert(name.clone(), Vehicle::new(name.clone(), capacity));
            rotation.push_back(name);
        }
        let reserve = (fleet_size..fleet_size + reserve_size)
            .map(vehicle_name)
            .collect();
        Self {
            vehicles,
            rotation,
            reserve,
            standard_capacity: capacity,
        }
    }

    /// Rearma la rotación desde un snapshot persistido. Los identificadores
    /// de `rotation` que no tengan vehículo en el pool se descartan.
    pub fn restore(
        vehicles: Vec<Vehicle>,
        rotation: Vec<String>,
        reserve: Vec<String>,
        standard_capacity: u32,
    ) -> Self {
        let vehicles: HashMap<String, Vehicle> = vehicles
            .into_iter()
            .map(|vehicle| (vehicle.id.clone(), vehicle))
            .collect();
        let rotation = rotation
            .into_iter()
            .filter(|id| vehicles.contains_key(id))
            .collect();
        Self {
            vehicles,
            rotation,
            reserve: reserve.into_iter().collect(),
            standard_capacity,
        }
    }

    pub fn active_id(&self) -> Option<&str> {
        self.rotation.front().map(String::as_str)
    }

    pub fn active(&self) -> Option<&Vehicle> {
        self.active_id().and_then(|id| self.vehicles.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut Vehicle> {
        let id = self.rotation.front()?.clone();
        self.vehicles.get_mut(&id)
    }

    pub fn get(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.vehicles.contains_key(id)
    }

    /// Identificadores en orden de rotación; el primero es el activo.
    pub fn rotation_order(&self) -> impl Iterator<Item = &str> {
        self.rotation.iter().map(String::as_str)
    }

    /// Unidades presentes en el pool pero fuera de la rotación, en orden
    /// alfabético para una salida estable.
    pub fn retired_ids(&self) -> Vec<&str> {
        let mut retired: Vec<&str> = self
            .vehicles
            .keys()
            .filter(|id| !self.rotation.contains(*id))
            .map(String::as_str)
            .collect();
        retired.sort_unstable();
        retired
    }

    pub fn reserve_ids(&self) -> impl Iterator<Item = &str> {
        self.reserve.iter().map(String::as_str)
    }

    pub fn reserve_len(&self) -> usize {
        self.reserve.len()
    }

    pub fn pool_len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn rotation_len(&self) -> usize {
        self.rotation.len()
    }

    pub fn standard_capacity(&self) -> u32 {
        self.standard_capacity
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    /// Saca al activo del frente. Si la reserva tiene nombres, la unidad
    /// partida queda retirada en el pool y entra una fresca al final; si
    /// no, la misma unidad se recicla al final de la rotación.
    pub fn rotate_out_active(&mut self) -> Option<RotationShift> {
        let departed = self.rotation.pop_front()?;
        let introduced = match self.reserve.pop_front() {
            Some(fresh) => {
                self.vehicles.insert(
                    fresh.clone(),
                    Vehicle::new(fresh.clone(), self.standard_capacity),
                );
                self.rotation.push_back(fresh.clone());
                Some(fresh)
            }
            None => {
                self.rotation.push_back(departed.clone());
                None
            }
        };
        Some(RotationShift {
            departed,
            introduced,
            next_active: self.rotation.front().cloned(),
        })
    }

    /// Mueve el identificador al frente de la rotación. Si estaba retirado
    /// vuelve a entrar; la rotación crece en ese caso.
    pub fn promote(&mut self, id: &str) {
        self.rotation.retain(|existing| existing != id);
        self.rotation.push_front(id.to_string());
    }
}
