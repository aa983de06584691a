//! Modelo de Vehicle
//!
//! Unidad de flota con un contador de asientos ocupados. El vehículo no
//! conoce colas ni rotación; solo sabe aceptar un abordaje a la vez y
//! reiniciarse cuando parte.

use serde::{Deserialize, Serialize};

/// Señal de rechazo cuando el vehículo ya no tiene asientos libres
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleFull;

/// Vehicle principal - identificador estable más contador de ocupación.
///
/// `occupancy` nunca supera `capacity`: la única vía de incremento es
/// `board`, que verifica el cupo en la misma operación.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: String,
    capacity: u32,
    occupancy: u32,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
            occupancy: 0,
        }
    }

    /// Reconstruye un vehículo persistido. La ocupación se recorta al cupo
    /// para que una fila corrupta no rompa el invariante.
    pub fn restore(id: impl Into<String>, capacity: u32, occupancy: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
            occupancy: occupancy.min(capacity),
        }
    }

    /// Ocupa un asiento si queda cupo. Verificación y conteo ocurren en la
    /// misma llamada; no existe un camino "comprobar y luego sumar".
    pub fn board(&mut self) -> Result<u32, VehicleFull> {
        if self.occupancy >= self.capacity {
            return Err(VehicleFull);
        }
        self.occupancy += 1;
        Ok(self.occupancy)
    }

    /// Libera todos los asientos al partir.
    pub fn reset(&mut self) {
        self.occupancy = 0;
    }

    pub fn is_full(&self) -> bool {
        self.occupancy >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy == 0
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn occupancy(&self) -> u32 {
        self.occupancy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_until_full() {
        let mut vehicle = Vehicle::new("BUS A", 2);
        assert_eq!(vehicle.board(), Ok(1));
        assert_eq!(vehicle.board(), Ok(2));
        assert!(vehicle.is_full());
        assert_eq!(vehicle.board(), Err(VehicleFull));
        assert_eq!(vehicle.occupancy(), 2);
    }

    #[test]
    fn test_reset_clears_occupancy() {
        let mut vehicle = Vehicle::new("BUS B", 3);
        let _ = vehicle.board();
        let _ = vehicle.board();
        vehicle.reset();
        assert!(vehicle.is_empty());
        assert_eq!(vehicle.occupancy(), 0);
        assert_eq!(vehicle.capacity(), 3);
    }

    #[test]
    fn test_restore_clamps_corrupt_occupancy() {
        let vehicle = Vehicle::restore("BUS C", 10, 14);
        assert_eq!(vehicle.occupancy(), 10);
        assert!(vehicle.is_full());
    }

    #[test]
    fn test_zero_capacity_vehicle_is_always_full() {
        let mut vehicle = Vehicle::new("BUS D", 0);
        assert!(vehicle.is_full());
        assert_eq!(vehicle.board(), Err(VehicleFull));
    }
}
