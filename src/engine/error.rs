//! Errores del motor de colas
//!
//! Cada rechazo de una operación cae en una de estas clases. Los mensajes
//! se muestran tal cual al operador; la capa HTTP decide el status code a
//! partir de la variante, no del texto.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::QueueArea;

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineError {
    /// El área de destino ya está en su tope configurado.
    #[error("{area} FULL! Cannot accept another passenger ({capacity} max)")]
    CapacityExceeded { area: QueueArea, capacity: usize },

    /// La cola de origen no tiene a nadie que procesar.
    #[error("{area} is empty. No passenger to process")]
    EmptySource { area: QueueArea },

    /// El identificador no aparece en ninguna cola activa.
    #[error("Passenger ID {id} not found in either queue")]
    NotFound { id: i64 },

    /// El identificador de vehículo no existe en el pool.
    #[error("Vehicle '{id}' is not part of the fleet")]
    UnknownVehicle { id: String },

    /// El vehículo tiene pasajeros a bordo y no puede tomar la rotación.
    #[error("Vehicle '{id}' already has {occupancy} passenger(s) aboard")]
    OccupiedElsewhere { id: String, occupancy: u32 },

    /// El vehículo ya está a tope y no puede asignarse.
    #[error("Vehicle '{id}' is already full")]
    AlreadyFull { id: String },

    /// El vehículo activo se llenó; hay que despacharlo antes de abordar.
    #[error("Vehicle '{id}' is full! Depart it before boarding more passengers")]
    VehicleFull { id: String },

    /// Partir un vehículo vacío no tiene sentido.
    #[error("Vehicle '{id}' is empty. No need to depart")]
    EmptyVehicle { id: String },

    /// La rotación quedó sin vehículo al frente.
    #[error("No vehicle is currently assigned")]
    NoActiveVehicle,

    /// La verificación de pago rechazó al pasajero. El registro ya salió
    /// de las colas cuando se reporta este error.
    #[error("Payment verification failed for {name} (ID {id}): tendered '{tendered}', required {required}")]
    Denied {
        id: i64,
        name: String,
        required: Decimal,
        tendered: String,
    },
}

impl EngineError {
    /// Código estable para clientes de la API.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            EngineError::EmptySource { .. } => "EMPTY_SOURCE",
            EngineError::NotFound { .. } => "PASSENGER_NOT_FOUND",
            EngineError::UnknownVehicle { .. } => "UNKNOWN_VEHICLE",
            EngineError::OccupiedElsewhere { .. } => "OCCUPIED_ELSEWHERE",
            EngineError::AlreadyFull { .. } => "ALREADY_FULL",
            EngineError::VehicleFull { .. } => "VEHICLE_FULL",
            EngineError::EmptyVehicle { .. } => "EMPTY_VEHICLE",
            EngineError::NoActiveVehicle => "NO_ACTIVE_VEHICLE",
            EngineError::Denied { .. } => "PAYMENT_DENIED",
        }
    }
}
