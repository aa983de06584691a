use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::SearchMatch;
use crate::models::Passenger;
use crate::utils::validation::{validate_fare_category, validate_payment_method};

// Request para admitir un pasajero
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePassengerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub destination: String,

    #[validate(custom = "validate_fare_category")]
    pub category: String,

    /// Si falta, se asume efectivo.
    #[validate(custom = "validate_payment_method")]
    pub payment_method: Option<String>,

    // Texto crudo a propósito: un monto ilegible debe llegar hasta la
    // verificación y caer como denegado, no rebotar en la frontera.
    #[validate(length(min = 1, max = 20))]
    pub amount_paid: String,
}

// Request para sembrar desde la nómina predefinida
#[derive(Debug, Deserialize, Validate)]
pub struct SeedPassengersRequest {
    #[validate(range(min = 1, max = 100))]
    pub count: u32,
}

// Request para actualizar un pasajero encolado
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePassengerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub destination: String,

    #[validate(custom = "validate_fare_category")]
    pub category: String,
}

// Query de búsqueda por id o nombre exacto
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

// Response de pasajero
#[derive(Debug, Serialize)]
pub struct PassengerResponse {
    pub id: i64,
    pub name: String,
    pub destination: String,
    pub category: String,
    pub payment_method: String,
    pub amount_paid: String,
    pub verified: bool,
    pub status: String,
    pub assigned_vehicle: Option<String>,
    pub admitted_at: String,
    pub boarded_at: Option<String>,
}

impl From<&Passenger> for PassengerResponse {
    fn from(passenger: &Passenger) -> Self {
        Self {
            id: passenger.id(),
            name: passenger.name.clone(),
            destination: passenger.destination.clone(),
            category: passenger.category.as_str().to_string(),
            payment_method: passenger.payment_method.as_str().to_string(),
            amount_paid: passenger.amount_paid.clone(),
            verified: passenger.verified,
            status: passenger.status.as_str().to_string(),
            assigned_vehicle: passenger.assigned_vehicle.clone(),
            admitted_at: passenger.admitted_at.to_rfc3339(),
            boarded_at: passenger.boarded_at.map(|at| at.to_rfc3339()),
        }
    }
}

// Response de búsqueda con ubicación en cola
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub area: String,
    /// Posición uno-basada como la lee el operador.
    pub position_in_line: usize,
    pub passenger: PassengerResponse,
}

impl From<&SearchMatch> for SearchResponse {
    fn from(found: &SearchMatch) -> Self {
        Self {
            area: found.area.to_string(),
            position_in_line: found.position + 1,
            passenger: PassengerResponse::from(&found.passenger),
        }
    }
}
