//! Modelos del sistema
//!
//! Este módulo contiene los tipos de dominio puros: pasajeros, vehículos,
//! tarifas y la nómina predefinida. Sin IO ni estado compartido.

pub mod fare;
pub mod passenger;
pub mod roster;
pub mod vehicle;

pub use passenger::{
    FareCategory, ParseFareCategoryError, ParsePassengerStatusError, ParsePaymentMethodError,
    Passenger, PassengerDraft, PassengerStatus, PaymentMethod,
};
pub use roster::{RosterEntry, PREDEFINED_ROSTER};
pub use vehicle::{Vehicle, VehicleFull};
