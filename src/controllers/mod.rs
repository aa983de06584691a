//! Controllers de la API
//!
//! Cada controller recibe el request ya deserializado, lo valida, lo
//! traduce a tipos de dominio y delega en el motor. Se construyen por
//! request con un clone del Arc del motor, no guardan estado propio.

pub mod fleet_controller;
pub mod passenger_controller;
pub mod queue_controller;
pub mod report_controller;

pub use fleet_controller::FleetController;
pub use passenger_controller::PassengerController;
pub use queue_controller::QueueController;
pub use report_controller::ReportController;
