//! Repositories module
//!
//! Acceso a datos sobre PostgreSQL con sqlx. Cada repositorio es dueño de
//! sus tablas y de la traducción fila ↔ modelo de dominio.

pub mod ledger_repository;
pub mod passenger_repository;
pub mod vehicle_repository;

pub use ledger_repository::LedgerRepository;
pub use passenger_repository::PassengerRepository;
pub use vehicle_repository::VehicleRepository;
