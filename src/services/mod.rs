//! Services module
//!
//! Este módulo contiene la lógica que cruza el motor con el mundo exterior.
//! Por ahora el único servicio es el respaldo del estado en PostgreSQL.

pub mod persistence_service;

pub use persistence_service::*;
