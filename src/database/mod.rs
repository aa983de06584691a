//! Base de datos
//!
//! Conexión a PostgreSQL y utilidades asociadas.

pub mod connection;

pub use connection::{create_pool, mask_database_url};
