//! TransitQ - terminal de colas de pasajeros y rotación de unidades
//!
//! El motor en memoria (`engine`) es la fuente de verdad; la API HTTP lo
//! expone detrás de un `RwLock` y la persistencia en PostgreSQL es un
//! respaldo best effort del snapshot.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod engine;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
