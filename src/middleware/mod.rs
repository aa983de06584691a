//! Middleware del sistema
//!
//! Este módulo contiene el middleware transversal del servidor. Hoy solo
//! CORS; la terminal corre en red interna y no autentica operadores.

pub mod cors;

pub use cors::*;
