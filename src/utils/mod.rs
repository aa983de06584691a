//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores y validación
//! compartidas por toda la API.

pub mod errors;
pub mod validation;
