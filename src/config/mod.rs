//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de variables de entorno
//! y su traducción a parámetros del motor.

pub mod environment;

pub use environment::*;
