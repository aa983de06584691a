//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables
//! tienen default razonable; solo un valor ilegible detiene el arranque.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::engine::EngineConfig;

/// Configuración del entorno
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentConfig {
    pub host: String,
    pub port: u16,
    /// Sin URL el servicio corre en modo memoria, sin persistencia.
    pub database_url: Option<String>,
    pub ticket_capacity: usize,
    pub boarding_capacity: usize,
    pub vehicle_capacity: u32,
    pub fleet_size: usize,
    pub reserve_size: usize,
    pub strict_update_reverification: bool,
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

fn env_flag(key: &str) -> Result<bool> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            other => bail!("{} has an invalid value: '{}'", key, other),
        },
        Err(_) => Ok(false),
    }
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_parse("PORT", 3000u16)?,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            ticket_capacity: env_parse("TICKET_AREA_CAPACITY", 15usize)?,
            boarding_capacity: env_parse("BOARDING_AREA_CAPACITY", 15usize)?,
            vehicle_capacity: env_parse("VEHICLE_CAPACITY", 10u32)?,
            fleet_size: env_parse("FLEET_SIZE", 4usize)?,
            reserve_size: env_parse("RESERVE_SIZE", 6usize)?,
            strict_update_reverification: env_flag("STRICT_UPDATE_REVERIFICATION")?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.ticket_capacity == 0 || self.boarding_capacity == 0 {
            bail!("queue capacities must be at least 1");
        }
        if self.fleet_size == 0 {
            bail!("FLEET_SIZE must be at least 1");
        }
        // Los nombres de unidad recorren el alfabeto una sola vez
        if self.fleet_size + self.reserve_size > 26 {
            bail!(
                "FLEET_SIZE + RESERVE_SIZE cannot exceed 26 named units (got {})",
                self.fleet_size + self.reserve_size
            );
        }
        Ok(())
    }

    /// Parámetros que consume el motor.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            ticket_capacity: self.ticket_capacity,
            boarding_capacity: self.boarding_capacity,
            vehicle_capacity: self.vehicle_capacity,
            fleet_size: self.fleet_size,
            reserve_size: self.reserve_size,
            strict_update_reverification: self.strict_update_reverification,
            first_passenger_id: 1,
        }
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            ticket_capacity: 15,
            boarding_capacity: 15,
            vehicle_capacity: 10,
            fleet_size: 4,
            reserve_size: 6,
            strict_update_reverification: false,
        }
    }
}
