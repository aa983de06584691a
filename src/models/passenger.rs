//! Modelo de Passenger
//!
//! Este módulo contiene el registro de pasajero que fluye por las colas,
//! junto con los enums cerrados de categoría de tarifa, método de pago y
//! estado. Los enums reemplazan strings sueltos: un valor desconocido se
//! rechaza al parsear en vez de degradarse silenciosamente.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Categoría de tarifa - determina el monto mínimo exigido al verificar
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FareCategory {
    Standard,
    Discounted,
    Vip,
}

impl FareCategory {
    pub const ALL: [FareCategory; 3] = [
        FareCategory::Vip,
        FareCategory::Standard,
        FareCategory::Discounted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FareCategory::Standard => "Standard",
            FareCategory::Discounted => "Discounted",
            FareCategory::Vip => "VIP",
        }
    }
}

impl fmt::Display for FareCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("'{0}' is not a recognized fare category")]
pub struct ParseFareCategoryError(pub String);

impl FromStr for FareCategory {
    type Err = ParseFareCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(FareCategory::Standard),
            "discounted" => Ok(FareCategory::Discounted),
            "vip" => Ok(FareCategory::Vip),
            _ => Err(ParseFareCategoryError(s.to_string())),
        }
    }
}

/// Método de pago declarado en la admisión. Informativo: la verificación
/// solo compara montos.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("'{0}' is not a recognized payment method")]
pub struct ParsePaymentMethodError(pub String);

impl FromStr for PaymentMethod {
    type Err = ParsePaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            _ => Err(ParsePaymentMethodError(s.to_string())),
        }
    }
}

/// Etapa del pasajero dentro del sistema
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PassengerStatus {
    /// Esperando verificación en el área de boletos
    Ticketing,
    /// Verificado, esperando asiento en el área de abordaje
    Boarding,
    /// Sentado en un vehículo; solo aparece en la bitácora de servidos
    Boarded,
}

impl PassengerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassengerStatus::Ticketing => "ticketing",
            PassengerStatus::Boarding => "boarding",
            PassengerStatus::Boarded => "boarded",
        }
    }
}

impl fmt::Display for PassengerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("'{0}' is not a recognized passenger status")]
pub struct ParsePassengerStatusError(pub String);

impl FromStr for PassengerStatus {
    type Err = ParsePassengerStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ticketing" => Ok(PassengerStatus::Ticketing),
            "boarding" => Ok(PassengerStatus::Boarding),
            "boarded" => Ok(PassengerStatus::Boarded),
            _ => Err(ParsePassengerStatusError(s.to_string())),
        }
    }
}

/// Datos de admisión antes de que el motor asigne un identificador.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerDraft {
    pub name: String,
    pub destination: String,
    pub category: FareCategory,
    pub payment_method: PaymentMethod,
    /// Texto crudo tal como lo entregó el pasajero. Se conserva sin parsear
    /// hasta la verificación, donde un monto ilegible cuenta como denegado.
    pub amount_paid: String,
}

/// Passenger principal - el registro que viaja entre colas.
///
/// El identificador es privado: lo asigna el motor en la admisión y no
/// cambia nunca, ni siquiera en una actualización.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Passenger {
    id: i64,
    pub name: String,
    pub destination: String,
    pub category: FareCategory,
    pub payment_method: PaymentMethod,
    pub amount_paid: String,
    pub verified: bool,
    pub status: PassengerStatus,
    pub assigned_vehicle: Option<String>,
    pub admitted_at: DateTime<Utc>,
    pub boarded_at: Option<DateTime<Utc>>,
}

impl Passenger {
    /// Crea el registro en el momento de la admisión.
    pub fn from_draft(id: i64, draft: PassengerDraft) -> Self {
        Self {
            id,
            name: draft.name,
            destination: draft.destination,
            category: draft.category,
            payment_method: draft.payment_method,
            amount_paid: draft.amount_paid,
            verified: false,
            status: PassengerStatus::Ticketing,
            assigned_vehicle: None,
            admitted_at: Utc::now(),
            boarded_at: None,
        }
    }

    /// Reconstruye un registro persistido con todos sus campos.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: i64,
        name: String,
        destination: String,
        category: FareCategory,
        payment_method: PaymentMethod,
        amount_paid: String,
        verified: bool,
        status: PassengerStatus,
        assigned_vehicle: Option<String>,
        admitted_at: DateTime<Utc>,
        boarded_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name,
            destination,
            category,
            payment_method,
            amount_paid,
            verified,
            status,
            assigned_vehicle,
            admitted_at,
            boarded_at,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Intenta leer el monto entregado como decimal. `None` significa texto
    /// ilegible, que la verificación trata igual que un monto insuficiente.
    pub fn tendered_amount(&self) -> Option<Decimal> {
        Decimal::from_str(self.amount_paid.trim()).ok()
    }

    /// Coincidencia exacta de nombre sin distinguir mayúsculas.
    pub fn name_matches(&self, needle: &str) -> bool {
        self.name.eq_ignore_ascii_case(needle.trim())
    }
}
