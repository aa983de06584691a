//! DTOs de la API
//!
//! Requests validados con `validator` y responses serializables. Los
//! structs de entrada llegan como texto y se convierten a enums de
//! dominio en los controllers; los de salida aplanan los tipos del motor
//! para los clientes HTTP.

pub mod fleet_dto;
pub mod passenger_dto;
pub mod queue_dto;
pub mod report_dto;

use serde::Serialize;

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
            data: None,
        }
    }
}
