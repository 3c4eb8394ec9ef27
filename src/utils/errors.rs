//! Sistema de manejo de errores
//!
//! Errores del motor de rutas y su conversión a respuestas HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

use crate::repositories::StoreError;

/// Tipo de recurso que puede reservarse al generar una ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Vehicle,
    Employee,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Vehicle => f.write_str("vehicle"),
            ResourceKind::Employee => f.write_str("employee"),
        }
    }
}

/// Errores del motor de generación y ciclo de vida de rutas
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("No containers need collection")]
    NoContainersNeedCollection,

    #[error("No vehicles available")]
    NoVehicleAvailable,

    #[error("No drivers available")]
    NoDriverAvailable,

    #[error("Route '{0}' not found")]
    RouteNotFound(Uuid),

    #[error("{kind} '{id}' was reserved by another route")]
    ResourceAlreadyReserved { kind: ResourceKind, id: Uuid },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Route(RouteError::Store(e))
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Route(RouteError::NoContainersNeedCollection) => {
                warn!("Route generation rejected: no containers need collection");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(
                        "Bad Request",
                        "No containers need collection".to_string(),
                        "NO_CONTAINERS_NEED_COLLECTION",
                    ),
                )
            }

            AppError::Route(RouteError::NoVehicleAvailable) => {
                warn!("Route generation rejected: no vehicle available");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Bad Request", "No vehicles available".to_string(), "NO_VEHICLE_AVAILABLE"),
                )
            }

            AppError::Route(RouteError::NoDriverAvailable) => {
                warn!("Route generation rejected: no driver available");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Bad Request", "No drivers available".to_string(), "NO_DRIVER_AVAILABLE"),
                )
            }

            AppError::Route(RouteError::RouteNotFound(id)) => {
                warn!("Route not found: {}", id);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new("Not Found", format!("Route with id '{}' not found", id), "ROUTE_NOT_FOUND"),
                )
            }

            AppError::Route(RouteError::ResourceAlreadyReserved { kind, id }) => {
                warn!("Reservation conflict on {} {}", kind, id);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new(
                        "Conflict",
                        format!("The {} was reserved by another route", kind),
                        "RESOURCE_ALREADY_RESERVED",
                    )
                    .with_details(json!({ "resource": kind.to_string(), "id": id })),
                )
            }

            AppError::Route(RouteError::Store(StoreError::Validation(e))) | AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(
                        "Validation Error",
                        "The provided data is invalid".to_string(),
                        "VALIDATION_ERROR",
                    )
                    .with_details(json!(e)),
                )
            }

            AppError::Route(RouteError::Store(e)) => {
                error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Database Error",
                        "An error occurred while accessing the database".to_string(),
                        "DB_ERROR",
                    )
                    .with_details(json!({ "store_error": e.to_string() })),
                )
            }

            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorResponse::new("Not Found", msg, "NOT_FOUND"))
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &Uuid) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_generation_failures_are_bad_requests() {
        assert_eq!(status_of(RouteError::NoContainersNeedCollection.into()), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(RouteError::NoVehicleAvailable.into()), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(RouteError::NoDriverAvailable.into()), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_route_not_found_maps_to_404() {
        assert_eq!(status_of(RouteError::RouteNotFound(Uuid::new_v4()).into()), StatusCode::NOT_FOUND);
        assert_eq!(status_of(not_found_error("Route", &Uuid::new_v4())), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_reservation_conflict_maps_to_409() {
        let err = RouteError::ResourceAlreadyReserved {
            kind: ResourceKind::Vehicle,
            id: Uuid::new_v4(),
        };
        assert_eq!(status_of(err.into()), StatusCode::CONFLICT);
    }

    #[test]
    fn test_store_errors_map_to_500() {
        let err = StoreError::Corrupt("unknown route_status value 'X'".to_string());
        assert_eq!(status_of(err.into()), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
