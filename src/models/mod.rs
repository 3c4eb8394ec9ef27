//! Modelos del sistema
//!
//! Entidades del dominio de recolección: puntos de recolección, vehículos,
//! empleados y rutas. Las referencias entre agregados son siempre por id.

pub mod collection_point;
pub mod employee;
pub mod location;
pub mod route;
pub mod vehicle;

pub use collection_point::{CollectionPoint, PointStatus, WasteType};
pub use employee::{Employee, Role};
pub use location::Location;
pub use route::{Priority, Route, RoutePoint, RouteStatus};
pub use vehicle::{Vehicle, VehicleStatus};

/// Error al interpretar el valor textual de un enum persistido
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown {kind} value '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
