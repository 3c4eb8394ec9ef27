//! Utilidades del sistema

pub mod errors;

pub use errors::{AppError, ResourceKind, RouteError};
