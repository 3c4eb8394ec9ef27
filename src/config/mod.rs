//! Configuración del proyecto
//!
//! Variables de entorno del servicio y del motor de rutas.

pub mod environment;

pub use environment::*;
