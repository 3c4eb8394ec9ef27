//! Motor de generación y ciclo de vida de rutas de recolección de residuos
//!
//! Selecciona los contenedores más llenos, les asigna un vehículo y un
//! equipo respetando la capacidad de carga, y gestiona el estado de la ruta
//! bloqueando y liberando los recursos.

pub mod config;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use services::{RouteEngineConfig, RouteService, Stores};
pub use utils::errors::RouteError;
