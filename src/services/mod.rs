//! Services module
//!
//! Lógica de negocio del motor de rutas: selección de demanda, asignación
//! de recursos, empaquetado por capacidad, construcción de la ruta y su
//! ciclo de vida.

pub mod alert_service;
pub mod capacity_packer;
pub mod demand_selector;
pub mod resource_allocator;
pub mod route_builder;
pub mod route_service;

pub use route_service::{RouteEngineConfig, RouteService, Stores};
