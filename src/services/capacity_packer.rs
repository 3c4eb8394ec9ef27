//! Asignación de contenedores al vehículo por capacidad
//!
//! Recorrido único y voraz sobre la demanda ya ordenada: un contenedor entra
//! si cabe en la carga restante y, si no cabe, se descarta para siempre
//! aunque uno posterior más pequeño sí cupiera.

use tracing::debug;

use crate::models::{CollectionPoint, RoutePoint};

/// Kilómetros estimados por parada
pub const KM_PER_STOP: f64 = 2.5;

/// Resultado del empaquetado
#[derive(Debug, Clone, PartialEq)]
pub struct Packing {
    pub route_points: Vec<RoutePoint>,
    /// Carga estimada total en kg
    pub load_kg: f64,
}

/// Peso estimado de los residuos: (llenado / 100) * capacidad del contenedor
pub fn estimated_weight(point: &CollectionPoint) -> f64 {
    (point.fill_level as f64 / 100.0) * point.capacity
}

/// Distancia de referencia; no es un cálculo de ruta real
pub fn estimate_distance_km(stops: usize) -> f64 {
    stops as f64 * KM_PER_STOP
}

pub fn pack(ranked: &[CollectionPoint], capacity_kg: f64) -> Packing {
    let mut route_points = Vec::new();
    let mut load_kg = 0.0;

    for point in ranked {
        let weight = estimated_weight(point);
        if load_kg + weight <= capacity_kg {
            route_points.push(RoutePoint::snapshot(point));
            load_kg += weight;
        } else {
            debug!(
                "Skipping point {} ({} kg): vehicle full (current: {}/{})",
                point.id, weight, load_kg, capacity_kg
            );
        }
    }

    Packing { route_points, load_kg }
}
