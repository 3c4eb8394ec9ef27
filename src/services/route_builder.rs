//! Construcción de la ruta planificada a partir de la asignación y la carga

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::capacity_packer::{estimate_distance_km, Packing};
use super::resource_allocator::Allocation;
use crate::models::{Location, Route, RouteStatus};

pub const DEPOT_LATITUDE: f64 = 36.8065;
pub const DEPOT_LONGITUDE: f64 = 10.1815;
pub const DEPOT_ADDRESS: &str = "Central Depot - Tunis";

/// Depósito central, origen y destino de todas las rutas
pub fn depot() -> Location {
    Location::new(DEPOT_LATITUDE, DEPOT_LONGITUDE, DEPOT_ADDRESS)
}

/// Ruta PLANNED para hoy (UTC) a partir de la asignación y el empaquetado
pub fn build_route(allocation: &Allocation, packing: Packing) -> Route {
    build_route_on(allocation, packing, Utc::now().date_naive())
}

pub fn build_route_on(allocation: &Allocation, packing: Packing, date: NaiveDate) -> Route {
    let estimated_distance_km = estimate_distance_km(packing.route_points.len());

    Route {
        id: Uuid::new_v4(),
        status: RouteStatus::Planned,
        date,
        vehicle_id: Some(allocation.vehicle.id),
        cached_vehicle_capacity: allocation.vehicle.capacity as f64,
        employee_ids: allocation.crew.employee_ids(),
        points_to_collect: packing.route_points,
        estimated_distance_km,
        depot_location: Some(depot()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CollectionPoint, Employee, Role, RoutePoint, Vehicle, WasteType};
    use crate::services::resource_allocator::Crew;

    #[test]
    fn test_build_route_fields() {
        let vehicle = Vehicle::new("567-TN-8901", 8000);
        let driver = Employee::new("Karim Khelil", Role::Driver);
        let collector = Employee::new("Mouna Jlassi", Role::Collector);
        let allocation = Allocation {
            vehicle: vehicle.clone(),
            crew: Crew {
                driver: driver.clone(),
                collectors: vec![collector.clone()],
            },
        };
        let point = CollectionPoint::new(Location::new(36.83, 10.23, "Lac 1"), WasteType::Plastic, 92);
        let packing = Packing {
            route_points: vec![RoutePoint::snapshot(&point)],
            load_kg: 920.0,
        };
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

        let route = build_route_on(&allocation, packing, date);

        assert_eq!(route.status, RouteStatus::Planned);
        assert_eq!(route.date, date);
        assert_eq!(route.vehicle_id, Some(vehicle.id));
        assert_eq!(route.cached_vehicle_capacity, 8000.0);
        assert_eq!(route.employee_ids, vec![driver.id, collector.id]);
        assert_eq!(route.points_to_collect.len(), 1);
        assert_eq!(route.estimated_distance_km, 2.5);
        assert_eq!(route.depot_location, Some(depot()));
    }
}
