//! Modelo de Route
//!
//! Una ruta planificada con su vehículo, su equipo y los contenedores a
//! recoger. Los `RoutePoint` guardan una copia de los datos del contenedor
//! en el momento de la asignación y no se resincronizan después.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{CollectionPoint, Location, ParseEnumError, WasteType};

/// Estado de la ruta: PLANNED -> IN_PROGRESS -> COMPLETED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteStatus {
    Planned,
    InProgress,
    Completed,
}

impl RouteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::Planned => "PLANNED",
            RouteStatus::InProgress => "IN_PROGRESS",
            RouteStatus::Completed => "COMPLETED",
        }
    }
}

impl FromStr for RouteStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLANNED" => Ok(RouteStatus::Planned),
            "IN_PROGRESS" => Ok(RouteStatus::InProgress),
            "COMPLETED" => Ok(RouteStatus::Completed),
            other => Err(ParseEnumError::new("route_status", other)),
        }
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prioridad de un contenedor dentro de la ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// >= 95 HIGH, 85..95 MEDIUM, resto LOW
    pub fn for_fill_level(fill_level: i32) -> Self {
        if fill_level >= 95 {
            Priority::High
        } else if fill_level >= 85 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub point_id: Uuid,
    pub priority: Priority,
    pub cached_address: String,
    pub cached_waste_type: WasteType,
    pub cached_capacity: f64,
}

impl RoutePoint {
    /// Copia de los datos del contenedor en el momento de la asignación
    pub fn snapshot(point: &CollectionPoint) -> Self {
        Self {
            point_id: point.id,
            priority: Priority::for_fill_level(point.fill_level),
            cached_address: point.location.address.clone(),
            cached_waste_type: point.waste_type,
            cached_capacity: point.capacity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub status: RouteStatus,
    pub date: NaiveDate,
    pub vehicle_id: Option<Uuid>,
    /// Capacidad del vehículo al generar la ruta, en kg
    pub cached_vehicle_capacity: f64,
    /// Conductor primero, luego hasta dos recolectores
    pub employee_ids: Vec<Uuid>,
    pub points_to_collect: Vec<RoutePoint>,
    pub estimated_distance_km: f64,
    pub depot_location: Option<Location>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_tiers() {
        assert_eq!(Priority::for_fill_level(100), Priority::High);
        assert_eq!(Priority::for_fill_level(95), Priority::High);
        assert_eq!(Priority::for_fill_level(94), Priority::Medium);
        assert_eq!(Priority::for_fill_level(85), Priority::Medium);
        assert_eq!(Priority::for_fill_level(84), Priority::Low);
        assert_eq!(Priority::for_fill_level(0), Priority::Low);
    }

    #[test]
    fn test_route_status_round_trips_through_text() {
        for status in [RouteStatus::Planned, RouteStatus::InProgress, RouteStatus::Completed] {
            assert_eq!(status.as_str().parse::<RouteStatus>(), Ok(status));
        }
        assert!("CANCELLED".parse::<RouteStatus>().is_err());
    }

    #[test]
    fn test_route_status_serializes_screaming_case() {
        let json = serde_json::to_string(&RouteStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
    }

    #[test]
    fn test_snapshot_copies_point_fields() {
        let mut point = CollectionPoint::new(
            Location::new(36.81, 10.18, "10 Rue de Marseille"),
            WasteType::Organic,
            88,
        );
        point.capacity = 750.0;

        let rp = RoutePoint::snapshot(&point);
        assert_eq!(rp.point_id, point.id);
        assert_eq!(rp.priority, Priority::Medium);
        assert_eq!(rp.cached_address, "10 Rue de Marseille");
        assert_eq!(rp.cached_waste_type, WasteType::Organic);
        assert_eq!(rp.cached_capacity, 750.0);
    }
}
