use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Location, Route, RoutePoint, RouteStatus};

/// Cuerpo para crear o reemplazar una ruta manualmente
#[derive(Debug, Deserialize, Validate)]
pub struct RouteRequest {
    pub status: Option<RouteStatus>,
    pub date: Option<NaiveDate>,
    pub vehicle_id: Option<Uuid>,
    #[validate(range(min = 0.0))]
    pub cached_vehicle_capacity: Option<f64>,
    /// Conductor + hasta dos recolectores
    #[serde(default)]
    #[validate(length(max = 3))]
    pub employee_ids: Vec<Uuid>,
    #[serde(default)]
    pub points_to_collect: Vec<RoutePoint>,
    #[validate(range(min = 0.0))]
    pub estimated_distance_km: Option<f64>,
    pub depot_location: Option<Location>,
}

impl RouteRequest {
    /// Ruta con el id dado; los campos ausentes toman valores por defecto
    pub fn into_route(self, id: Uuid) -> Route {
        Route {
            id,
            status: self.status.unwrap_or(RouteStatus::Planned),
            date: self.date.unwrap_or_else(|| Utc::now().date_naive()),
            vehicle_id: self.vehicle_id,
            cached_vehicle_capacity: self.cached_vehicle_capacity.unwrap_or_default(),
            employee_ids: self.employee_ids,
            points_to_collect: self.points_to_collect,
            estimated_distance_km: self.estimated_distance_km.unwrap_or_default(),
            depot_location: self.depot_location,
        }
    }
}

/// `?status=IN_PROGRESS` obligatorio en el PATCH de estado
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: RouteStatus,
}

/// Filtro opcional del listado de rutas
#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    pub status: Option<RouteStatus>,
}
