//! DTOs de la API

pub mod alert_dto;
pub mod route_dto;

pub use alert_dto::AlertResponse;
pub use route_dto::{RouteRequest, StatusQuery, StatusFilter};
