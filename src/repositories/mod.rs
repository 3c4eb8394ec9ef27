//! Repositorios
//!
//! Puertos de persistencia que consume el motor de rutas y sus dos
//! implementaciones: PostgreSQL (producción) y en memoria (tests y demo).

pub mod collection_point_repository;
pub mod employee_repository;
pub mod memory;
pub mod route_repository;
pub mod vehicle_repository;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{CollectionPoint, Employee, ParseEnumError, Route, RouteStatus, Vehicle, VehicleStatus};

pub use collection_point_repository::PgCollectionPointRepository;
pub use employee_repository::PgEmployeeRepository;
pub use memory::{InMemoryEmployeeStore, InMemoryPointStore, InMemoryRouteStore, InMemoryVehicleStore};
pub use route_repository::PgRouteRepository;
pub use vehicle_repository::PgVehicleRepository;

/// Errores de la capa de persistencia
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl From<ParseEnumError> for StoreError {
    fn from(e: ParseEnumError) -> Self {
        StoreError::Corrupt(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CollectionPointStore: Send + Sync {
    /// Contenedores con nivel de llenado >= `threshold`
    async fn find_by_fill_level_at_least(&self, threshold: i32) -> StoreResult<Vec<CollectionPoint>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<CollectionPoint>>;

    /// Insertar o actualizar; rechaza niveles de llenado fuera de [0, 100]
    async fn save(&self, point: CollectionPoint) -> StoreResult<CollectionPoint>;
}

#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn find_available(&self) -> StoreResult<Vec<Vehicle>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Vehicle>>;

    async fn save(&self, vehicle: Vehicle) -> StoreResult<Vehicle>;

    /// AVAILABLE -> IN_USE de forma atómica. Devuelve el estado previo
    /// (`None` si el vehículo no existe); solo escribe si era AVAILABLE.
    async fn try_reserve(&self, id: Uuid) -> StoreResult<Option<VehicleStatus>>;

    /// Volver a AVAILABLE
    async fn release(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_available(&self) -> StoreResult<Vec<Employee>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Employee>>;

    async fn save(&self, employee: Employee) -> StoreResult<Employee>;

    /// Marcar como no disponible de forma atómica y devolver la
    /// disponibilidad previa (`None` si el empleado no existe)
    async fn reserve(&self, id: Uuid) -> StoreResult<Option<bool>>;

    async fn release(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait RouteStore: Send + Sync {
    async fn save(&self, route: Route) -> StoreResult<Route>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Route>>;

    async fn find_all(&self) -> StoreResult<Vec<Route>>;

    async fn find_by_status(&self, status: RouteStatus) -> StoreResult<Vec<Route>>;

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<()>;
}
