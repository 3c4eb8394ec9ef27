//! Stores en memoria
//!
//! Tablas indexadas por orden de inserción detrás de un `RwLock` de tokio.
//! Los listados devuelven los registros en el orden en que se insertaron,
//! lo que hace deterministas la selección de conductor y los desempates.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use super::{CollectionPointStore, EmployeeStore, RouteStore, StoreResult, VehicleStore};
use crate::models::{CollectionPoint, Employee, Route, RouteStatus, Vehicle, VehicleStatus};

trait Keyed {
    fn key(&self) -> Uuid;
}

impl Keyed for CollectionPoint {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for Vehicle {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for Employee {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for Route {
    fn key(&self) -> Uuid {
        self.id
    }
}

struct Table<T> {
    rows: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T: Keyed + Clone> Table<T> {
    async fn get(&self, id: Uuid) -> Option<T> {
        self.rows.read().await.iter().find(|r| r.key() == id).cloned()
    }

    async fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.read().await.iter().filter(|r| pred(r)).cloned().collect()
    }

    async fn upsert(&self, row: T) -> T {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|r| r.key() == row.key()) {
            Some(slot) => *slot = row.clone(),
            None => rows.push(row.clone()),
        }
        row
    }

    /// Modifica una fila bajo el lock de escritura y devuelve lo que `f` devuelva
    async fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut rows = self.rows.write().await;
        rows.iter_mut().find(|r| r.key() == id).map(f)
    }

    async fn remove(&self, id: Uuid) {
        self.rows.write().await.retain(|r| r.key() != id);
    }

    async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[derive(Clone, Default)]
pub struct InMemoryPointStore {
    table: Table<CollectionPoint>,
}

impl InMemoryPointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.len().await
    }
}

#[async_trait]
impl CollectionPointStore for InMemoryPointStore {
    async fn find_by_fill_level_at_least(&self, threshold: i32) -> StoreResult<Vec<CollectionPoint>> {
        Ok(self.table.filter(|p| p.fill_level >= threshold).await)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<CollectionPoint>> {
        Ok(self.table.get(id).await)
    }

    async fn save(&self, point: CollectionPoint) -> StoreResult<CollectionPoint> {
        point.validate()?;
        Ok(self.table.upsert(point).await)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryVehicleStore {
    table: Table<Vehicle>,
}

impl InMemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleStore {
    async fn find_available(&self) -> StoreResult<Vec<Vehicle>> {
        Ok(self.table.filter(Vehicle::is_available).await)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Vehicle>> {
        Ok(self.table.get(id).await)
    }

    async fn save(&self, vehicle: Vehicle) -> StoreResult<Vehicle> {
        vehicle.validate()?;
        Ok(self.table.upsert(vehicle).await)
    }

    async fn try_reserve(&self, id: Uuid) -> StoreResult<Option<VehicleStatus>> {
        Ok(self
            .table
            .update(id, |v| {
                let previous = v.status;
                if previous == VehicleStatus::Available {
                    v.status = VehicleStatus::InUse;
                }
                previous
            })
            .await)
    }

    async fn release(&self, id: Uuid) -> StoreResult<()> {
        self.table.update(id, |v| v.status = VehicleStatus::Available).await;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryEmployeeStore {
    table: Table<Employee>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn find_available(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.table.filter(|e| e.available).await)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Employee>> {
        Ok(self.table.get(id).await)
    }

    async fn save(&self, employee: Employee) -> StoreResult<Employee> {
        Ok(self.table.upsert(employee).await)
    }

    async fn reserve(&self, id: Uuid) -> StoreResult<Option<bool>> {
        Ok(self
            .table
            .update(id, |e| std::mem::replace(&mut e.available, false))
            .await)
    }

    async fn release(&self, id: Uuid) -> StoreResult<()> {
        self.table.update(id, |e| e.available = true).await;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryRouteStore {
    table: Table<Route>,
}

impl InMemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RouteStore for InMemoryRouteStore {
    async fn save(&self, route: Route) -> StoreResult<Route> {
        Ok(self.table.upsert(route).await)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Route>> {
        Ok(self.table.get(id).await)
    }

    async fn find_all(&self) -> StoreResult<Vec<Route>> {
        Ok(self.table.filter(|_| true).await)
    }

    async fn find_by_status(&self, status: RouteStatus) -> StoreResult<Vec<Route>> {
        Ok(self.table.filter(|r| r.status == status).await)
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<()> {
        self.table.remove(id).await;
        Ok(())
    }
}
