//! Servicio de rutas
//!
//! Genera rutas a partir de la demanda y gestiona su ciclo de vida:
//! PLANNED -> IN_PROGRESS bloquea vehículo y equipo, IN_PROGRESS ->
//! COMPLETED los libera y vacía los contenedores. Cualquier otra
//! transición se escribe tal cual, sin efectos secundarios.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::capacity_packer::pack;
use super::demand_selector::{rank_by_urgency, select_demand, COLLECTION_THRESHOLD};
use super::resource_allocator::ResourceAllocator;
use super::route_builder::build_route;
use crate::models::{Route, RouteStatus, VehicleStatus};
use crate::repositories::{CollectionPointStore, EmployeeStore, RouteStore, StoreResult, VehicleStore};
use crate::utils::errors::RouteError;

/// Opciones del motor de rutas
#[derive(Debug, Clone, Default)]
pub struct RouteEngineConfig {
    /// Reservar vehículo y equipo al generar la ruta
    pub reserve_on_generate: bool,
}

/// Puertos de persistencia que usa el servicio
#[derive(Clone)]
pub struct Stores {
    pub points: Arc<dyn CollectionPointStore>,
    pub vehicles: Arc<dyn VehicleStore>,
    pub employees: Arc<dyn EmployeeStore>,
    pub routes: Arc<dyn RouteStore>,
}

pub struct RouteService {
    stores: Stores,
    allocator: ResourceAllocator,
}

impl RouteService {
    pub fn new(stores: Stores, config: RouteEngineConfig) -> Self {
        let allocator = ResourceAllocator::new(
            stores.vehicles.clone(),
            stores.employees.clone(),
            config.reserve_on_generate,
        );
        Self { stores, allocator }
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Generar una ruta con los contenedores más llenos que quepan en el
    /// vehículo disponible de mayor capacidad
    pub async fn generate_optimized_route(&self) -> Result<Route, RouteError> {
        info!("🧭 Generando ruta optimizada");

        let demand = select_demand(self.stores.points.as_ref(), COLLECTION_THRESHOLD).await?;
        if demand.is_empty() {
            info!("No hay contenedores que necesiten recolección");
            return Err(RouteError::NoContainersNeedCollection);
        }
        let ranked = rank_by_urgency(demand);

        let allocation = self.allocator.allocate().await?;
        let capacity_kg = allocation.vehicle.capacity as f64;

        let packing = pack(&ranked, capacity_kg);
        if packing.route_points.is_empty() {
            warn!("⚠️ Ningún contenedor cabe en el vehículo seleccionado");
        }
        let load_kg = packing.load_kg;

        let route = build_route(&allocation, packing);
        let saved = match self.stores.routes.save(route).await {
            Ok(saved) => saved,
            Err(e) => {
                error!("❌ No se pudo guardar la ruta generada: {}", e);
                self.allocator.release(&allocation).await;
                return Err(e.into());
            }
        };

        info!(
            "✅ Ruta generada: {} puntos, carga {:.2}/{} kg, vehículo {}",
            saved.points_to_collect.len(),
            load_kg,
            capacity_kg,
            allocation.vehicle.plate_number
        );

        Ok(saved)
    }

    /// Cambiar el estado de una ruta aplicando los efectos de la transición
    pub async fn update_route_status(&self, id: Uuid, status: RouteStatus) -> Result<Route, RouteError> {
        info!("🔄 Actualizando ruta {} a estado {}", id, status);

        let mut route = self
            .stores
            .routes
            .find_by_id(id)
            .await?
            .ok_or(RouteError::RouteNotFound(id))?;

        let old_status = route.status;
        route.status = status;

        match (old_status, status) {
            (RouteStatus::Planned, RouteStatus::InProgress) => {
                self.set_resources_in_use(&route, true).await?;
            }
            (RouteStatus::InProgress, RouteStatus::Completed) => {
                self.set_resources_in_use(&route, false).await?;
                self.empty_containers(&route).await?;
            }
            _ => debug!("Transición {} -> {} sin efectos", old_status, status),
        }

        Ok(self.stores.routes.save(route).await?)
    }

    /// Bloquear o liberar vehículo y equipo, uno a uno. Los ids que no
    /// existen se omiten.
    async fn set_resources_in_use(&self, route: &Route, in_use: bool) -> StoreResult<()> {
        if let Some(vehicle_id) = route.vehicle_id {
            match self.stores.vehicles.find_by_id(vehicle_id).await? {
                Some(mut vehicle) => {
                    vehicle.status = if in_use {
                        VehicleStatus::InUse
                    } else {
                        VehicleStatus::Available
                    };
                    self.stores.vehicles.save(vehicle).await?;
                }
                None => warn!("⚠️ Vehículo {} de la ruta {} no existe", vehicle_id, route.id),
            }
        }

        for employee_id in &route.employee_ids {
            match self.stores.employees.find_by_id(*employee_id).await? {
                Some(mut employee) => {
                    employee.available = !in_use;
                    self.stores.employees.save(employee).await?;
                }
                None => warn!("⚠️ Empleado {} de la ruta {} no existe", employee_id, route.id),
            }
        }

        Ok(())
    }

    async fn empty_containers(&self, route: &Route) -> StoreResult<()> {
        for rp in &route.points_to_collect {
            match self.stores.points.find_by_id(rp.point_id).await? {
                Some(mut point) => {
                    point.mark_emptied(Utc::now());
                    self.stores.points.save(point).await?;
                }
                None => warn!("⚠️ Contenedor {} de la ruta {} no existe", rp.point_id, route.id),
            }
        }
        Ok(())
    }

    pub async fn create_route(&self, route: Route) -> StoreResult<Route> {
        info!("Creando ruta para la fecha {}", route.date);
        self.stores.routes.save(route).await
    }

    pub async fn list_routes(&self, status: Option<RouteStatus>) -> StoreResult<Vec<Route>> {
        debug!("Listando rutas (filtro: {:?})", status);
        match status {
            Some(s) => self.stores.routes.find_by_status(s).await,
            None => self.stores.routes.find_all().await,
        }
    }

    pub async fn get_route(&self, id: Uuid) -> StoreResult<Option<Route>> {
        debug!("Buscando ruta {}", id);
        self.stores.routes.find_by_id(id).await
    }

    /// Reemplazar la ruta con el id dado (la crea si no existe)
    pub async fn update_route(&self, id: Uuid, mut route: Route) -> StoreResult<Route> {
        info!("Actualizando ruta {}", id);
        route.id = id;
        self.stores.routes.save(route).await
    }

    pub async fn delete_route(&self, id: Uuid) -> StoreResult<()> {
        info!("Eliminando ruta {}", id);
        self.stores.routes.delete_by_id(id).await
    }
}
