//! Asignación de vehículo y equipo
//!
//! Elige el vehículo disponible de mayor capacidad, el primer conductor
//! disponible y hasta dos recolectores. La selección trabaja sobre una foto
//! de la disponibilidad; con `reserve_on_generate` además reserva los
//! recursos con operaciones atómicas del store y detecta carreras perdidas.

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::models::{Employee, Role, Vehicle, VehicleStatus};
use crate::repositories::{EmployeeStore, VehicleStore};
use crate::utils::errors::{ResourceKind, RouteError};

/// Máximo de recolectores por ruta
pub const MAX_COLLECTORS: usize = 2;

/// Equipo asignado a una ruta
#[derive(Debug, Clone, PartialEq)]
pub struct Crew {
    pub driver: Employee,
    pub collectors: Vec<Employee>,
}

impl Crew {
    /// Ids en el orden persistido: conductor primero
    pub fn employee_ids(&self) -> Vec<uuid::Uuid> {
        std::iter::once(&self.driver)
            .chain(self.collectors.iter())
            .map(|e| e.id)
            .collect()
    }
}

/// Resultado de la asignación de recursos
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub vehicle: Vehicle,
    pub crew: Crew,
}

/// Vehículo de mayor capacidad; en empate gana el primero
pub fn pick_vehicle(available: &[Vehicle]) -> Option<&Vehicle> {
    available.iter().fold(None, |best: Option<&Vehicle>, v| match best {
        Some(b) if b.capacity >= v.capacity => Some(b),
        _ => Some(v),
    })
}

/// Primer conductor y hasta dos recolectores, en el orden del listado
pub fn pick_crew(available: &[Employee]) -> Option<Crew> {
    let driver = available.iter().find(|e| e.role == Role::Driver)?.clone();
    let collectors = available
        .iter()
        .filter(|e| e.role == Role::Collector)
        .take(MAX_COLLECTORS)
        .cloned()
        .collect();

    Some(Crew { driver, collectors })
}

pub struct ResourceAllocator {
    vehicles: Arc<dyn VehicleStore>,
    employees: Arc<dyn EmployeeStore>,
    reserve_on_generate: bool,
}

impl ResourceAllocator {
    pub fn new(vehicles: Arc<dyn VehicleStore>, employees: Arc<dyn EmployeeStore>, reserve_on_generate: bool) -> Self {
        Self {
            vehicles,
            employees,
            reserve_on_generate,
        }
    }

    /// Elegir vehículo y equipo. El listado de empleados solo se consulta
    /// cuando ya hay vehículo.
    pub async fn allocate(&self) -> Result<Allocation, RouteError> {
        let available_vehicles = self.vehicles.find_available().await?;
        let vehicle = match pick_vehicle(&available_vehicles) {
            Some(v) => v.clone(),
            None => {
                error!("❌ No hay vehículos disponibles para generar la ruta");
                return Err(RouteError::NoVehicleAvailable);
            }
        };
        debug!("🚛 Vehículo elegido: {} ({} kg)", vehicle.plate_number, vehicle.capacity);

        let available_employees = self.employees.find_available().await?;
        let crew = match pick_crew(&available_employees) {
            Some(c) => c,
            None => {
                error!("❌ No hay conductores disponibles para generar la ruta");
                return Err(RouteError::NoDriverAvailable);
            }
        };
        if crew.collectors.len() < MAX_COLLECTORS {
            debug!("👷 Equipo incompleto: {} recolector(es)", crew.collectors.len());
        }

        let allocation = Allocation { vehicle, crew };
        if self.reserve_on_generate {
            self.reserve(&allocation).await?;
        }

        Ok(allocation)
    }

    /// Reservar vehículo y equipo; si algún recurso ya estaba tomado se
    /// deshacen las reservas hechas en esta llamada
    async fn reserve(&self, allocation: &Allocation) -> Result<(), RouteError> {
        let vehicle_id = allocation.vehicle.id;
        if self.vehicles.try_reserve(vehicle_id).await? != Some(VehicleStatus::Available) {
            warn!("⚠️ Vehículo {} reservado por otra ruta", vehicle_id);
            return Err(RouteError::ResourceAlreadyReserved {
                kind: ResourceKind::Vehicle,
                id: vehicle_id,
            });
        }

        let mut reserved = Vec::new();
        for employee_id in allocation.crew.employee_ids() {
            match self.employees.reserve(employee_id).await {
                Ok(Some(true)) => reserved.push(employee_id),
                Ok(_) => {
                    warn!("⚠️ Empleado {} reservado por otra ruta", employee_id);
                    self.rollback(vehicle_id, &reserved).await;
                    return Err(RouteError::ResourceAlreadyReserved {
                        kind: ResourceKind::Employee,
                        id: employee_id,
                    });
                }
                Err(e) => {
                    self.rollback(vehicle_id, &reserved).await;
                    return Err(e.into());
                }
            }
        }

        Ok(())
    }

    /// Deshacer las reservas de una asignación que no llegó a guardarse.
    /// Sin `reserve_on_generate` no hay nada que liberar.
    pub(crate) async fn release(&self, allocation: &Allocation) {
        if self.reserve_on_generate {
            warn!("↩️ Liberando recursos de una ruta no guardada");
            self.rollback(allocation.vehicle.id, &allocation.crew.employee_ids()).await;
        }
    }

    async fn rollback(&self, vehicle_id: uuid::Uuid, employee_ids: &[uuid::Uuid]) {
        if let Err(e) = self.vehicles.release(vehicle_id).await {
            error!("❌ No se pudo liberar el vehículo {}: {}", vehicle_id, e);
        }
        for id in employee_ids {
            if let Err(e) = self.employees.release(*id).await {
                error!("❌ No se pudo liberar el empleado {}: {}", id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{InMemoryEmployeeStore, InMemoryVehicleStore};

    #[test]
    fn test_pick_vehicle_highest_capacity_first_on_tie() {
        let a = Vehicle::new("A", 3000);
        let b = Vehicle::new("B", 8000);
        let c = Vehicle::new("C", 8000);
        let vehicles = vec![a, b.clone(), c];

        assert_eq!(pick_vehicle(&vehicles).map(|v| v.id), Some(b.id));
        assert!(pick_vehicle(&[]).is_none());
    }

    #[test]
    fn test_pick_crew_caps_collectors_at_two() {
        let employees = vec![
            Employee::new("c1", Role::Collector),
            Employee::new("d1", Role::Driver),
            Employee::new("c2", Role::Collector),
            Employee::new("d2", Role::Driver),
            Employee::new("c3", Role::Collector),
        ];

        let crew = pick_crew(&employees).unwrap();
        assert_eq!(crew.driver.name, "d1");
        let names: Vec<&str> = crew.collectors.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["c1", "c2"]);
        assert_eq!(crew.employee_ids()[0], crew.driver.id);
    }

    #[test]
    fn test_pick_crew_without_driver() {
        let employees = vec![Employee::new("c1", Role::Collector)];
        assert!(pick_crew(&employees).is_none());
    }

    #[test]
    fn test_pick_crew_driver_alone() {
        let crew = pick_crew(&[Employee::new("d1", Role::Driver)]).unwrap();
        assert!(crew.collectors.is_empty());
        assert_eq!(crew.employee_ids().len(), 1);
    }

    async fn stores() -> (Arc<InMemoryVehicleStore>, Arc<InMemoryEmployeeStore>) {
        (Arc::new(InMemoryVehicleStore::new()), Arc::new(InMemoryEmployeeStore::new()))
    }

    #[tokio::test]
    async fn test_allocate_without_vehicle() {
        let (vehicles, employees) = stores().await;
        employees.save(Employee::new("d1", Role::Driver)).await.unwrap();

        let allocator = ResourceAllocator::new(vehicles, employees, false);
        assert!(matches!(allocator.allocate().await, Err(RouteError::NoVehicleAvailable)));
    }

    #[tokio::test]
    async fn test_allocate_without_driver() {
        let (vehicles, employees) = stores().await;
        vehicles.save(Vehicle::new("123-TN-4567", 5000)).await.unwrap();
        employees.save(Employee::new("c1", Role::Collector)).await.unwrap();

        let allocator = ResourceAllocator::new(vehicles, employees, false);
        assert!(matches!(allocator.allocate().await, Err(RouteError::NoDriverAvailable)));
    }

    #[tokio::test]
    async fn test_allocate_without_reservation_leaves_resources_untouched() {
        let (vehicles, employees) = stores().await;
        let truck = vehicles.save(Vehicle::new("123-TN-4567", 5000)).await.unwrap();
        let driver = employees.save(Employee::new("d1", Role::Driver)).await.unwrap();

        let allocator = ResourceAllocator::new(vehicles.clone(), employees.clone(), false);
        let first = allocator.allocate().await.unwrap();
        let second = allocator.allocate().await.unwrap();

        // Sin reserva dos generaciones ven el mismo vehículo libre
        assert_eq!(first.vehicle.id, truck.id);
        assert_eq!(second.vehicle.id, truck.id);
        assert_eq!(second.crew.driver.id, driver.id);
    }

    #[tokio::test]
    async fn test_allocate_with_reservation_locks_resources() {
        let (vehicles, employees) = stores().await;
        let truck = vehicles.save(Vehicle::new("123-TN-4567", 5000)).await.unwrap();
        let driver = employees.save(Employee::new("d1", Role::Driver)).await.unwrap();
        let collector = employees.save(Employee::new("c1", Role::Collector)).await.unwrap();

        let allocator = ResourceAllocator::new(vehicles.clone(), employees.clone(), true);
        allocator.allocate().await.unwrap();

        let truck = vehicles.find_by_id(truck.id).await.unwrap().unwrap();
        assert_eq!(truck.status, VehicleStatus::InUse);
        assert!(!employees.find_by_id(driver.id).await.unwrap().unwrap().available);
        assert!(!employees.find_by_id(collector.id).await.unwrap().unwrap().available);

        assert!(matches!(allocator.allocate().await, Err(RouteError::NoVehicleAvailable)));
    }

    #[tokio::test]
    async fn test_lost_vehicle_race_is_rejected() {
        let (vehicles, employees) = stores().await;
        let truck = vehicles.save(Vehicle::new("123-TN-4567", 5000)).await.unwrap();
        employees.save(Employee::new("d1", Role::Driver)).await.unwrap();

        let allocator = ResourceAllocator::new(vehicles.clone(), employees.clone(), true);
        let snapshot = Allocation {
            vehicle: truck.clone(),
            crew: pick_crew(&employees.find_available().await.unwrap()).unwrap(),
        };

        // Otra generación se adelanta y toma el vehículo
        vehicles.try_reserve(truck.id).await.unwrap();

        let result = allocator.reserve(&snapshot).await;
        assert!(matches!(
            result,
            Err(RouteError::ResourceAlreadyReserved { kind: ResourceKind::Vehicle, id }) if id == truck.id
        ));
        assert_eq!(employees.find_available().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_lost_employee_race_rolls_back() {
        let (vehicles, employees) = stores().await;
        let truck = vehicles.save(Vehicle::new("123-TN-4567", 5000)).await.unwrap();
        let driver = employees.save(Employee::new("d1", Role::Driver)).await.unwrap();
        let collector = employees.save(Employee::new("c1", Role::Collector)).await.unwrap();

        let allocator = ResourceAllocator::new(vehicles.clone(), employees.clone(), true);
        let snapshot = Allocation {
            vehicle: truck.clone(),
            crew: Crew {
                driver: driver.clone(),
                collectors: vec![collector.clone()],
            },
        };

        employees.reserve(collector.id).await.unwrap();

        let result = allocator.reserve(&snapshot).await;
        assert!(matches!(
            result,
            Err(RouteError::ResourceAlreadyReserved { kind: ResourceKind::Employee, id }) if id == collector.id
        ));

        let truck = vehicles.find_by_id(truck.id).await.unwrap().unwrap();
        assert_eq!(truck.status, VehicleStatus::Available);
        assert!(employees.find_by_id(driver.id).await.unwrap().unwrap().available);
    }
}
