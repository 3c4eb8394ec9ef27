//! Datos de demostración: contenedores de Tunis, dos conductores, dos
//! recolectores y tres camiones

use chrono::{Duration, Utc};
use tracing::info;

use crate::models::{CollectionPoint, Employee, Location, Role, Vehicle, WasteType};
use crate::repositories::StoreResult;
use crate::services::Stores;

const POINTS: [(&str, f64, f64, WasteType, i32); 10] = [
    ("123 Rue de Paris", 36.8065, 10.1815, WasteType::Plastic, 95),
    ("45 Avenue Habib Bourguiba", 36.8000, 10.1800, WasteType::Glass, 40),
    ("10 Rue de Marseille", 36.8100, 10.1850, WasteType::Organic, 85),
    ("Place de la Kasbah", 36.7980, 10.1700, WasteType::General, 20),
    ("Lac 1", 36.8300, 10.2300, WasteType::Plastic, 92),
    ("Carthage", 36.8500, 10.3200, WasteType::Glass, 10),
    ("Sidi Bou Said", 36.8700, 10.3400, WasteType::Organic, 75),
    ("La Marsa", 36.8800, 10.3300, WasteType::General, 60),
    ("Ariana Centre", 36.8600, 10.1900, WasteType::Plastic, 88),
    ("Manar 2", 36.8400, 10.1500, WasteType::Glass, 30),
];

const EMPLOYEES: [(&str, Role); 4] = [
    ("Ahmed Ben Ali", Role::Driver),
    ("Sami Tounsi", Role::Collector),
    ("Karim Khelil", Role::Driver),
    ("Mouna Jlassi", Role::Collector),
];

const VEHICLES: [(&str, i32); 3] = [("123-TN-4567", 5000), ("890-TN-1234", 3000), ("567-TN-8901", 8000)];

pub async fn seed_demo_data(stores: &Stores) -> StoreResult<()> {
    info!("🌱 Cargando datos de demostración...");
    let yesterday = Utc::now() - Duration::days(1);

    for (address, lat, lon, waste_type, fill) in POINTS {
        let mut point = CollectionPoint::new(Location::new(lat, lon, address), waste_type, fill);
        point.last_emptied = Some(yesterday);
        stores.points.save(point).await?;
    }
    for (name, role) in EMPLOYEES {
        stores.employees.save(Employee::new(name, role)).await?;
    }
    for (plate, capacity) in VEHICLES {
        stores.vehicles.save(Vehicle::new(plate, capacity)).await?;
    }

    info!(
        "✅ Datos cargados: {} contenedores, {} empleados, {} vehículos",
        POINTS.len(),
        EMPLOYEES.len(),
        VEHICLES.len()
    );
    Ok(())
}
