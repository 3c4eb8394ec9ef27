use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use super::{StoreError, StoreResult, VehicleStore};
use crate::models::{Location, Vehicle, VehicleStatus};

// Fila de la tabla vehicles; la ubicación actual es opcional y se guarda en columnas planas
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: Uuid,
    plate_number: String,
    capacity: i32,
    status: String,
    current_latitude: Option<f64>,
    current_longitude: Option<f64>,
    current_address: Option<String>,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = StoreError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let current_location = match (row.current_latitude, row.current_longitude) {
            (Some(lat), Some(lon)) => Some(Location::new(lat, lon, row.current_address.unwrap_or_default())),
            _ => None,
        };

        Ok(Vehicle {
            id: row.id,
            plate_number: row.plate_number,
            capacity: row.capacity,
            status: row.status.parse()?,
            current_location,
        })
    }
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for PgVehicleRepository {
    async fn find_available(&self) -> StoreResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            "SELECT * FROM vehicles WHERE status = $1 ORDER BY created_at, id",
        )
        .bind(VehicleStatus::Available.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn save(&self, vehicle: Vehicle) -> StoreResult<Vehicle> {
        vehicle.validate()?;
        let location = vehicle.current_location.as_ref();

        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicles (id, plate_number, capacity, status, current_latitude, current_longitude, current_address)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET plate_number = EXCLUDED.plate_number,
                capacity = EXCLUDED.capacity,
                status = EXCLUDED.status,
                current_latitude = EXCLUDED.current_latitude,
                current_longitude = EXCLUDED.current_longitude,
                current_address = EXCLUDED.current_address
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.plate_number)
        .bind(vehicle.capacity)
        .bind(vehicle.status.as_str())
        .bind(location.map(|l| l.latitude))
        .bind(location.map(|l| l.longitude))
        .bind(location.map(|l| l.address.clone()))
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn try_reserve(&self, id: Uuid) -> StoreResult<Option<VehicleStatus>> {
        // El subselect bloquea la fila y expone el estado previo al UPDATE
        let previous: Option<(String,)> = sqlx::query_as(
            r#"
            UPDATE vehicles v
            SET status = CASE WHEN old.status = 'AVAILABLE' THEN 'IN_USE' ELSE old.status END
            FROM (SELECT id, status FROM vehicles WHERE id = $1 FOR UPDATE) old
            WHERE v.id = old.id
            RETURNING old.status
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        previous.map(|(status,)| status.parse().map_err(StoreError::from)).transpose()
    }

    async fn release(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("UPDATE vehicles SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(VehicleStatus::Available.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
