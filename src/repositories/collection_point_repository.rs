use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use super::{CollectionPointStore, StoreError, StoreResult};
use crate::models::{CollectionPoint, Location};

// Fila tal como vive en la tabla collection_points
#[derive(Debug, sqlx::FromRow)]
struct CollectionPointRow {
    id: Uuid,
    latitude: f64,
    longitude: f64,
    address: String,
    waste_type: String,
    capacity: f64,
    fill_level: i32,
    status: String,
    last_emptied: Option<DateTime<Utc>>,
}

impl TryFrom<CollectionPointRow> for CollectionPoint {
    type Error = StoreError;

    fn try_from(row: CollectionPointRow) -> Result<Self, Self::Error> {
        Ok(CollectionPoint {
            id: row.id,
            location: Location::new(row.latitude, row.longitude, row.address),
            waste_type: row.waste_type.parse()?,
            capacity: row.capacity,
            fill_level: row.fill_level,
            status: row.status.parse()?,
            last_emptied: row.last_emptied,
        })
    }
}

pub struct PgCollectionPointRepository {
    pool: PgPool,
}

impl PgCollectionPointRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionPointStore for PgCollectionPointRepository {
    async fn find_by_fill_level_at_least(&self, threshold: i32) -> StoreResult<Vec<CollectionPoint>> {
        let rows = sqlx::query_as::<_, CollectionPointRow>(
            "SELECT * FROM collection_points WHERE fill_level >= $1 ORDER BY created_at, id",
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CollectionPoint::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<CollectionPoint>> {
        let row = sqlx::query_as::<_, CollectionPointRow>("SELECT * FROM collection_points WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(CollectionPoint::try_from).transpose()
    }

    async fn save(&self, point: CollectionPoint) -> StoreResult<CollectionPoint> {
        point.validate()?;

        let row = sqlx::query_as::<_, CollectionPointRow>(
            r#"
            INSERT INTO collection_points (id, latitude, longitude, address, waste_type, capacity, fill_level, status, last_emptied)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE
            SET latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                address = EXCLUDED.address,
                waste_type = EXCLUDED.waste_type,
                capacity = EXCLUDED.capacity,
                fill_level = EXCLUDED.fill_level,
                status = EXCLUDED.status,
                last_emptied = EXCLUDED.last_emptied
            RETURNING *
            "#,
        )
        .bind(point.id)
        .bind(point.location.latitude)
        .bind(point.location.longitude)
        .bind(&point.location.address)
        .bind(point.waste_type.as_str())
        .bind(point.capacity)
        .bind(point.fill_level)
        .bind(point.status.as_str())
        .bind(point.last_emptied)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }
}
