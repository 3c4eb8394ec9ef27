use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{RouteStore, StoreError, StoreResult};
use crate::models::{Location, Route, RoutePoint, RouteStatus};

// Los RoutePoint y el depósito se guardan embebidos como JSONB
#[derive(Debug, sqlx::FromRow)]
struct RouteRow {
    id: Uuid,
    status: String,
    date: NaiveDate,
    vehicle_id: Option<Uuid>,
    cached_vehicle_capacity: f64,
    employee_ids: Vec<Uuid>,
    points_to_collect: Json<Vec<RoutePoint>>,
    estimated_distance_km: f64,
    depot_location: Option<Json<Location>>,
}

impl TryFrom<RouteRow> for Route {
    type Error = StoreError;

    fn try_from(row: RouteRow) -> Result<Self, Self::Error> {
        Ok(Route {
            id: row.id,
            status: row.status.parse()?,
            date: row.date,
            vehicle_id: row.vehicle_id,
            cached_vehicle_capacity: row.cached_vehicle_capacity,
            employee_ids: row.employee_ids,
            points_to_collect: row.points_to_collect.0,
            estimated_distance_km: row.estimated_distance_km,
            depot_location: row.depot_location.map(|d| d.0),
        })
    }
}

pub struct PgRouteRepository {
    pool: PgPool,
}

impl PgRouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RouteStore for PgRouteRepository {
    async fn save(&self, route: Route) -> StoreResult<Route> {
        let row = sqlx::query_as::<_, RouteRow>(
            r#"
            INSERT INTO routes (id, status, date, vehicle_id, cached_vehicle_capacity, employee_ids,
                                points_to_collect, estimated_distance_km, depot_location)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE
            SET status = EXCLUDED.status,
                date = EXCLUDED.date,
                vehicle_id = EXCLUDED.vehicle_id,
                cached_vehicle_capacity = EXCLUDED.cached_vehicle_capacity,
                employee_ids = EXCLUDED.employee_ids,
                points_to_collect = EXCLUDED.points_to_collect,
                estimated_distance_km = EXCLUDED.estimated_distance_km,
                depot_location = EXCLUDED.depot_location
            RETURNING *
            "#,
        )
        .bind(route.id)
        .bind(route.status.as_str())
        .bind(route.date)
        .bind(route.vehicle_id)
        .bind(route.cached_vehicle_capacity)
        .bind(&route.employee_ids)
        .bind(Json(&route.points_to_collect))
        .bind(route.estimated_distance_km)
        .bind(route.depot_location.as_ref().map(Json))
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Route>> {
        let row = sqlx::query_as::<_, RouteRow>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Route::try_from).transpose()
    }

    async fn find_all(&self) -> StoreResult<Vec<Route>> {
        let rows = sqlx::query_as::<_, RouteRow>("SELECT * FROM routes ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Route::try_from).collect()
    }

    async fn find_by_status(&self, status: RouteStatus) -> StoreResult<Vec<Route>> {
        let rows = sqlx::query_as::<_, RouteRow>(
            "SELECT * FROM routes WHERE status = $1 ORDER BY created_at, id",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Route::try_from).collect()
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
