use axum::{extract::State, routing::get, Json, Router};

use crate::dto::AlertResponse;
use crate::models::CollectionPoint;
use crate::services::alert_service;
use crate::services::demand_selector::{select_demand, COLLECTION_THRESHOLD};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_point_router() -> Router<AppState> {
    Router::new()
        .route("/alerts", get(list_alerts))
        .route("/needing-collection", get(needing_collection))
}

async fn list_alerts(State(state): State<AppState>) -> Result<Json<Vec<AlertResponse>>, AppError> {
    let alerts = alert_service::list_alerts(state.stores().points.as_ref()).await?;
    Ok(Json(alerts))
}

/// Contenedores por encima del umbral de recolección, sin ordenar
async fn needing_collection(State(state): State<AppState>) -> Result<Json<Vec<CollectionPoint>>, AppError> {
    let points = select_demand(state.stores().points.as_ref(), COLLECTION_THRESHOLD).await?;
    Ok(Json(points))
}
