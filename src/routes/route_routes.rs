use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{RouteRequest, StatusFilter, StatusQuery};
use crate::models::Route;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_route).get(list_routes))
        .route("/generate", post(generate_route))
        .route("/:id", get(get_route).put(update_route).delete(delete_route))
        .route("/:id/status", patch(update_route_status))
}

async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Result<(StatusCode, Json<Route>), AppError> {
    request.validate()?;
    let route = state.routes.create_route(request.into_route(Uuid::new_v4())).await?;
    Ok((StatusCode::CREATED, Json(route)))
}

async fn list_routes(
    State(state): State<AppState>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<Route>>, AppError> {
    Ok(Json(state.routes.list_routes(filter.status).await?))
}

async fn get_route(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Route>, AppError> {
    state
        .routes
        .get_route(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found_error("Route", &id))
}

async fn update_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<Route>, AppError> {
    request.validate()?;
    Ok(Json(state.routes.update_route(id, request.into_route(id)).await?))
}

async fn delete_route(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, AppError> {
    state.routes.delete_route(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn generate_route(State(state): State<AppState>) -> Result<(StatusCode, Json<Route>), AppError> {
    let route = state.routes.generate_optimized_route().await?;
    Ok((StatusCode::CREATED, Json(route)))
}

async fn update_route_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Route>, AppError> {
    Ok(Json(state.routes.update_route_status(id, query.status).await?))
}
