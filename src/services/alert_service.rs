//! Alertas de contenedores llenos
//!
//! Un contenedor genera alerta a partir del 90% de llenado; la prioridad es
//! HIGH desde el 95% y MEDIUM por debajo.

use tracing::debug;

use crate::dto::AlertResponse;
use crate::models::collection_point::ALERT_FILL_LEVEL;
use crate::models::{CollectionPoint, Priority};
use crate::repositories::{CollectionPointStore, StoreResult};

pub fn alert_for(point: &CollectionPoint) -> AlertResponse {
    let priority = if point.fill_level >= 95 {
        Priority::High
    } else {
        Priority::Medium
    };

    AlertResponse {
        alert_type: "FullContainer".to_string(),
        container_id: point.id,
        priority: priority.as_str().to_string(),
        fill_level: point.fill_level,
        message: format!("Container at {} is {}% full", point.location.address, point.fill_level),
    }
}

pub async fn list_alerts(points: &dyn CollectionPointStore) -> StoreResult<Vec<AlertResponse>> {
    debug!("🔔 Buscando alertas de contenedores");
    let full = points.find_by_fill_level_at_least(ALERT_FILL_LEVEL).await?;
    Ok(full.iter().filter(|p| p.needs_alert()).map(alert_for).collect())
}
