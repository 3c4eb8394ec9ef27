use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Alerta de contenedor lleno
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertResponse {
    pub alert_type: String,
    pub container_id: Uuid,
    pub priority: String,
    pub fill_level: i32,
    pub message: String,
}
