//! Modelo de CollectionPoint
//!
//! Un contenedor de residuos con su nivel de llenado. El nivel de llenado
//! siempre está en [0, 100]; los stores lo validan antes de guardar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::{Location, ParseEnumError};

/// Capacidad nominal por defecto de un contenedor, en kg
pub const DEFAULT_POINT_CAPACITY_KG: f64 = 1000.0;

/// Nivel de llenado a partir del cual un contenedor genera alerta
pub const ALERT_FILL_LEVEL: i32 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WasteType {
    Plastic,
    Glass,
    Organic,
    General,
}

impl WasteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteType::Plastic => "PLASTIC",
            WasteType::Glass => "GLASS",
            WasteType::Organic => "ORGANIC",
            WasteType::General => "GENERAL",
        }
    }
}

impl FromStr for WasteType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLASTIC" => Ok(WasteType::Plastic),
            "GLASS" => Ok(WasteType::Glass),
            "ORGANIC" => Ok(WasteType::Organic),
            "GENERAL" => Ok(WasteType::General),
            other => Err(ParseEnumError::new("waste_type", other)),
        }
    }
}

impl fmt::Display for WasteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estado operativo del contenedor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PointStatus {
    Active,
    Maintenance,
    Broken,
}

impl PointStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointStatus::Active => "ACTIVE",
            PointStatus::Maintenance => "MAINTENANCE",
            PointStatus::Broken => "BROKEN",
        }
    }
}

impl FromStr for PointStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(PointStatus::Active),
            "MAINTENANCE" => Ok(PointStatus::Maintenance),
            "BROKEN" => Ok(PointStatus::Broken),
            other => Err(ParseEnumError::new("point_status", other)),
        }
    }
}

fn default_capacity() -> f64 {
    DEFAULT_POINT_CAPACITY_KG
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CollectionPoint {
    pub id: Uuid,
    pub location: Location,
    pub waste_type: WasteType,
    /// Capacidad nominal en kg
    #[serde(default = "default_capacity")]
    #[validate(range(min = 0.0))]
    pub capacity: f64,
    /// Porcentaje de llenado (0-100)
    #[validate(range(min = 0, max = 100))]
    pub fill_level: i32,
    pub status: PointStatus,
    pub last_emptied: Option<DateTime<Utc>>,
}

impl CollectionPoint {
    /// Contenedor activo con la capacidad por defecto
    pub fn new(location: Location, waste_type: WasteType, fill_level: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            location,
            waste_type,
            capacity: DEFAULT_POINT_CAPACITY_KG,
            fill_level,
            status: PointStatus::Active,
            last_emptied: None,
        }
    }

    pub fn needs_alert(&self) -> bool {
        self.fill_level >= ALERT_FILL_LEVEL
    }

    /// Vaciar el contenedor al completar una ruta
    pub fn mark_emptied(&mut self, at: DateTime<Utc>) {
        self.fill_level = 0;
        self.last_emptied = Some(at);
    }
}
