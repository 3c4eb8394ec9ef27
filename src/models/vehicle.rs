//! Modelo de Vehicle
//!
//! El estado del vehículo solo lo cambia el ciclo de vida de las rutas
//! (o una edición administrativa directa).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::{Location, ParseEnumError};

/// Estado del vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Available,
    InUse,
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "AVAILABLE",
            VehicleStatus::InUse => "IN_USE",
            VehicleStatus::Maintenance => "MAINTENANCE",
        }
    }
}

impl FromStr for VehicleStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(VehicleStatus::Available),
            "IN_USE" => Ok(VehicleStatus::InUse),
            "MAINTENANCE" => Ok(VehicleStatus::Maintenance),
            other => Err(ParseEnumError::new("vehicle_status", other)),
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Vehicle {
    pub id: Uuid,
    #[validate(length(min = 1, max = 20))]
    pub plate_number: String,
    /// Carga útil en kg
    #[validate(range(min = 0))]
    pub capacity: i32,
    pub status: VehicleStatus,
    pub current_location: Option<Location>,
}

impl Vehicle {
    /// Vehículo disponible sin ubicación conocida
    pub fn new(plate_number: impl Into<String>, capacity: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            plate_number: plate_number.into(),
            capacity,
            status: VehicleStatus::Available,
            current_location: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }
}
