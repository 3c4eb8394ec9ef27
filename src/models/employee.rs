//! Modelo de Employee

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::{ParseEnumError, WasteType};

/// Rol del empleado. Un empleado es conductor o recolector, nunca ambos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Driver,
    Collector,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Driver => "DRIVER",
            Role::Collector => "COLLECTOR",
        }
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRIVER" => Ok(Role::Driver),
            "COLLECTOR" => Ok(Role::Collector),
            other => Err(ParseEnumError::new("role", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub available: bool,
    /// Tipos de residuo que maneja; el asignador aún no los usa
    #[serde(default)]
    pub competencies: Vec<WasteType>,
}

impl Employee {
    /// Empleado disponible sin competencias
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role,
            available: true,
            competencies: Vec::new(),
        }
    }
}
