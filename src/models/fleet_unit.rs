//! Modelo de FleetUnit
//!
//! Una unidad de la flota de robots. El `id` es inmutable y único dentro
//! del store; `battery_level` siempre queda dentro de [0, 100].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Estado operativo de una unidad
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UnitStatus {
    Active,
    Maintenance,
    Offline,
}

impl UnitStatus {
    pub const ALL: [&'static str; 3] = ["Active", "Maintenance", "Offline"];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::Active => "Active",
            UnitStatus::Maintenance => "Maintenance",
            UnitStatus::Offline => "Offline",
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(UnitStatus::Active),
            "Maintenance" => Ok(UnitStatus::Maintenance),
            "Offline" => Ok(UnitStatus::Offline),
            _ => Err(()),
        }
    }
}

/// Unidad de la flota tal y como se expone en la API JSON
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FleetUnit {
    pub id: u32,
    pub name: String,
    pub model: String,
    pub status: UnitStatus,
    pub location: String,
    pub battery_level: u8,
    pub last_maintenance: NaiveDate,
    pub assigned_task: String,
}
