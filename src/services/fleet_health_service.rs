//! Resumen de salud de la flota
//!
//! Conteos por estado, batería media y alertas de batería baja que se
//! muestran en el dashboard y en `/api/fleet/health`.

use serde::Serialize;
use std::fmt;

use crate::models::{FleetUnit, UnitStatus};

const BATTERY_LOW_THRESHOLD: u8 = 20;
const BATTERY_CRITICAL_THRESHOLD: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Warning => write!(f, "WARN"),
            AlertSeverity::Critical => write!(f, "CRIT"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthAlert {
    pub severity: AlertSeverity,
    pub unit_id: u32,
    pub unit_name: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FleetHealthSummary {
    pub total_units: usize,
    pub active_count: usize,
    pub maintenance_count: usize,
    pub offline_count: usize,
    pub avg_battery: f64,
    pub alerts: Vec<HealthAlert>,
}

pub fn summarize(units: &[FleetUnit]) -> FleetHealthSummary {
    let count = |status: UnitStatus| units.iter().filter(|u| u.status == status).count();

    let avg_battery = if units.is_empty() {
        0.0
    } else {
        units.iter().map(|u| u.battery_level as f64).sum::<f64>() / units.len() as f64
    };

    let mut alerts = Vec::new();
    for unit in units {
        if unit.battery_level < BATTERY_CRITICAL_THRESHOLD {
            let message = format!("Battery critically low: {}%", unit.battery_level);
            alerts.push(alert(unit, AlertSeverity::Critical, message));
        } else if unit.battery_level < BATTERY_LOW_THRESHOLD {
            let message = format!("Battery low: {}%", unit.battery_level);
            alerts.push(alert(unit, AlertSeverity::Warning, message));
        }

        if unit.status == UnitStatus::Offline {
            let message = "Unit is offline".to_string();
            alerts.push(alert(unit, AlertSeverity::Warning, message));
        }
    }

    FleetHealthSummary {
        total_units: units.len(),
        active_count: count(UnitStatus::Active),
        maintenance_count: count(UnitStatus::Maintenance),
        offline_count: count(UnitStatus::Offline),
        avg_battery,
        alerts,
    }
}

fn alert(unit: &FleetUnit, severity: AlertSeverity, message: String) -> HealthAlert {
    HealthAlert {
        severity,
        unit_id: unit.id,
        unit_name: unit.name.clone(),
        message,
    }
}
