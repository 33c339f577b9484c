//! Store en memoria de la flota
//!
//! Dueño exclusivo de las unidades y usuarios. Los handlers nunca guardan
//! referencias entre requests: reciben copias y buscan por id cada vez.

use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::dto::unit_dto::{FieldMap, UnitPatch};
use crate::models::{FleetUnit, UnitStatus, User};
use crate::utils::errors::{not_found_error, AppError};

/// Store compartido entre requests; la escritura queda serializada por el lock
pub type SharedStore = Arc<RwLock<FleetStore>>;

#[derive(Debug, Default)]
pub struct FleetStore {
    units: Vec<FleetUnit>,
    users: Vec<User>,
}

impl FleetStore {
    pub fn new(units: Vec<FleetUnit>, users: Vec<User>) -> Self {
        Self { units, users }
    }

    /// Store con las unidades iniciales de la flota
    pub fn seeded(users: Vec<User>) -> Self {
        Self::new(seed_units(), users)
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    /// Todas las unidades en orden de inserción
    pub fn list(&self) -> Vec<FleetUnit> {
        self.units.clone()
    }

    pub fn get_by_id(&self, id: u32) -> Result<FleetUnit, AppError> {
        self.units
            .iter()
            .find(|unit| unit.id == id)
            .cloned()
            .ok_or_else(|| not_found_error("FleetUnit", &id.to_string()))
    }

    /// Aplica un merge validado. Si algún campo es inválido la unidad queda intacta.
    pub fn merge(&mut self, id: u32, fields: &FieldMap) -> Result<FleetUnit, AppError> {
        let unit = self
            .units
            .iter_mut()
            .find(|unit| unit.id == id)
            .ok_or_else(|| not_found_error("FleetUnit", &id.to_string()))?;

        let patch = UnitPatch::from_fields(fields)?;
        patch.apply(unit);

        tracing::info!("💾 Unidad {} actualizada", id);
        Ok(unit.clone())
    }

    pub fn filter_by_status(&self, status: UnitStatus) -> Vec<FleetUnit> {
        self.units
            .iter()
            .filter(|unit| unit.status == status)
            .cloned()
            .collect()
    }

    pub fn find_user(&self, username: &str) -> Option<User> {
        self.users.iter().find(|user| user.username == username).cloned()
    }
}

fn seed_units() -> Vec<FleetUnit> {
    vec![
        FleetUnit {
            id: 1,
            name: "Atlas-Prime".to_string(),
            model: "GX-2000".to_string(),
            status: UnitStatus::Active,
            location: "Warehouse A".to_string(),
            battery_level: 87,
            last_maintenance: seed_date(2023, 12, 1),
            assigned_task: "Package Sorting".to_string(),
        },
        FleetUnit {
            id: 2,
            name: "Beta-Unit".to_string(),
            model: "GX-1500".to_string(),
            status: UnitStatus::Maintenance,
            location: "Service Bay 1".to_string(),
            battery_level: 23,
            last_maintenance: seed_date(2023, 11, 28),
            assigned_task: "Under Repair".to_string(),
        },
        FleetUnit {
            id: 3,
            name: "Charlie-Loader".to_string(),
            model: "HL-3000".to_string(),
            status: UnitStatus::Active,
            location: "Loading Dock B".to_string(),
            battery_level: 95,
            last_maintenance: seed_date(2023, 12, 3),
            assigned_task: "Heavy Lifting".to_string(),
        },
    ]
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
