use crate::dto::unit_dto::FieldMap;
use crate::models::{FleetUnit, UnitStatus};
use crate::repositories::SharedStore;
use crate::services::fleet_health_service::{summarize, FleetHealthSummary};
use crate::utils::errors::{not_found_error, AppError};
use crate::views::pages::{self, APP_TITLE};
use crate::views::Html;

pub struct UnitController {
    store: SharedStore,
}

/// Ids no numéricos se tratan igual que ids inexistentes
pub fn parse_unit_id(raw: &str) -> Result<u32, AppError> {
    raw.parse::<u32>()
        .map_err(|_| not_found_error("FleetUnit", raw))
}

impl UnitController {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<FleetUnit> {
        self.store.read().await.list()
    }

    pub async fn get_by_id(&self, raw_id: &str) -> Result<FleetUnit, AppError> {
        let id = parse_unit_id(raw_id)?;
        self.store.read().await.get_by_id(id)
    }

    pub async fn update(&self, raw_id: &str, fields: FieldMap) -> Result<FleetUnit, AppError> {
        let id = parse_unit_id(raw_id)?;
        self.store.write().await.merge(id, &fields)
    }

    pub async fn health(&self) -> FleetHealthSummary {
        summarize(&self.list().await)
    }

    pub async fn dashboard_page(&self) -> Result<Html, AppError> {
        let units = self.list().await;
        pages::dashboard_page(&units, &summarize(&units))
    }

    pub async fn units_page(&self) -> Result<Html, AppError> {
        let units = self.list().await;
        pages::units_page(&format!("Units - {}", APP_TITLE), "All units", &units)
    }

    pub async fn maintenance_page(&self) -> Result<Html, AppError> {
        let units = self.store.read().await.filter_by_status(UnitStatus::Maintenance);
        pages::units_page(
            &format!("Maintenance Schedule - {}", APP_TITLE),
            "Units in maintenance",
            &units,
        )
    }

    pub async fn detail_page(&self, raw_id: &str) -> Result<Html, AppError> {
        let unit = self.get_by_id(raw_id).await?;
        pages::unit_detail_page(&unit)
    }
}
