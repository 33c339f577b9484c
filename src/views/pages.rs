//! Páginas HTML del dashboard
//!
//! Cada función arma el contexto de una página y la envuelve en el layout.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::{FleetUnit, UnitStatus};
use crate::services::fleet_health_service::FleetHealthSummary;
use crate::utils::errors::AppError;
use crate::views::renderer::{render, render_page, Context, Html};

pub const APP_TITLE: &str = "Robot Fleet Manager";

pub fn dashboard_page(units: &[FleetUnit], summary: &FleetHealthSummary) -> Result<Html, AppError> {
    let alerts = summary
        .alerts
        .iter()
        .map(|alert| {
            render(
                "alert_row",
                &Context::new()
                    .with("severity", alert.severity)
                    .with("unit_id", alert.unit_id)
                    .with("unit_name", &alert.unit_name)
                    .with("message", &alert.message),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let body = render(
        "dashboard",
        &Context::new()
            .with("heading", APP_TITLE)
            .with("total_units", summary.total_units)
            .with("active_units", summary.active_count)
            .with("maintenance_units", summary.maintenance_count)
            .with("offline_units", summary.offline_count)
            .with("avg_battery", format!("{:.1}", summary.avg_battery))
            .with("alert_count", summary.alerts.len())
            .with_rendered("alerts", Html::concat(alerts))
            .with_rendered("units", unit_table("All units", units)?),
    )?;

    render_page(APP_TITLE, body)
}

pub fn units_page(title: &str, heading: &str, units: &[FleetUnit]) -> Result<Html, AppError> {
    render_page(title, unit_table(heading, units)?)
}

fn unit_table(heading: &str, units: &[FleetUnit]) -> Result<Html, AppError> {
    let rows = units
        .iter()
        .map(|unit| render("unit_row", &unit_context(unit)))
        .collect::<Result<Vec<_>, _>>()?;

    render(
        "units",
        &Context::new()
            .with("heading", heading)
            .with("count", units.len())
            .with_rendered("rows", Html::concat(rows)),
    )
}

pub fn unit_detail_page(unit: &FleetUnit) -> Result<Html, AppError> {
    let options = [UnitStatus::Active, UnitStatus::Maintenance, UnitStatus::Offline]
        .iter()
        .map(|status| {
            let selected = if *status == unit.status { "selected" } else { "" };
            render(
                "status_option",
                &Context::new().with("value", status).with("selected", selected),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let body = render(
        "unit_detail",
        &unit_context(unit).with_rendered("status_options", Html::concat(options)),
    )?;

    render_page(format!("{} - {}", unit.name, APP_TITLE), body)
}

fn unit_context(unit: &FleetUnit) -> Context {
    Context::new()
        .with("id", unit.id)
        .with("name", &unit.name)
        .with("model", &unit.model)
        .with("status", unit.status)
        .with("location", &unit.location)
        .with("battery_level", unit.battery_level)
        .with("last_maintenance", unit.last_maintenance.format("%Y-%m-%d"))
        .with("assigned_task", &unit.assigned_task)
}

pub fn error_page(
    heading: &str,
    message: &str,
    details: &[(String, String)],
) -> Result<Html, AppError> {
    let details = details
        .iter()
        .map(|(field, message)| {
            render(
                "error_detail",
                &Context::new().with("field", field).with("message", message),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let body = render(
        "error",
        &Context::new()
            .with("heading", heading)
            .with("message", message)
            .with_rendered("details", Html::concat(details)),
    )?;

    render_page(format!("{} - {}", heading, APP_TITLE), body)
}

/// Error de una página HTML: mismo `AppError`, respuesta renderizada
#[derive(Debug)]
pub struct HtmlError(pub AppError);

impl From<AppError> for HtmlError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl HtmlError {
    fn heading(&self) -> &'static str {
        match self.0.status_code() {
            StatusCode::NOT_FOUND => "Not Found",
            StatusCode::BAD_REQUEST => "Invalid Update",
            StatusCode::UNAUTHORIZED => "Unauthorized",
            _ => "Something Went Wrong",
        }
    }

    fn details(&self) -> Vec<(String, String)> {
        let AppError::Validation(errors) = &self.0 else {
            return Vec::new();
        };

        let mut details: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    (field.to_string(), message)
                })
            })
            .collect();
        details.sort();
        details
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        self.0.log();
        let status = self.0.status_code();

        match error_page(self.heading(), &self.0.public_message(), &self.details()) {
            Ok(page) => (status, page).into_response(),
            Err(render_error) => {
                render_error.log();
                (status, status.canonical_reason().unwrap_or("Error")).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::FleetStore;
    use crate::services::fleet_health_service::summarize;

    const PAYLOAD: &str = "<script>alert(1)</script>";

    fn hostile_unit() -> FleetUnit {
        let mut unit = FleetStore::seeded(vec![]).get_by_id(1).unwrap();
        unit.name = PAYLOAD.to_string();
        unit.location = "\"><img src=x onerror=alert(1)>".to_string();
        unit
    }

    #[test]
    fn test_every_page_escapes_unit_fields() {
        let units = vec![hostile_unit()];
        let pages = vec![
            dashboard_page(&units, &summarize(&units)).unwrap(),
            units_page("Units", "All units", &units).unwrap(),
            unit_detail_page(&units[0]).unwrap(),
            error_page(PAYLOAD, PAYLOAD, &[(PAYLOAD.to_string(), PAYLOAD.to_string())]).unwrap(),
        ];

        for page in pages {
            assert!(!page.as_str().contains("<script>"));
            assert!(!page.as_str().contains("<img"));
        }
    }

    #[test]
    fn test_detail_page_selects_current_status() {
        let unit = FleetStore::seeded(vec![]).get_by_id(2).unwrap();
        let page = unit_detail_page(&unit).unwrap();
        assert!(page.as_str().contains(r#"<option value="Maintenance" selected>"#));
        assert!(page.as_str().contains(r#"<option value="Active" >"#));
    }

    #[test]
    fn test_dashboard_counts() {
        let units = FleetStore::seeded(vec![]).list();
        let page = dashboard_page(&units, &summarize(&units)).unwrap();
        assert!(page.as_str().contains("Total units: <strong>3</strong>"));
        assert!(page.as_str().contains("Active: <strong>2</strong>"));
    }
}
