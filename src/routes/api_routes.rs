use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::UnitController;
use crate::models::FleetUnit;
use crate::routes::auth_routes::create_auth_router;
use crate::services::fleet_health_service::FleetHealthSummary;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check).fallback(api_not_found))
        .route("/units", get(list_units).fallback(api_not_found))
        .route("/units/:id", get(get_unit).fallback(api_not_found))
        .route("/fleet/health", get(fleet_health).fallback(api_not_found))
        .nest("/auth", create_auth_router())
        .fallback(api_not_found)
}

/// Endpoint de salud simple
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn list_units(State(state): State<AppState>) -> Json<Vec<FleetUnit>> {
    let controller = UnitController::new(state.store.clone());
    Json(controller.list().await)
}

async fn get_unit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FleetUnit>, AppError> {
    let controller = UnitController::new(state.store.clone());
    Ok(Json(controller.get_by_id(&id).await?))
}

async fn fleet_health(State(state): State<AppState>) -> Json<FleetHealthSummary> {
    let controller = UnitController::new(state.store.clone());
    Json(controller.health().await)
}

/// 404 genérico en formato JSON
pub async fn api_not_found() -> AppError {
    AppError::NotFound("No endpoint matches this request".to_string())
}
