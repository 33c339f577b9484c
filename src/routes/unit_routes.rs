use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Path, Request, State},
    http::header::CONTENT_TYPE,
    response::Redirect,
    routing::get,
    Form, Json, Router,
};
use serde_json::Value;

use crate::controllers::UnitController;
use crate::dto::unit_dto::FieldMap;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};
use crate::views::{Html, HtmlError};

pub fn create_unit_router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard).fallback(page_not_found))
        .route("/units", get(list_units).fallback(page_not_found))
        .route("/units/maintenance", get(maintenance).fallback(page_not_found))
        .route(
            "/units/:id",
            get(unit_detail).post(update_unit).fallback(page_not_found),
        )
}

/// Campos enviados por el cliente, como JSON o como formulario
pub struct UnitFields(pub FieldMap);

#[async_trait]
impl<S> FromRequest<S> for UnitFields
where
    S: Send + Sync,
{
    type Rejection = HtmlError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|_| bad_request_error("Body must be valid JSON"))?;

            match value {
                Value::Object(fields) => Ok(UnitFields(fields)),
                _ => Err(bad_request_error("Body must be a JSON object").into()),
            }
        } else {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|_| bad_request_error("Body must be form-encoded field/value pairs"))?;

            let fields = pairs
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect();
            Ok(UnitFields(fields))
        }
    }
}

async fn dashboard(State(state): State<AppState>) -> Result<Html, HtmlError> {
    let controller = UnitController::new(state.store.clone());
    Ok(controller.dashboard_page().await?)
}

async fn list_units(State(state): State<AppState>) -> Result<Html, HtmlError> {
    let controller = UnitController::new(state.store.clone());
    Ok(controller.units_page().await?)
}

async fn maintenance(State(state): State<AppState>) -> Result<Html, HtmlError> {
    let controller = UnitController::new(state.store.clone());
    Ok(controller.maintenance_page().await?)
}

async fn unit_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html, HtmlError> {
    let controller = UnitController::new(state.store.clone());
    Ok(controller.detail_page(&id).await?)
}

/// La unidad se busca antes de leer el cuerpo: un id desconocido es 404
/// aunque el cuerpo no se pueda interpretar.
async fn update_unit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Redirect, HtmlError> {
    let controller = UnitController::new(state.store.clone());
    controller.get_by_id(&id).await?;

    let UnitFields(fields) = UnitFields::from_request(request, &state).await?;
    let unit = controller.update(&id, fields).await?;
    Ok(Redirect::to(&format!("/units/{}", unit.id)))
}

/// 404 genérico para rutas y métodos de páginas que no existen
pub async fn page_not_found() -> HtmlError {
    HtmlError(AppError::NotFound("No page matches this request".to_string()))
}
