use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap},
    routing::{get, post},
    Json, Router,
};

use crate::models::auth::{LoginRequest, LoginResponse, TokenIdentity};
use crate::routes::api_routes::api_not_found;
use crate::services::jwt_service::extract_token_from_header;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

/// Configura las rutas de autenticación
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login).fallback(api_not_found))
        .route("/verify", get(verify).fallback(api_not_found))
}

/// Endpoint de login
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(request) =
        payload.map_err(|_| bad_request_error("Body must be JSON with username and password"))?;

    let response = state.auth.login(&request.username, &request.password).await?;
    Ok(Json(response))
}

/// Devuelve la identidad contenida en el token Bearer
async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenIdentity>, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization header required".to_string()))?;

    let token = extract_token_from_header(header)?;
    Ok(Json(state.auth.verify_token(token)?))
}
