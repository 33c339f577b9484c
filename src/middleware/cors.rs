//! Middleware de CORS
//!
//! Este módulo maneja la configuración de CORS para permitir
//! requests desde diferentes orígenes.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::EnvironmentConfig;

/// CORS según la configuración: orígenes explícitos, permisivo en desarrollo,
/// y sin orígenes cruzados en cualquier otro caso
pub fn cors_layer(config: &EnvironmentConfig) -> CorsLayer {
    if !config.cors_origins.is_empty() {
        cors_middleware_with_origins(&config.cors_origins)
    } else if config.is_development() {
        CorsLayer::very_permissive()
    } else {
        CorsLayer::new()
    }
}

/// Crear middleware de CORS con orígenes específicos
pub fn cors_middleware_with_origins(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
        ])
        .max_age(std::time::Duration::from_secs(3600))
}
