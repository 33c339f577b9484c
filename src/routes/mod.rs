//! Router HTTP
//!
//! Páginas HTML en la raíz y API JSON bajo `/api`. Rutas o métodos sin
//! handler responden 404. Toda respuesta lleva las cabeceras de seguridad.

pub mod api_routes;
pub mod auth_routes;
pub mod unit_routes;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::middleware::security_headers::security_header_layers;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    let mut router = Router::new()
        .merge(unit_routes::create_unit_router())
        .nest("/api", api_routes::create_api_router())
        .fallback(unit_routes::page_not_found);

    for layer in security_header_layers() {
        router = router.layer(layer);
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
