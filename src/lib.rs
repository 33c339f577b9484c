//! Robot Fleet Dashboard
//!
//! Servicio web con un store en memoria de unidades de la flota, vistas HTML
//! con escape por defecto, API JSON y emisión de tokens firmados.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;

pub use routes::create_router;
pub use state::AppState;
