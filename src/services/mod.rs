//! Servicios de negocio
//!
//! Autenticación, JWT y el resumen de salud de la flota.

pub mod auth_service;
pub mod fleet_health_service;
pub mod jwt_service;

pub use auth_service::{AuthService, CredentialChecker, StoreCredentialChecker};
pub use jwt_service::JwtService;
