//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos de la flota, los usuarios
//! y la autenticación.

pub mod auth;
pub mod fleet_unit;
pub mod user;

pub use fleet_unit::{FleetUnit, UnitStatus};
pub use user::{User, UserRole};
