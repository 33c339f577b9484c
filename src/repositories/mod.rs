pub mod fleet_repository;

pub use fleet_repository::{FleetStore, SharedStore};
