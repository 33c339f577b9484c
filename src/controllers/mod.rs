pub mod unit_controller;

pub use unit_controller::UnitController;
