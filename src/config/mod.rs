//! Configuración del proyecto
//!
//! Este módulo contiene la configuración cargada de variables de entorno.

pub mod environment;

pub use environment::*;
