//! Vistas HTML
//!
//! Renderizador con escape por defecto y las páginas del dashboard.

pub mod pages;
pub mod renderer;

pub use pages::HtmlError;
pub use renderer::{render, Context, Html};
