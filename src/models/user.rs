//! Modelo de User
//!
//! Usuarios sembrados al arrancar; nunca se modifican después.

use serde::{Deserialize, Serialize};

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Administrator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Administrator => "Administrator",
        }
    }
}

/// Usuario con su hash bcrypt (nunca se serializa el hash hacia el cliente)
#[derive(Debug, Clone)]
pub struct User {
    pub id: u32,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
}
