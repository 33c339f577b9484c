//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El store vive aquí, no en un global.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{FleetStore, SharedStore};
use crate::services::auth_service::{seed_admin_user, AuthService, StoreCredentialChecker};
use crate::services::jwt_service::{JwtConfig, JwtService};
use crate::utils::errors::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: SharedStore,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: SharedStore) -> Result<Self, AppError> {
        let jwt_service = JwtService::new(JwtConfig::try_from(&config)?);
        let checker = Arc::new(StoreCredentialChecker::new(store.clone()));
        let auth = Arc::new(AuthService::new(jwt_service, store.clone(), checker));

        Ok(Self {
            config,
            store,
            auth,
        })
    }

    /// Estado inicial: unidades sembradas y, si hay contraseña configurada, el admin
    pub fn from_config(config: EnvironmentConfig) -> Result<Self, AppError> {
        let users = match &config.admin_password {
            Some(password) => {
                let admin = seed_admin_user(&config.admin_username, password, config.bcrypt_cost)?;
                tracing::info!("👤 Usuario '{}' sembrado", admin.username);
                vec![admin]
            }
            None => {
                tracing::warn!(
                    "⚠️ FLEET_ADMIN_PASSWORD no configurada: el login queda deshabilitado"
                );
                Vec::new()
            }
        };

        let store = FleetStore::seeded(users).into_shared();
        Self::new(config, store)
    }
}
