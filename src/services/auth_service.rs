//! Servicio de autenticación
//!
//! Emite tokens firmados para un usuario. La verificación de credenciales
//! se delega a un `CredentialChecker`.

use async_trait::async_trait;
use bcrypt::{hash, verify};
use std::sync::Arc;

use crate::models::auth::{LoginResponse, TokenIdentity};
use crate::models::{User, UserRole};
use crate::repositories::SharedStore;
use crate::services::jwt_service::JwtService;
use crate::utils::errors::AppError;

/// Colaborador externo que decide si unas credenciales son válidas
#[async_trait]
pub trait CredentialChecker: Send + Sync {
    async fn check_credentials(&self, username: &str, password: &str) -> bool;
}

/// Verifica contra los hashes bcrypt de los usuarios del store
pub struct StoreCredentialChecker {
    store: SharedStore,
}

impl StoreCredentialChecker {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CredentialChecker for StoreCredentialChecker {
    async fn check_credentials(&self, username: &str, password: &str) -> bool {
        let user = self.store.read().await.find_user(username);
        let Some(user) = user else {
            return false;
        };

        let password = password.to_string();
        let password_hash = user.password_hash;
        tokio::task::spawn_blocking(move || verify(password, &password_hash).unwrap_or(false))
            .await
            .unwrap_or(false)
    }
}

/// Crea el usuario administrador sembrado con su hash bcrypt
pub fn seed_admin_user(username: &str, password: &str, cost: u32) -> Result<User, AppError> {
    let password_hash = hash(password, cost)
        .map_err(|e| AppError::Hash(format!("Error hashing seed password: {}", e)))?;

    Ok(User {
        id: 1,
        username: username.to_string(),
        password_hash,
        role: UserRole::Administrator,
    })
}

pub struct AuthService {
    jwt_service: JwtService,
    store: SharedStore,
    credentials: Arc<dyn CredentialChecker>,
}

impl AuthService {
    pub fn new(
        jwt_service: JwtService,
        store: SharedStore,
        credentials: Arc<dyn CredentialChecker>,
    ) -> Self {
        Self {
            jwt_service,
            store,
            credentials,
        }
    }

    /// Emite un token para un usuario existente
    pub async fn issue_token(&self, username: &str) -> Result<String, AppError> {
        let user = self
            .store
            .read()
            .await
            .find_user(username)
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        self.jwt_service.issue_token(&user)
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenIdentity, AppError> {
        self.jwt_service.verify_token(token)
    }

    /// Comprueba credenciales y, si son válidas, emite el token
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AppError> {
        if !self.credentials.check_credentials(username, password).await {
            tracing::warn!("🔒 Login rechazado para '{}'", username);
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = self.issue_token(username).await?;
        tracing::info!("✅ Token emitido para '{}'", username);

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.expires_in(),
        })
    }
}
