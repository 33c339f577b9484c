//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. El secreto de firma y el
//! puerto son lo único que el despliegue necesita aportar.

use std::env;

use crate::utils::errors::AppError;

/// Longitud mínima del secreto HS256
pub const MIN_SECRET_LEN: usize = 32;

/// Límites de coste que acepta bcrypt
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// Vida máxima de un token: un año
pub const MAX_JWT_EXPIRATION: u64 = 365 * 24 * 60 * 60;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub admin_username: String,
    pub admin_password: Option<String>,
    pub bcrypt_cost: u32,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde el entorno del proceso
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar la configuración desde una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .ok_or_else(|| AppError::Config("JWT_SECRET must be set".to_string()))?;

        let config = Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            jwt_secret,
            jwt_expiration: parse_or(&lookup, "JWT_EXPIRATION", 3600)?,
            cors_origins: lookup("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            admin_username: lookup("FLEET_ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string()),
            admin_password: lookup("FLEET_ADMIN_PASSWORD").filter(|p| !p.is_empty()),
            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Configuración mínima con un secreto dado (tests y herramientas)
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "127.0.0.1".to_string(),
            jwt_secret: jwt_secret.into(),
            jwt_expiration: 3600,
            cors_origins: Vec::new(),
            admin_username: "admin".to_string(),
            admin_password: None,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(AppError::Config(format!(
                "JWT_SECRET must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }
        if !(1..=MAX_JWT_EXPIRATION).contains(&self.jwt_expiration) {
            return Err(AppError::Config(format!(
                "JWT_EXPIRATION must be between 1 and {} seconds",
                MAX_JWT_EXPIRATION
            )));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(AppError::Config(format!(
                "BCRYPT_COST must be between {} and {}",
                MIN_BCRYPT_COST, MAX_BCRYPT_COST
            )));
        }
        Ok(())
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a valid number", key))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(vars: &[(&str, &str)]) -> Result<EnvironmentConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvironmentConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("JWT_SECRET", SECRET)]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.jwt_expiration, 3600);
        assert_eq!(config.admin_username, "admin");
        assert!(config.admin_password.is_none());
        assert!(config.cors_origins.is_empty());
        assert!(config.is_development());
    }

    #[test]
    fn test_secret_is_required() {
        assert!(matches!(load(&[]), Err(AppError::Config(_))));
        assert!(matches!(load(&[("JWT_SECRET", "short")]), Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(load(&[("JWT_SECRET", SECRET), ("PORT", "http")]).is_err());
        assert!(load(&[("JWT_SECRET", SECRET), ("BCRYPT_COST", "99")]).is_err());
    }

    #[test]
    fn test_jwt_expiration_bounds() {
        let max = MAX_JWT_EXPIRATION.to_string();
        let over = (MAX_JWT_EXPIRATION + 1).to_string();
        assert!(load(&[("JWT_SECRET", SECRET), ("JWT_EXPIRATION", &max)]).is_ok());

        let rejected = [
            "0",
            over.as_str(),
            "1000000000000000",
            "9300000000000000",
            "18446744073709551615",
        ];
        for value in rejected {
            let result = load(&[("JWT_SECRET", SECRET), ("JWT_EXPIRATION", value)]);
            assert!(
                matches!(result, Err(AppError::Config(_))),
                "JWT_EXPIRATION={} accepted",
                value
            );
        }
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        for value in ["4", "12", "31"] {
            let config = load(&[("JWT_SECRET", SECRET), ("BCRYPT_COST", value)]).unwrap();
            assert_eq!(config.bcrypt_cost.to_string(), value);
        }
        for value in ["0", "3", "32"] {
            let result = load(&[("JWT_SECRET", SECRET), ("BCRYPT_COST", value)]);
            assert!(matches!(result, Err(AppError::Config(_))), "BCRYPT_COST={} accepted", value);
        }
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("JWT_SECRET", SECRET),
            ("PORT", "8080"),
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "https://fleet.example.com, ,https://ops.example.com"),
            ("FLEET_ADMIN_PASSWORD", "s3cret-pass"),
        ])
        .unwrap();
        assert_eq!(config.server_url(), "0.0.0.0:8080");
        assert!(!config.is_development());
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.admin_password.as_deref(), Some("s3cret-pass"));
    }
}
