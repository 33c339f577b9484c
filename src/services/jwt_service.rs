use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::environment::EnvironmentConfig;
use crate::models::auth::{JwtClaims, TokenIdentity};
use crate::models::User;
use crate::utils::errors::AppError;

/// Configuración JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub access_token_duration: Duration,
}

impl TryFrom<&EnvironmentConfig> for JwtConfig {
    type Error = AppError;

    fn try_from(config: &EnvironmentConfig) -> Result<Self, Self::Error> {
        let access_token_duration = i64::try_from(config.jwt_expiration)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                AppError::Config(format!(
                    "JWT_EXPIRATION out of range: {}",
                    config.jwt_expiration
                ))
            })?;

        Ok(Self {
            secret: config.jwt_secret.clone(),
            algorithm: Algorithm::HS256,
            access_token_duration,
        })
    }
}

/// Servicio JWT
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_ref());
        let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Segundos de vida de cada token emitido
    pub fn expires_in(&self) -> u64 {
        self.config.access_token_duration.num_seconds().max(0) as u64
    }

    /// Genera un token de acceso
    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.config.access_token_duration)
            .ok_or_else(|| AppError::Jwt("Token expiration out of range".to_string()))?;

        let claims = JwtClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Jwt(format!("Error generating access token: {}", e)))
    }

    /// Valida y decodifica un token
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, AppError> {
        let validation = Validation::new(self.config.algorithm);

        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Jwt(format!("Invalid token: {}", e)))
    }

    /// Identidad del usuario contenida en un token válido
    pub fn verify_token(&self, token: &str) -> Result<TokenIdentity, AppError> {
        let claims = self.validate_token(token)?;
        let user_id = claims
            .sub
            .parse::<u32>()
            .map_err(|_| AppError::Jwt("Invalid subject in token".to_string()))?;

        Ok(TokenIdentity {
            user_id,
            username: claims.username,
        })
    }
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            AppError::Unauthorized("Authorization header must start with 'Bearer '".to_string())
        })?;

    if token.trim().is_empty() {
        return Err(AppError::Unauthorized("Token cannot be empty".to_string()));
    }

    Ok(token.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    const SECRET: &str = "test-secret-that-is-long-enough-1234";

    fn service(secret: &str, seconds: i64) -> JwtService {
        JwtService::new(JwtConfig {
            secret: secret.to_string(),
            algorithm: Algorithm::HS256,
            access_token_duration: Duration::seconds(seconds),
        })
    }

    fn user() -> User {
        User {
            id: 1,
            username: "admin".to_string(),
            password_hash: String::new(),
            role: UserRole::Administrator,
        }
    }

    #[test]
    fn test_issue_and_verify_token() {
        let jwt_service = service(SECRET, 3600);
        let token = jwt_service.issue_token(&user()).unwrap();

        let identity = jwt_service.verify_token(&token).unwrap();
        assert_eq!(identity.user_id, 1);
        assert_eq!(identity.username, "admin");

        let claims = jwt_service.validate_token(&token).unwrap();
        assert_eq!(claims.role, "Administrator");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let jwt_service = service(SECRET, 3600);
        let token = jwt_service.issue_token(&user()).unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let first = parts[2].remove(0);
        parts[2].insert(0, if first == 'A' { 'B' } else { 'A' });
        let tampered = parts.join(".");

        let mut forged = token.split('.').map(str::to_string).collect::<Vec<_>>();
        forged[1] = parts[0].clone();
        assert!(jwt_service.verify_token(&forged.join(".")).is_err());

        assert!(jwt_service.verify_token(&tampered).is_err());
        assert!(jwt_service.verify_token("not.a.token").is_err());
    }

    #[test]
    fn test_foreign_secret_is_rejected() {
        let token = service(SECRET, 3600).issue_token(&user()).unwrap();
        let other = service("another-secret-that-is-long-enough-99", 3600);
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // jsonwebtoken aplica 60s de leeway por defecto
        let jwt_service = service(SECRET, -120);
        let token = jwt_service.issue_token(&user()).unwrap();
        assert!(jwt_service.verify_token(&token).is_err());
    }

    #[test]
    fn test_config_rejects_unrepresentable_expiration() {
        let mut config = EnvironmentConfig::with_secret(SECRET);
        config.jwt_expiration = u64::MAX;
        assert!(matches!(JwtConfig::try_from(&config), Err(AppError::Config(_))));

        config.jwt_expiration = 9_300_000_000_000_000;
        assert!(matches!(JwtConfig::try_from(&config), Err(AppError::Config(_))));

        config.jwt_expiration = 7200;
        let jwt_config = JwtConfig::try_from(&config).unwrap();
        assert_eq!(JwtService::new(jwt_config).expires_in(), 7200);
    }

    #[test]
    fn test_issue_token_fails_when_expiration_overflows() {
        let jwt_service = JwtService::new(JwtConfig {
            secret: SECRET.to_string(),
            algorithm: Algorithm::HS256,
            access_token_duration: Duration::try_days(100_000_000).unwrap(),
        });
        assert!(matches!(jwt_service.issue_token(&user()), Err(AppError::Jwt(_))));
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(extract_token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(extract_token_from_header("Basic abc").is_err());
        assert!(extract_token_from_header("Bearer ").is_err());
    }
}
