//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_GEOCODING_TIMEOUT_SECS, DEFAULT_JWT_ALGORITHM,
    DEFAULT_JWT_EXPIRATION_MINUTES, DEFAULT_MAPQUEST_API_KEY, DEFAULT_MAPQUEST_BASE_URL,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub jwt_expiration_minutes: i64,
    pub server_host: String,
    pub server_port: u16,
    mapquest_api_key: String,
    pub mapquest_base_url: String,
    pub geocoding_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("mapquest_api_key", &"[REDACTED]")
            .field("mapquest_base_url", &self.mapquest_base_url)
            .field("geocoding_timeout", &self.geocoding_timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET_KEY is not set in a release build or is too short,
    /// or if JWT_ALGORITHM is not an HMAC algorithm.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET_KEY").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("JWT_SECRET_KEY not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("JWT_SECRET_KEY environment variable must be set in production");
            }
        });

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET_KEY must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        let algorithm_name =
            env::var("JWT_ALGORITHM").unwrap_or_else(|_| DEFAULT_JWT_ALGORITHM.to_string());
        let jwt_algorithm = parse_hmac_algorithm(&algorithm_name)
            .unwrap_or_else(|| panic!("Unsupported JWT_ALGORITHM: {}", algorithm_name));

        let mapquest_api_key = env::var("MAPQUEST_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("MAPQUEST_API_KEY not set, address lookups will likely fail");
            DEFAULT_MAPQUEST_API_KEY.to_string()
        });

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_algorithm,
            jwt_expiration_minutes: env::var("JWT_TOKEN_EXPIRE_MIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_MINUTES),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            mapquest_api_key,
            mapquest_base_url: env::var("MAPQUEST_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_MAPQUEST_BASE_URL.to_string()),
            geocoding_timeout: Duration::from_secs(
                env::var("GEOCODING_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_GEOCODING_TIMEOUT_SECS),
            ),
        }
    }

    /// Build a configuration for tests and embedded use without touching the
    /// process environment.
    pub fn for_testing(jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: jwt_secret.into(),
            jwt_algorithm: Algorithm::HS256,
            jwt_expiration_minutes: DEFAULT_JWT_EXPIRATION_MINUTES,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            mapquest_api_key: DEFAULT_MAPQUEST_API_KEY.to_string(),
            mapquest_base_url: DEFAULT_MAPQUEST_BASE_URL.to_string(),
            geocoding_timeout: Duration::from_secs(DEFAULT_GEOCODING_TIMEOUT_SECS),
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// MapQuest API key.
    pub fn mapquest_api_key(&self) -> &str {
        &self.mapquest_api_key
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Only shared-secret algorithms make sense with a single secret key.
fn parse_hmac_algorithm(name: &str) -> Option<Algorithm> {
    match Algorithm::from_str(name).ok()? {
        alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) => Some(alg),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hmac_algorithm() {
        assert_eq!(parse_hmac_algorithm("HS256"), Some(Algorithm::HS256));
        assert_eq!(parse_hmac_algorithm("HS512"), Some(Algorithm::HS512));
        assert_eq!(parse_hmac_algorithm("RS256"), None);
        assert_eq!(parse_hmac_algorithm("nope"), None);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::for_testing("super-secret-key-that-is-long-enough");
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
