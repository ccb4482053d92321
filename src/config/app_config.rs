use crate::error::{AppError, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub auth: AuthConfig,
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

// Keeps the signing secret out of debug output.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PolicyConfig {
    /// When set, deleting a category also requires a seller link to it.
    pub enforce_category_delete_ownership: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("PORT", "3000")?,
                max_body_size: parse_var("MAX_BODY_SIZE", "10485760")?,
            },
            database: DatabaseConfig {
                url: env::var("DB_URL")?,
                max_connections: parse_var("DB_MAX_CONNECTIONS", "20")?,
            },
            cors: CorsConfig {
                allowed_origins: split_origins(&env::var("FRONTEND_URL")?),
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET")
                    .map_err(|_| AppError::ConfigError("JWT_SECRET not set".to_string()))?,
                token_ttl_hours: parse_var("JWT_TTL_HOURS", "168")?,
            },
            policy: PolicyConfig {
                enforce_category_delete_ownership: parse_var(
                    "ENFORCE_CATEGORY_DELETE_OWNERSHIP",
                    "false",
                )?,
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: &str) -> Result<T> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .trim()
        .parse()
        .map_err(|_| AppError::ConfigError(format!("Invalid {} value", name)))
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims_origins() {
        assert_eq!(
            split_origins("http://localhost:5173, https://shop.example.com ,"),
            vec![
                "http://localhost:5173".to_string(),
                "https://shop.example.com".to_string()
            ]
        );
    }

    #[test]
    fn debug_output_redacts_secret() {
        let auth = AuthConfig {
            jwt_secret: "hunter2".to_string(),
            token_ttl_hours: 1,
        };

        let rendered = format!("{:?}", auth);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn server_address_joins_host_and_port() {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                max_body_size: 1024,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/market".to_string(),
                max_connections: 1,
            },
            cors: CorsConfig {
                allowed_origins: vec![],
            },
            auth: AuthConfig {
                jwt_secret: "secret".to_string(),
                token_ttl_hours: 1,
            },
            policy: PolicyConfig::default(),
        };

        assert_eq!(config.server_address(), "127.0.0.1:8080");
    }
}
