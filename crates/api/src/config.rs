//! Process configuration, read from environment variables.

use std::net::SocketAddr;

use chrono::Duration;
use thiserror::Error;

use shopfront_observability::LogFormat;

/// Secret used when `JWT_SECRET` is unset. Never use outside local development.
pub const DEV_JWT_SECRET: &str = "dev-secret";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

#[derive(Clone)]
pub struct ApiConfig {
    /// `BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `JWT_SECRET`
    pub jwt_secret: String,
    /// `TOKEN_TTL_SECS`: lifetime of tokens minted by `mint-token`.
    pub token_ttl: Duration,
    /// `DATABASE_URL`: Postgres storage when set, in-memory otherwise.
    pub database_url: Option<String>,
    /// `LOG_FORMAT`
    pub log_format: LogFormat,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test fixtures).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("BIND_ADDR", e.to_string()))?;

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(s) if s.is_empty() => {
                return Err(ConfigError::invalid("JWT_SECRET", "must not be empty"));
            }
            Some(s) => s,
            None => DEV_JWT_SECRET.to_string(),
        };

        let token_ttl = match lookup("TOKEN_TTL_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| ConfigError::invalid("TOKEN_TTL_SECS", e.to_string()))?;
                if secs <= 0 {
                    return Err(ConfigError::invalid("TOKEN_TTL_SECS", "must be positive"));
                }
                Duration::try_seconds(secs)
                    .ok_or_else(|| ConfigError::invalid("TOKEN_TTL_SECS", "out of range"))?
            }
            None => Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|reason| ConfigError::invalid("LOG_FORMAT", reason))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            token_ttl,
            database_url,
            log_format,
        })
    }

    /// Defaults with the given secret and in-memory storage.
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Self::defaults()
        }
    }

    fn defaults() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
            database_url: None,
            log_format: LogFormat::default(),
        }
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

impl core::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("log_format", &self.log_format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert!(config.uses_dev_secret());
        assert_eq!(config.token_ttl, Duration::hours(1));
        assert_eq!(config.database_url, None);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn reads_every_key() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("JWT_SECRET", "s3cret"),
            ("TOKEN_TTL_SECS", "60"),
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("LOG_FORMAT", "pretty"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.jwt_secret, "s3cret");
        assert!(!config.uses_dev_secret());
        assert_eq!(config.token_ttl, Duration::seconds(60));
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/shop"));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_bad_values() {
        let cases: [(&str, &str, &str); 5] = [
            ("BIND_ADDR", "nowhere", "BIND_ADDR"),
            ("TOKEN_TTL_SECS", "soon", "TOKEN_TTL_SECS"),
            ("TOKEN_TTL_SECS", "0", "TOKEN_TTL_SECS"),
            ("JWT_SECRET", "", "JWT_SECRET"),
            ("LOG_FORMAT", "xml", "LOG_FORMAT"),
        ];
        for (key, value, expected) in cases {
            match ApiConfig::from_lookup(lookup(&[(key, value)])) {
                Err(ConfigError::Invalid { key, .. }) => assert_eq!(key, expected),
                Ok(_) => panic!("{key}={value:?} should be rejected"),
            }
        }
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        let config = ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let rendered = format!("{:?}", ApiConfig::with_secret("top-secret"));
        assert!(!rendered.contains("top-secret"));
    }
}
