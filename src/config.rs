//! Environment-driven configuration.
//!
//! The binary loads a `.env` file with `dotenvy` before calling
//! [`Config::from_env`]. Tests build a [`Config`] from a closure instead.

use std::{env, net::SocketAddr, str::FromStr, time::Duration};

use sea_orm::ConnectOptions;

/// Longest accepted token lifetime, ten years. Anything past this pushes the
/// session expiry out of the range the timestamp columns can hold.
pub const MAX_JWT_EXPIRES_IN_SECS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// JWT signing settings.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of an issued token.
    pub expires_in: Duration,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Connection pool settings applied through [`ConnectOptions`].
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    /// Pool settings for `sea_orm::Database::connect`.
    pub fn connect_options(&self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url.clone());
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .acquire_timeout(self.connect_timeout)
            .sqlx_logging(false);
        opt
    }
}

/// Everything the server binary needs to start.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    /// Refuse a login while the user already holds a live session.
    pub single_session: bool,
    /// Reject stored passwords that match none of the legacy encodings
    /// instead of letting them through unchecked.
    pub strict_password_formats: bool,
    /// How often stale logged-in rows are swept. `None` disables the sweep.
    pub session_sweep_interval: Option<Duration>,
}

impl Config {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, applying defaults for
    /// optional keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let sweep_secs: u64 = parse_or(&lookup, "SESSION_SWEEP_INTERVAL_SECS", 0)?;

        let expires_in_secs: u64 = parse_or(&lookup, "JWT_EXPIRES_IN_SECS", 3600)?;
        if expires_in_secs > MAX_JWT_EXPIRES_IN_SECS {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRES_IN_SECS",
                value: expires_in_secs.to_string(),
            });
        }

        Ok(Self {
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
                min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 2)?,
                connect_timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "DB_CONNECT_TIMEOUT_SECS",
                    10,
                )?),
            },
            jwt: JwtConfig {
                secret: required("JWT_SECRET")?,
                expires_in: Duration::from_secs(expires_in_secs),
            },
            single_session: parse_flag(&lookup, "AUTH_SINGLE_SESSION")?,
            strict_password_formats: parse_flag(&lookup, "AUTH_STRICT_PASSWORD_FORMATS")?,
            session_sweep_interval: (sweep_secs > 0).then(|| Duration::from_secs(sweep_secs)),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        _ => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, key: &'static str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some("1" | "true" | "TRUE" | "on" | "ON" | "yes") => Ok(true),
        Some("0" | "false" | "FALSE" | "off" | "OFF" | "no") => Ok(false),
        Some(other) => Err(ConfigError::Invalid {
            key,
            value: other.to_string(),
        }),
    }
}
