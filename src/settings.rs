//! Runtime settings from environment variables (a `.env` file is loaded by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://inventory.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Operator account for the login endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminCredentials {
    /// bcrypt hash supplied directly (`ADMIN_PASSWORD_HASH`).
    Hashed { username: String, password_hash: String },
    /// Plain password (`ADMIN_PASSWORD`), hashed at startup.
    Plain { username: String, password: String },
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
    pub auto_migrate: bool,
    pub admin: Option<AdminCredentials>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e| ConfigError::InvalidSetting {
            key: "BIND_ADDR",
            message: format!("{bind_raw}: {e}"),
        })?;

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty() && *s != "*")
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let auto_migrate = match get("AUTO_MIGRATE") {
            None => true,
            Some(v) => parse_bool(&v).ok_or_else(|| ConfigError::InvalidSetting {
                key: "AUTO_MIGRATE",
                message: format!("expected true/false, got {v}"),
            })?,
        };

        let admin = match (get("ADMIN_USERNAME"), get("ADMIN_PASSWORD_HASH"), get("ADMIN_PASSWORD")) {
            (None, None, None) => None,
            (Some(username), Some(password_hash), _) => Some(AdminCredentials::Hashed { username, password_hash }),
            (Some(username), None, Some(password)) => Some(AdminCredentials::Plain { username, password }),
            (Some(_), None, None) => {
                return Err(ConfigError::InvalidSetting {
                    key: "ADMIN_USERNAME",
                    message: "set ADMIN_PASSWORD_HASH or ADMIN_PASSWORD as well".into(),
                })
            }
            (None, _, _) => {
                return Err(ConfigError::InvalidSetting {
                    key: "ADMIN_USERNAME",
                    message: "required when an admin password is set".into(),
                })
            }
        };

        Ok(Settings {
            database_url,
            bind_addr,
            cors_allowed_origins,
            auto_migrate,
            admin,
        })
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
