use anyhow::{Context, Result, anyhow};
use sqlx::mysql::MySqlConnectOptions;
use std::fmt;
use std::str::FromStr;

#[derive(Clone)]
pub struct Config {
    // Database
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_max_connections: u32,

    // Listener
    pub host: String,
    pub port: u16,
    pub port_attempts: u16,

    pub api_prefix: String,
    pub rate_limit_per_min: u32, // 0 disables the limiter

    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source, so tests can skip the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            non_blank(&lookup, key).ok_or_else(|| anyhow!("{} must be set", key))
        };

        Ok(Self {
            db_host: non_blank(&lookup, "DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            db_port: parse_or(&lookup, "DB_PORT", 3306)?,
            db_user: required("DB_USER")?,
            db_password: lookup("DB_PASSWORD").unwrap_or_default(),
            db_name: required("DB_NAME")?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,

            host: non_blank(&lookup, "HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            port_attempts: parse_or(&lookup, "PORT_ATTEMPTS", 10)?,

            api_prefix: non_blank(&lookup, "API_PREFIX").unwrap_or_else(|| "/api".to_string()),
            rate_limit_per_min: parse_or(&lookup, "RATE_LIMIT_PER_MIN", 0)?,

            log_dir: non_blank(&lookup, "LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            log_level: parse_or(&lookup, "LOG_LEVEL", tracing::Level::INFO)?,
        })
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
    }
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .field("db_name", &self.db_name)
            .field("db_max_connections", &self.db_max_connections)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("port_attempts", &self.port_attempts)
            .field("api_prefix", &self.api_prefix)
            .field("rate_limit_per_min", &self.rate_limit_per_min)
            .field("log_dir", &self.log_dir)
            .field("log_level", &self.log_level)
            .finish()
    }
}
