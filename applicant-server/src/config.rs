//! Database connection settings
//!
//! Read from the process environment (`DB_HOST`, `DB_USER`, `DB_PWD`,
//! `DB_NAME`, `DB_PORT`, `DB_MAX_CONNECTIONS`) and translated into sqlx
//! connect options. No other logic lives here.

use std::fmt;

use sqlx::postgres::PgConnectOptions;

/// Default PostgreSQL port.
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Default maximum connections for the pool.
/// Kept low; every handler holds a connection for one statement only.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection settings for the `users` database.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            user: "postgres".to_string(),
            password: None,
            database: "postgres".to_string(),
            port: DEFAULT_DB_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DbConfig {
    /// Load settings from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    ///
    /// Empty values count as unset. Unparsable numbers fall back to the
    /// default with a warning instead of failing startup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            host: get("DB_HOST").unwrap_or(defaults.host),
            user: get("DB_USER").unwrap_or(defaults.user),
            password: get("DB_PWD"),
            database: get("DB_NAME").unwrap_or(defaults.database),
            port: parse_or("DB_PORT", get("DB_PORT"), defaults.port),
            max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                get("DB_MAX_CONNECTIONS"),
                defaults.max_connections,
            ),
        }
    }

    /// Translate into sqlx connect options.
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);

        match &self.password {
            Some(password) => options.password(password),
            None => options,
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + fmt::Display,
{
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(%key, %value, %default, "invalid value, using default");
            default
        }),
        None => default,
    }
}

// Password stays out of logs.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database", &self.database)
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = DbConfig::from_lookup(lookup(&[]));
        assert_eq!(config, DbConfig::default());
        assert_eq!(config.port, 5432);
        assert!(config.password.is_none());
    }

    #[test]
    fn reads_all_keys() {
        let config = DbConfig::from_lookup(lookup(&[
            ("DB_HOST", "db.internal"),
            ("DB_USER", "app"),
            ("DB_PWD", "secret"),
            ("DB_NAME", "applicants"),
            ("DB_PORT", "6543"),
            ("DB_MAX_CONNECTIONS", "12"),
        ]));

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.user, "app");
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.database, "applicants");
        assert_eq!(config.port, 6543);
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn bad_port_falls_back() {
        let config = DbConfig::from_lookup(lookup(&[("DB_PORT", "not-a-port")]));
        assert_eq!(config.port, DEFAULT_DB_PORT);
    }

    #[test]
    fn empty_values_are_unset() {
        let config = DbConfig::from_lookup(lookup(&[("DB_HOST", "  "), ("DB_PWD", "")]));
        assert_eq!(config.host, "localhost");
        assert!(config.password.is_none());
    }

    #[test]
    fn debug_redacts_password() {
        let config = DbConfig {
            password: Some("hunter2".into()),
            ..DbConfig::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("***"));
    }

    #[test]
    fn connect_options_carry_settings() {
        let config = DbConfig {
            host: "example.org".into(),
            port: 6000,
            database: "people".into(),
            ..DbConfig::default()
        };
        let options = config.connect_options();
        assert_eq!(options.get_host(), "example.org");
        assert_eq!(options.get_port(), 6000);
        assert_eq!(options.get_database(), Some("people"));
    }
}
