//! Subcommands and the flags they share

pub mod probe;
pub mod serve;

use applicant_server::DbConfig;
use clap::Args;

/// Database flags. Each one overrides the matching `DB_*` variable.
#[derive(Args, Debug, Default)]
pub struct DbArgs {
    /// Database host (env: DB_HOST, default: localhost)
    #[arg(long)]
    pub db_host: Option<String>,

    /// Database user (env: DB_USER, default: postgres)
    #[arg(long)]
    pub db_user: Option<String>,

    /// Database password (env: DB_PWD)
    #[arg(long)]
    pub db_password: Option<String>,

    /// Database name (env: DB_NAME, default: postgres)
    #[arg(long)]
    pub db_name: Option<String>,

    /// Database port (env: DB_PORT, default: 5432)
    #[arg(long)]
    pub db_port: Option<u16>,

    /// Maximum pooled connections (env: DB_MAX_CONNECTIONS, default: 5)
    #[arg(long)]
    pub max_connections: Option<u32>,
}

impl DbArgs {
    /// Overlay flags on top of an environment-derived config.
    pub fn overlay(self, mut config: DbConfig) -> DbConfig {
        if let Some(host) = self.db_host {
            config.host = host;
        }
        if let Some(user) = self.db_user {
            config.user = user;
        }
        if let Some(password) = self.db_password {
            config.password = Some(password);
        }
        if let Some(name) = self.db_name {
            config.database = name;
        }
        if let Some(port) = self.db_port {
            config.port = port;
        }
        if let Some(max) = self.max_connections {
            config.max_connections = max;
        }
        config
    }

    /// Resolve against the process environment.
    pub fn into_config(self) -> DbConfig {
        self.overlay(DbConfig::from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_env_values() {
        let base = DbConfig {
            host: "env-host".into(),
            port: 6000,
            ..DbConfig::default()
        };
        let args = DbArgs {
            db_host: Some("flag-host".into()),
            db_password: Some("pw".into()),
            ..DbArgs::default()
        };

        let config = args.overlay(base);
        assert_eq!(config.host, "flag-host");
        assert_eq!(config.port, 6000);
        assert_eq!(config.password.as_deref(), Some("pw"));
    }

    #[test]
    fn no_flags_keep_base() {
        let base = DbConfig::default();
        assert_eq!(DbArgs::default().overlay(base.clone()), base);
    }
}
