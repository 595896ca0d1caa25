//! Process configuration, read once from the environment at start-up.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::AppError;

/// Which service this process runs, with the peers it depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceConfig {
    /// Restaurants, menus and menu items. No peers.
    Restaurant,
    /// Tables; checks restaurants and waiters.
    Table {
        /// Base URL of the restaurant service.
        restaurant_url: String,
        /// Base URL of the waiter service.
        waiter_url: String,
    },
    /// Waiters; checks restaurants and tables.
    Waiter {
        /// Base URL of the restaurant service.
        restaurant_url: String,
        /// Base URL of the table service.
        table_url: String,
    },
    /// Orders; checks restaurants, tables, waiters and menu items.
    Order {
        /// Base URL of the restaurant service (restaurants and menu items).
        restaurant_url: String,
        /// Base URL of the table service.
        table_url: String,
        /// Base URL of the waiter service.
        waiter_url: String,
    },
}

impl ServiceConfig {
    /// Short service name, as given in `SABOR_SERVICE`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Table { .. } => "table",
            Self::Waiter { .. } => "waiter",
            Self::Order { .. } => "order",
        }
    }
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// The service to run.
    pub service: ServiceConfig,
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Connection pool size.
    pub max_connections: u32,
    /// Per-call timeout for lookups against peer services.
    pub remote_timeout: Duration,
    /// Apply pending migrations before serving.
    pub run_migrations: bool,
    /// OTLP collector endpoint; tracing export is off when unset.
    pub otlp_endpoint: Option<String>,
    /// Browser origins allowed by CORS. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} environment variable must be set")))
        };

        let service = match required("SABOR_SERVICE")?.as_str() {
            "restaurant" => ServiceConfig::Restaurant,
            "table" => ServiceConfig::Table {
                restaurant_url: required("RESTAURANT_SERVICE_URL")?,
                waiter_url: required("WAITER_SERVICE_URL")?,
            },
            "waiter" => ServiceConfig::Waiter {
                restaurant_url: required("RESTAURANT_SERVICE_URL")?,
                table_url: required("TABLE_SERVICE_URL")?,
            },
            "order" => ServiceConfig::Order {
                restaurant_url: required("RESTAURANT_SERVICE_URL")?,
                table_url: required("TABLE_SERVICE_URL")?,
                waiter_url: required("WAITER_SERVICE_URL")?,
            },
            other => {
                return Err(AppError::Config(format!(
                    "SABOR_SERVICE must be one of restaurant, table, waiter, order (got {other})"
                )));
            }
        };

        let port = parse_or(&lookup, "PORT", 3000_u16)?;
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10_u32)?;
        let timeout_ms = parse_or(&lookup, "REMOTE_TIMEOUT_MS", 5000_u64)?;
        let run_migrations = parse_or(&lookup, "RUN_MIGRATIONS", false)?;

        Ok(Self {
            service,
            database_url: required("DATABASE_URL")?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            max_connections,
            remote_timeout: Duration::from_millis(timeout_ms),
            run_migrations,
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty()),
            cors_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn bind_address(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<V>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: V) -> Result<V, AppError>
where
    V: std::str::FromStr,
    V::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_restaurant_service_uses_defaults() {
        // Arrange / Act
        let config = config_from(&[
            ("SABOR_SERVICE", "restaurant"),
            ("DATABASE_URL", "postgres://localhost/sabor"),
        ])
        .unwrap();

        // Assert
        assert_eq!(config.service, ServiceConfig::Restaurant);
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.remote_timeout, Duration::from_secs(5));
        assert!(!config.run_migrations);
        assert!(config.otlp_endpoint.is_none());
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.bind_address().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_order_service_collects_every_peer() {
        let config = config_from(&[
            ("SABOR_SERVICE", "order"),
            ("DATABASE_URL", "postgres://localhost/sabor"),
            ("RESTAURANT_SERVICE_URL", "http://restaurant:3000"),
            ("TABLE_SERVICE_URL", "http://table:3000"),
            ("WAITER_SERVICE_URL", "http://waiter:3000"),
            ("REMOTE_TIMEOUT_MS", "750"),
            ("RUN_MIGRATIONS", "true"),
        ])
        .unwrap();

        assert_eq!(
            config.service,
            ServiceConfig::Order {
                restaurant_url: "http://restaurant:3000".into(),
                table_url: "http://table:3000".into(),
                waiter_url: "http://waiter:3000".into(),
            }
        );
        assert_eq!(config.remote_timeout, Duration::from_millis(750));
        assert!(config.run_migrations);
    }

    #[test]
    fn test_table_service_without_waiter_url_is_rejected() {
        let result = config_from(&[
            ("SABOR_SERVICE", "table"),
            ("DATABASE_URL", "postgres://localhost/sabor"),
            ("RESTAURANT_SERVICE_URL", "http://restaurant:3000"),
        ]);

        match result {
            Err(AppError::Config(message)) => assert!(message.contains("WAITER_SERVICE_URL")),
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn test_cors_origins_are_comma_separated() {
        let config = config_from(&[
            ("SABOR_SERVICE", "restaurant"),
            ("DATABASE_URL", "postgres://localhost/sabor"),
            (
                "CORS_ALLOWED_ORIGINS",
                "https://app.sabor.example, https://admin.sabor.example,",
            ),
        ])
        .unwrap();

        assert_eq!(
            config.cors_origins,
            vec!["https://app.sabor.example", "https://admin.sabor.example"]
        );
    }

    #[test]
    fn test_unknown_service_is_rejected() {
        let result = config_from(&[
            ("SABOR_SERVICE", "kitchen"),
            ("DATABASE_URL", "postgres://localhost/sabor"),
        ]);

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_unparsable_port_is_rejected() {
        let result = config_from(&[
            ("SABOR_SERVICE", "restaurant"),
            ("DATABASE_URL", "postgres://localhost/sabor"),
            ("PORT", "eighty"),
        ]);

        assert!(matches!(result, Err(AppError::Config(message)) if message.starts_with("PORT")));
    }
}
