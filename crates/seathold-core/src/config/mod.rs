//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and environment variables. Each sub-module represents a
//! logical configuration section.

pub mod app;
pub mod logging;
pub mod seats;
pub mod sweeper;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::logging::LoggingConfig;
pub use self::seats::SeatsConfig;
pub use self::sweeper::SweeperConfig;

use crate::error::AppError;
use crate::result::AppResult;

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (default.toml + environment overlay + `SEATHOLD__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Seat inventory and lock TTL settings.
    #[serde(default)]
    pub seats: SeatsConfig,
    /// Expired-lock sweeper settings.
    #[serde(default)]
    pub sweeper: SweeperConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default`, `config/{env}` and environment variables
    /// such as `SEATHOLD__SEATS__TOTAL=200`. Missing files are skipped.
    pub fn load(env: &str) -> AppResult<Self> {
        Self::load_from("config", env)
    }

    /// Load configuration from an explicit directory.
    pub fn load_from(dir: &str, env: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SEATHOLD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the lock manager cannot operate with.
    pub fn validate(&self) -> AppResult<()> {
        if self.seats.total == 0 {
            return Err(AppError::configuration("seats.total must be at least 1"));
        }
        if self.seats.default_ttl_ms == 0 {
            return Err(AppError::configuration(
                "seats.default_ttl_ms must be at least 1",
            ));
        }
        if self.seats.default_ttl_ms > self.seats.max_ttl_ms {
            return Err(AppError::configuration(format!(
                "seats.default_ttl_ms ({}) exceeds seats.max_ttl_ms ({})",
                self.seats.default_ttl_ms, self.seats.max_ttl_ms
            )));
        }
        if self.sweeper.interval_ms == 0 {
            return Err(AppError::configuration(
                "sweeper.interval_ms must be at least 1",
            ));
        }
        Ok(())
    }
}
