//! Service configuration.
//!
//! This module provides configuration for the core service, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MEDIVAULT_FRONTEND_BASE_URL` | http://localhost:5173 | Frontend base URL for setup links |
//! | `MEDIVAULT_SWEEP_INTERVAL_SECS` | 30 | Seconds between discharge sweeps |
//! | `MEDIVAULT_INVITATION_TTL_HOURS` | 72 | Default invitation lifetime |
//! | `MEDIVAULT_LOG_LEVEL` | info | Log level |
//!
//! # Example
//!
//! ```rust
//! use medivault_service::ServiceConfig;
//!
//! // Create from environment
//! let config = ServiceConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServiceConfig {
//!     sweep_interval_secs: 5,
//!     ..Default::default()
//! };
//! ```

use std::time::Duration;

use chrono::TimeDelta;
use clap::Parser;

use medivault_model::InviteToken;

/// Configuration for the core service.
///
/// This struct can be constructed from environment variables using
/// [`ServiceConfig::from_env`], from command line arguments using
/// [`ServiceConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "medivault")]
#[command(about = "Medivault core service")]
pub struct ServiceConfig {
    /// Base URL of the frontend hosting the account-setup page.
    #[arg(
        long,
        env = "MEDIVAULT_FRONTEND_BASE_URL",
        default_value = "http://localhost:5173"
    )]
    pub frontend_base_url: String,

    /// Seconds between discharge sweep passes.
    #[arg(long, env = "MEDIVAULT_SWEEP_INTERVAL_SECS", default_value = "30")]
    pub sweep_interval_secs: u64,

    /// Default invitation lifetime in hours, offered to issuers that do
    /// not pick their own TTL. An issuer may still pass no TTL at all, in
    /// which case the invitation never expires.
    #[arg(long, env = "MEDIVAULT_INVITATION_TTL_HOURS", default_value = "72")]
    pub invitation_ttl_hours: i64,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "MEDIVAULT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            frontend_base_url: "http://localhost:5173".to_string(),
            sweep_interval_secs: 30,
            invitation_ttl_hours: 72,
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Creates configuration from environment variables.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse().unwrap_or_default()
    }

    /// Creates a configuration suited to tests: short sweep interval and a
    /// recognizable frontend URL.
    pub fn for_testing() -> Self {
        Self {
            frontend_base_url: "http://frontend.test".to_string(),
            sweep_interval_secs: 1,
            ..Default::default()
        }
    }

    /// Builds the account-setup URL the notification sender delivers.
    pub fn setup_url(&self, token: InviteToken) -> String {
        format!(
            "{}/setup-account/{}",
            self.frontend_base_url.trim_end_matches('/'),
            token
        )
    }

    /// The sweep interval as a [`Duration`].
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// The default invitation TTL as a [`TimeDelta`].
    pub fn default_invitation_ttl(&self) -> TimeDelta {
        TimeDelta::hours(self.invitation_ttl_hours)
    }
}
