//! Server configuration module

use clap::Parser;

use stockroom_app::context::AppOptions;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    purchases::PurchaseConfig,
    server::ServerRuntimeConfig,
    uploads::UploadConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod purchases;
pub(crate) mod server;
pub(crate) mod uploads;

/// Stockroom JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "stockroom-json", about = "Stockroom JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session and admin access settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Image upload storage settings.
    #[command(flatten)]
    pub uploads: UploadConfig,

    /// Purchase transaction settings.
    #[command(flatten)]
    pub purchases: PurchaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Options for wiring up the application services.
    #[must_use]
    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            database_url: self.database.database_url.clone(),
            run_migrations: self.database.run_migrations,
            purchase_timeout: self.purchases.timeout(),
            auth: self.auth.settings(),
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    const REQUIRED: [&str; 5] = [
        "stockroom-json",
        "--database-url",
        "postgres://localhost/stockroom",
        "--jwt-secret",
        "signing-secret",
    ];

    #[test]
    fn defaults_apply_when_only_required_values_are_given() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from(REQUIRED)?;

        assert_eq!(config.socket_addr(), "0.0.0.0:5000");
        assert!(config.database.run_migrations, "migrations run by default");
        assert!(!config.auth.allow_admin_signup, "admin signup closed by default");
        assert!(config.auth.local_admin_secret.is_none(), "bypass off by default");
        assert!(!config.observability.otel_enabled, "otel off by default");
        assert_eq!(config.uploads.uploads_dir.to_str(), Some("uploads"));
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:3000"]);

        Ok(())
    }

    #[test]
    fn app_options_carry_auth_and_timeout() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from(
            REQUIRED
                .into_iter()
                .chain(["--local-admin-secret", "letmein", "--purchase-timeout-ms", "250"]),
        )?;

        let options = config.app_options();

        assert_eq!(options.purchase_timeout.as_millis(), 250);
        assert_eq!(options.auth.jwt_secret.expose_secret(), "signing-secret");
        assert_eq!(
            options
                .auth
                .local_admin_secret
                .as_ref()
                .map(ExposeSecret::expose_secret),
            Some("letmein")
        );

        Ok(())
    }

    #[test]
    fn allowed_origins_split_on_commas() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from(REQUIRED.into_iter().chain([
            "--allowed-origins",
            "http://localhost:3000,https://shop.example.com",
        ]))?;

        assert_eq!(
            config.server.allowed_origins,
            vec!["http://localhost:3000", "https://shop.example.com"]
        );

        Ok(())
    }
}
