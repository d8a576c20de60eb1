//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    auth::{AuthService, AuthSettings, PgAuthService},
    database::{self, Db},
    domain::{
        products::{PgProductsService, ProductsService},
        purchases::{PgPurchasesService, PurchasesService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Options needed to wire up the services.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub database_url: String,
    pub run_migrations: bool,
    pub purchase_timeout: Duration,
    pub auth: AuthSettings,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub purchases: Arc<dyn PurchasesService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Connect to the database and build every service.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn connect(options: &AppOptions) -> Result<Self, AppInitError> {
        let pool = database::connect(&options.database_url)
            .await
            .map_err(AppInitError::Database)?;

        if options.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;

            tracing::info!("database migrations applied");
        }

        let db = Db::new(pool.clone());

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            purchases: Arc::new(PgPurchasesService::new(db, options.purchase_timeout)),
            auth: Arc::new(PgAuthService::new(pool, &options.auth)),
        })
    }
}
