//! Purchase Config

use std::time::Duration;

use clap::Args;

/// Purchase transaction settings.
#[derive(Debug, Args)]
pub struct PurchaseConfig {
    /// Upper bound for one purchase, including time spent waiting on row locks
    #[arg(long, env = "PURCHASE_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub purchase_timeout_ms: u64,
}

impl PurchaseConfig {
    /// The purchase timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.purchase_timeout_ms)
    }
}
