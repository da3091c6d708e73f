use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::error::{ConfigError, FetchError};
use crate::fetcher::Fetcher;
use crate::store::Store;

/// Periodically fetches the latest rates and publishes them into a [`Store`].
pub struct Updater {
    fetcher: Arc<Fetcher>,
    store: Arc<Store>,
    interval: Duration,
}

impl Updater {
    pub fn new(
        fetcher: Arc<Fetcher>,
        store: Arc<Store>,
        interval: Duration,
    ) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }

        Ok(Self {
            fetcher,
            store,
            interval,
        })
    }

    /// Runs one fetch and publishes the result. On failure the current
    /// snapshot stays as it was.
    pub async fn update_once(&self) -> Result<(), FetchError> {
        let table = self.fetcher.fetch().await?;
        self.store.publish(table);
        Ok(())
    }

    /// Never returns. The first update runs one interval after the call,
    /// so callers that want rates at startup run [`Updater::update_once`] first.
    pub async fn run(self) {
        info!("Fetching new currencies every {:?}", self.interval);

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = self.update_once().await {
                warn!("Could not update rates: {}", e);
            }
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
