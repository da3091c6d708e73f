use std::sync::Arc;

use anyhow::Result;
use fxcache::{Config, Fetcher, HttpTransport, RateTable, Store, Updater};
use log::warn;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let transport = Arc::new(HttpTransport::new(config.timeout)?);
    let fetcher = Fetcher::new(transport, config.api_base).with_app_id(config.app_id);

    let store = Arc::new(Store::new());
    let updater = Updater::new(Arc::new(fetcher), store.clone(), config.interval)?;

    match updater.update_once().await {
        Ok(()) => {
            if let Some(table) = store.snapshot() {
                print_rates(&table);
            }
        }
        Err(e) => warn!("Could not fetch initial rates: {}", e),
    }

    let handle = updater.spawn();
    tokio::signal::ctrl_c().await?;
    handle.abort();

    Ok(())
}

fn print_rates(table: &RateTable) {
    println!("Exchange rates against {} as of {}:", table.base(), table.as_of());

    for rate in table.iter() {
        println!("{} {}", rate.code, rate.value);
    }
}
