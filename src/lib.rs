//! Local cache of the latest openexchangerates.org rates.
//!
//! An [`Updater`] polls the feed through a [`Fetcher`] and publishes each
//! successful result into a [`Store`], which answers rate lookups and
//! conversions against the most recent table.

pub mod config;
pub mod error;
pub mod exchange_rate;
pub mod fetcher;
pub mod latest;
pub mod store;
pub mod updater;

pub use config::{AppId, Config};
pub use error::{ConfigError, DecodeError, FetchError, RateError};
pub use exchange_rate::{Conversion, Rate, RateTable};
pub use fetcher::{Fetcher, HttpTransport, RawResponse, Transport};
pub use store::{Rates, Store};
pub use updater::Updater;
