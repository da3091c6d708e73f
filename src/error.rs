use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid app_id provided")]
    InvalidCredential,

    #[error("Update interval must be positive")]
    ZeroInterval,

    #[error("Missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("Invalid value {value:?} for {name}")]
    InvalidVar { name: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("No app_id configured")]
    Unauthenticated,

    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("Remote returned {status}")]
    RemoteStatus { status: String },

    #[error("Can't decode rates: {0}")]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Rate {rate} for {code} is not a positive number")]
    InvalidRate { code: String, rate: f64 },

    #[error("Base currency {base} has rate {rate}, expected 1")]
    BaseRate { base: String, rate: f64 },
}

#[derive(Debug, Error, PartialEq)]
pub enum RateError {
    #[error("Currency {0} not available")]
    NotFound(String),

    #[error("Unknown currency {0}")]
    UnknownCurrency(String),

    #[error("Amount {0} must be a finite number greater than zero")]
    InvalidAmount(f64),
}
