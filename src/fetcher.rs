use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::config::AppId;
use crate::error::{BoxError, DecodeError, FetchError};
use crate::exchange_rate::RateTable;
use crate::latest::{Currencies, Latest};

/// Status line and body of one HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}

/// One GET round trip. Timeouts and cancellation belong to the implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<RawResponse, BoxError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, BoxError> {
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body: body.to_vec(),
        })
    }
}

pub struct Fetcher {
    transport: Arc<dyn Transport>,
    api_base: String,
    app_id: Option<AppId>,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>, api_base: Url) -> Self {
        Self {
            transport,
            api_base: api_base.as_str().trim_end_matches('/').to_string(),
            app_id: None,
        }
    }

    pub fn with_app_id(mut self, app_id: AppId) -> Self {
        self.app_id = Some(app_id);
        self
    }

    /// Fetches the latest rate table. Exactly one request, no retries.
    pub async fn fetch(&self) -> Result<RateTable, FetchError> {
        info!("Updating exchange rates");
        let latest: Latest = self.get_json("latest.json").await?;
        let table = RateTable::try_from(latest)?;
        debug!(
            "Fetched {} rates against {} as of {}",
            table.len(),
            table.base(),
            table.as_of()
        );

        Ok(table)
    }

    /// Fetches the display names of all currencies the feed knows.
    pub async fn fetch_currencies(&self) -> Result<Currencies, FetchError> {
        self.get_json("currencies.json").await
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, FetchError> {
        let app_id = self.app_id.as_ref().ok_or(FetchError::Unauthenticated)?;
        let url = Url::parse_with_params(
            &format!("{}/{}", self.api_base, endpoint),
            &[("app_id", app_id.as_str())],
        )
        .map_err(|e| FetchError::Transport(e.into()))?;

        let resp = self
            .transport
            .get(&url)
            .await
            .map_err(FetchError::Transport)?;
        if resp.status != StatusCode::OK.as_u16() {
            return Err(FetchError::RemoteStatus {
                status: format!("{} {}", resp.status, resp.reason).trim_end().to_string(),
            });
        }

        serde_json::from_slice(&resp.body).map_err(|e| DecodeError::from(e).into())
    }
}
