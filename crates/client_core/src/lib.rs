use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use shared::{
    error::CatalogError,
    protocol::{decode_catalog, CatalogSnapshot},
};
use tracing::{info, warn};
use url::Url;

pub mod config;
pub mod presentation;
pub mod store;

pub use config::{load_settings, Settings, SettingsError};
pub use store::{CatalogAction, CatalogStore, StoreDiagnostic, Transition};

/// Where the screen gets its product list from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<CatalogSnapshot, CatalogError>;
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, CatalogError>;
}

pub struct CatalogClient {
    http: Client,
    endpoint: Url,
}

impl CatalogClient {
    pub fn new(settings: &Settings) -> Result<Self, CatalogError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| CatalogError::Transport(err.to_string()))?;
        Ok(Self {
            http,
            endpoint: settings.endpoint_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| CatalogError::Transport(err.to_string()))?;
        let status = res.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }
        let body = res
            .bytes()
            .await
            .map_err(|err| CatalogError::Transport(err.to_string()))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_catalog(&self) -> Result<CatalogSnapshot, CatalogError> {
        info!(endpoint = %self.endpoint, "fetching catalog");
        let body = self.get_bytes(self.endpoint.as_str()).await?;
        let decoded = decode_catalog(&body)?;
        for rejected in &decoded.rejected {
            warn!(
                index = rejected.index,
                product_id = rejected.id.map(|id| id.0),
                "dropping catalog record: {}",
                rejected.reason
            );
        }
        info!(
            products = decoded.products.len(),
            rejected = decoded.rejected.len(),
            "catalog fetched"
        );
        Ok(CatalogSnapshot::from_decoded(decoded, Utc::now()))
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.get_bytes(url).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
