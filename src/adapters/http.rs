//! REST client for the registrar API.
//!
//! One method per endpoint. Every method returns a `Result`; deciding what a
//! failure means for the host is left to the adapter in `core`.

use crate::adapters::wire::{
    AvailabilityResponse, Country, CreatedHolder, DeleteResult, Envelope, Extension, Holder,
    HolderForm, OrderForm,
};
use crate::domain::model::HolderHandle;
use crate::utils::error::{AdapterError, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.neostrada.com/api";

#[derive(Debug, Clone)]
pub struct RegistrarApi {
    client: Client,
    base_url: Url,
    token: String,
}

impl RegistrarApi {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let invalid = |reason: &str| AdapterError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: reason.to_string(),
        };
        let parsed = Url::parse(base_url.trim_end_matches('/')).map_err(|e| invalid(&e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path"));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: parsed,
            token: token.to_string(),
        })
    }

    /// Appends percent-encoded path segments, so `/` or `?` inside a
    /// domain or handle stays part of its segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends the request and insists on exactly HTTP 200.
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Vec<u8>> {
        let response = request.send().await?;
        let status = response.status();

        tracing::debug!("Registrar {} responded with {}", endpoint, status);

        if status != StatusCode::OK {
            return Err(AdapterError::UnexpectedStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let request = self
            .client
            .get(self.url(&[endpoint]))
            .query(&[("token", self.token.as_str())]);
        let body = self.send(endpoint, request).await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body)?;
        Ok(envelope.results)
    }

    fn with_token(&self, mut pairs: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        pairs.push(("token", self.token.clone()));
        pairs
    }

    pub async fn availability_code(&self, domain: &str) -> Result<i64> {
        tracing::debug!("Checking availability of {}", domain);
        let form = self.with_token(vec![("domain", domain.to_string())]);
        let request = self.client.post(self.url(&["whois"])).form(&form);
        let body = self.send("whois", request).await?;
        let response: AvailabilityResponse = serde_json::from_slice(&body)?;
        Ok(response.code)
    }

    /// Fetches the account's domains in whichever schema `T` describes.
    pub async fn domains<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.fetch("domains").await
    }

    /// Returns the status the registrar reports after the delete.
    pub async fn delete_domain(&self, domain: &str) -> Result<String> {
        let endpoint = format!("domain/delete/{}", domain);
        let request = self
            .client
            .delete(self.url(&["domain", "delete", domain]))
            .query(&[("token", self.token.as_str())]);
        let body = self.send(&endpoint, request).await?;
        let envelope: Envelope<DeleteResult> = serde_json::from_slice(&body)?;
        Ok(envelope.results.status)
    }

    pub async fn holders(&self) -> Result<Vec<Holder>> {
        self.fetch("holders").await
    }

    pub async fn create_holder(&self, holder: &HolderForm) -> Result<HolderHandle> {
        let form = self.with_token(holder.to_pairs());
        let request = self.client.post(self.url(&["holder", "add"])).form(&form);
        let body = self.send("holder/add", request).await?;
        let envelope: Envelope<CreatedHolder> = serde_json::from_slice(&body)?;
        Ok(envelope.results.holder_id)
    }

    pub async fn update_holder(&self, handle: &HolderHandle, holder: &HolderForm) -> Result<()> {
        let endpoint = format!("holder/edit/{}", handle);
        let form = self.with_token(holder.to_pairs());
        let request = self.client.patch(self.url(&["holder", "edit", handle.as_str()])).form(&form);
        self.send(&endpoint, request).await?;
        Ok(())
    }

    pub async fn countries(&self) -> Result<Vec<Country>> {
        self.fetch("countries").await
    }

    pub async fn extensions(&self) -> Result<Vec<Extension>> {
        self.fetch("extensions").await
    }

    pub async fn place_order(&self, order: &OrderForm) -> Result<()> {
        let form = self.with_token(order.to_pairs());
        let request = self.client.post(self.url(&["orders", "add"])).form(&form);
        self.send("orders/add", request).await?;
        Ok(())
    }
}
