//! PokeAPI Client
//!
//! Fetches upstream resources, consulting the cache first.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

/// Client for the PokeAPI REST service.
///
/// Every lookup is keyed by its full request URL. A hit skips the network
/// entirely; a miss fetches, stores the raw body on success and then
/// decodes it. Failed requests are never cached.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    cache: Cache,
    base_url: String,
    base: Url,
}

impl PokeApiClient {
    /// Creates a client for `base_url` using `cache`.
    ///
    /// Fails with [`PokedexError::InvalidUrl`] unless `base_url` is an
    /// absolute hierarchical URL such as `https://pokeapi.co/api/v2`.
    pub fn new(cache: Cache, base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| PokedexError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(PokedexError::InvalidUrl(base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            cache,
            base_url,
            base,
        })
    }

    /// Creates a client from the configuration.
    pub fn from_config(config: &Config, cache: Cache) -> Result<Self> {
        Self::new(cache, config.api_base_url.clone(), config.http_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// URL of the first page of location areas.
    pub fn first_location_page_url(&self) -> String {
        format!("{}/location-area/", self.base_url)
    }

    // == Fetch ==
    /// Returns the raw body for `url`, from the cache when possible.
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        if let Some(body) = self.cache.get(url).await {
            debug!(url, "serving cached response");
            return Ok(body);
        }

        debug!(url, "fetching from upstream");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, %status, "upstream returned an error status");
            return Err(PokedexError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        self.cache.put(url, body.clone()).await;
        Ok(body)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // == Resources ==
    /// Fetches a page of location areas from an absolute page URL.
    pub async fn location_areas(&self, page_url: &str) -> Result<LocationAreaPage> {
        self.fetch_json(page_url).await
    }

    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        let url = self.resource_url("location-area", name)?;
        self.fetch_json(&url).await
    }

    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = self.resource_url("pokemon", name)?;
        self.fetch_json(&url).await
    }

    /// `{base}/{collection}/{name}` with `name` encoded as one path segment.
    fn resource_url(&self, collection: &str, name: &str) -> Result<String> {
        if name.is_empty() || name == "." || name == ".." {
            return Err(PokedexError::Usage(format!("invalid name '{}'", name)));
        }

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| PokedexError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(collection)
            .push(name);
        Ok(url.into())
    }
}
