//! HTTP client for the places and geocoding provider.
//!
//! Wraps `reqwest` with provider-specific URL construction, API key
//! handling, and typed response decoding. Non-2xx statuses surface as
//! [`PlacesError::UnexpectedStatus`]; nothing is retried.

use std::time::Duration;

use nearby_core::{AppConfig, BoundingBox, DEFAULT_PROVIDER_BASE_URL};
use reqwest::{Client, Url};

use crate::category::CategoryKind;
use crate::error::PlacesError;
use crate::types::{PlaceFeature, PlacesResponse, RawPlace};

/// Client for the places search and geocoding endpoints.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a new client pointed at the production provider.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_PROVIDER_BASE_URL)
    }

    /// Creates a client from loaded application configuration.
    ///
    /// # Errors
    ///
    /// See [`PlacesClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, PlacesError> {
        Self::with_base_url(
            &config.provider_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.provider_base_url,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends endpoint paths
        // instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
        })
    }

    /// Searches for places of `kind` inside `bbox`.
    ///
    /// Returns an empty vector when the provider has no features for the
    /// area. Each feature is decoded on its own and field by field, so a
    /// mistyped property only blanks that property. A feature that is not a
    /// JSON object at all is logged and replaced by an empty [`RawPlace`] at
    /// the same position so that ids and ordering stay stable.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body is not a feature collection.
    pub async fn search_places(
        &self,
        kind: CategoryKind,
        bbox: &BoundingBox,
        limit: u32,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        let filter = bbox.to_rect_filter();
        let limit = limit.to_string();
        let url = self.build_url(
            "v2/places",
            &[
                ("categories", kind.provider_categories()),
                ("filter", &filter),
                ("limit", &limit),
            ],
        )?;

        let body = self.request_json(&url).await?;
        let response: PlacesResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("places search ({kind})"),
                source: e,
            })?;

        let places: Vec<RawPlace> = response
            .features
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                serde_json::from_value::<PlaceFeature>(value)
                    .map(RawPlace::from)
                    .unwrap_or_else(|e| {
                        tracing::warn!(
                            %kind,
                            index,
                            error = %e,
                            "malformed place feature; falling back to defaults"
                        );
                        RawPlace::default()
                    })
            })
            .collect();

        tracing::debug!(%kind, count = places.len(), "places search returned");
        Ok(places)
    }

    /// Builds an endpoint URL with percent-encoded query parameters and the
    /// API key appended last.
    pub(crate) fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join path '{path}': {e}"),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("apiKey", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] on network failure,
    /// [`PlacesError::UnexpectedStatus`] on a non-2xx status, or
    /// [`PlacesError::Deserialize`] if the body is not valid JSON.
    pub(crate) async fn request_json(&self, url: &Url) -> Result<serde_json::Value, PlacesError> {
        let shown = redact_api_key(url);
        tracing::debug!(url = %shown, "provider request");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url: shown,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: shown,
            source: e,
        })
    }
}

/// Renders `url` without its `apiKey` query parameter, for logs and errors.
pub(crate) fn redact_api_key(url: &Url) -> String {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "apiKey")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut shown = url.clone();
    if kept.is_empty() {
        shown.set_query(None);
    } else {
        shown.query_pairs_mut().clear().extend_pairs(kept);
    }
    shown.to_string()
}
