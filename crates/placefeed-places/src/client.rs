//! HTTP client for the places provider.
//!
//! Wraps `reqwest` with provider-specific status handling, API key
//! management, retries and typed response deserialization. Every endpoint
//! checks the `"status"` field of the JSON envelope.

use std::time::Duration;

use async_trait::async_trait;
use placefeed_core::{Coord, PlaceSearch, SearchError, SearchPage};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::normalize::{normalize_details, normalize_place};
use crate::retry::retry_with_backoff;
use crate::types::{NearbySearchResponse, PlaceDetails, PlaceDetailsResponse};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Largest radius the provider accepts for a nearby search.
pub const MAX_SEARCH_RADIUS_M: u32 = placefeed_core::MAX_PROVIDER_RADIUS_M;

const PHOTO_MAX_WIDTH: &str = "400";

/// Client for the places provider.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PlacesClient {
    /// Creates a client pointed at the production provider.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, PlacesError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`PlacesError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Runs one nearby search and normalizes the results.
    ///
    /// `ZERO_RESULTS` yields an empty page. Results without a place id are
    /// dropped.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::InvalidRequest`] for an invalid center or radius.
    /// - [`PlacesError::Status`] if the provider reports a failure status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected shape.
    pub async fn nearby_search(
        &self,
        center: Coord,
        radius_m: u32,
        category: &str,
        keyword: Option<&str>,
    ) -> Result<SearchPage, PlacesError> {
        if !center.is_valid() {
            return Err(PlacesError::InvalidRequest(format!(
                "center out of range: {center}"
            )));
        }
        if radius_m == 0 || radius_m > MAX_SEARCH_RADIUS_M {
            return Err(PlacesError::InvalidRequest(format!(
                "radius {radius_m} m outside 1..={MAX_SEARCH_RADIUS_M}"
            )));
        }

        let location = center.to_string();
        let radius = radius_m.to_string();
        let mut params = vec![("location", location.as_str()), ("radius", radius.as_str())];
        if !category.trim().is_empty() {
            params.push(("type", category));
        }
        if let Some(k) = keyword.filter(|k| !k.trim().is_empty()) {
            params.push(("keyword", k));
        }
        let url = self.build_url("nearbysearch/json", &params)?;

        let envelope: NearbySearchResponse = self.get_json(&url, "nearbysearch").await?;
        if !matches!(envelope.status.as_str(), "OK" | "ZERO_RESULTS") {
            return Err(PlacesError::Status {
                status: envelope.status,
                message: envelope
                    .error_message
                    .unwrap_or_else(|| "no error message".to_string()),
            });
        }

        let returned = envelope.results.len();
        let records: Vec<_> = envelope
            .results
            .into_iter()
            .filter_map(|raw| normalize_place(raw, |reference| self.photo_url(reference)))
            .collect();
        if records.len() < returned {
            tracing::debug!(
                dropped = returned - records.len(),
                "dropped provider results without a place id"
            );
        }

        tracing::debug!(
            %center,
            radius_m,
            category,
            returned = records.len(),
            "nearby search complete"
        );

        Ok(SearchPage {
            records,
            has_more_pages: envelope.next_page_token.is_some(),
        })
    }

    /// Fetches full details for one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Status`] if the provider reports a failure status
    ///   (including `NOT_FOUND`).
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected shape.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = self.build_url(
            "details/json",
            &[
                ("place_id", place_id),
                (
                    "fields",
                    "name,formatted_address,formatted_phone_number,opening_hours,website,rating",
                ),
            ],
        )?;
        let envelope: PlaceDetailsResponse = self.get_json(&url, "details").await?;
        match (envelope.status.as_str(), envelope.result) {
            ("OK", Some(result)) => Ok(normalize_details(place_id, result)),
            (status, _) => Err(PlacesError::Status {
                status: status.to_string(),
                message: envelope
                    .error_message
                    .unwrap_or_else(|| format!("no details for {place_id}")),
            }),
        }
    }

    /// Public URL of a photo, sized for list cards.
    #[must_use]
    pub fn photo_url(&self, photo_reference: &str) -> String {
        self.build_url(
            "photo",
            &[
                ("maxwidth", PHOTO_MAX_WIDTH),
                ("photo_reference", photo_reference),
            ],
        )
        .map(String::from)
        .unwrap_or_default()
    }

    /// Builds an endpoint URL with percent-encoded query parameters and the API key.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// GET with retries, asserting a 2xx status and decoding the body.
    async fn get_json<T>(&self, url: &Url, context: &str) -> Result<T, PlacesError>
    where
        T: DeserializeOwned + HasStatus,
    {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self.client.get(url.clone()).send().await?;
            let response = response.error_for_status()?;
            let body = response.text().await?;
            let parsed: T =
                serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                    context: context.to_string(),
                    source: e,
                })?;
            // Surface transient envelope statuses here so the retry loop sees them.
            match parsed.status() {
                "OVER_QUERY_LIMIT" | "UNKNOWN_ERROR" => Err(PlacesError::Status {
                    status: parsed.status().to_string(),
                    message: parsed.error_message().unwrap_or("transient").to_string(),
                }),
                _ => Ok(parsed),
            }
        })
        .await
    }
}

/// Envelope accessors shared by every provider response.
trait HasStatus {
    fn status(&self) -> &str;
    fn error_message(&self) -> Option<&str>;
}

impl HasStatus for NearbySearchResponse {
    fn status(&self) -> &str {
        &self.status
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

impl HasStatus for PlaceDetailsResponse {
    fn status(&self) -> &str {
        &self.status
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

#[async_trait]
impl PlaceSearch for PlacesClient {
    async fn search_nearby(
        &self,
        center: Coord,
        radius_m: u32,
        category: &str,
        keyword: Option<&str>,
    ) -> Result<SearchPage, SearchError> {
        self.nearby_search(center, radius_m, category, keyword)
            .await
            .map_err(SearchError::from)
    }
}
