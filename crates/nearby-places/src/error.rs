use thiserror::Error;

use crate::origin::LocationError;

/// Errors returned by the places provider client and search pipeline.
///
/// An empty result set is not an error; see [`crate::SearchOutcome::Empty`]
/// and the `Ok(None)` returns of the geocoding calls.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid provider base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("invalid postcode \"{0}\": at least 3 characters are required")]
    InvalidPostcode(String),

    #[error("invalid search radius {0} km")]
    InvalidRadius(f64),

    #[error("result limit must be at least 1")]
    InvalidLimit,

    #[error("device location unavailable: {0}")]
    Location(#[from] LocationError),
}
