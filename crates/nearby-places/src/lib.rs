//! Nearby restaurant and hotel search over a places/geocoding provider.
//!
//! [`run_search`] takes a [`SearchRequest`] through bounding-box derivation,
//! one provider call, and [`normalize`]; [`SearchSession`] wraps that cycle
//! so only the newest search can publish results.

pub mod category;
pub mod client;
pub mod error;
mod geocode;
pub mod normalize;
pub mod origin;
pub mod pictogram;
pub mod search;
pub mod session;
pub mod types;

pub use category::{CategoryKind, PlaceDetails};
pub use client::PlacesClient;
pub use error::PlacesError;
pub use normalize::{normalize, RankedPlace};
pub use origin::{
    resolve_from_device, resolve_from_postcode, validate_postcode, FixedLocation, LocationError,
    LocationSource, OriginSource, ResolvedOrigin,
};
pub use pictogram::{pictogram_for_cuisine, Pictogram};
pub use search::{run_search, SearchOutcome, SearchRequest};
pub use session::{CommitResult, SearchSession, SearchSnapshot, SearchTicket};
pub use types::{GeocodedArea, RawPlace};
