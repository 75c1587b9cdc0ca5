//! One search cycle: origin → bounding box → provider call → ranked list.

use nearby_core::{compute_bounding_box, AppConfig};

use crate::category::CategoryKind;
use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::normalize::{normalize, RankedPlace};
use crate::origin::ResolvedOrigin;

/// Everything one search needs. Built per search and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub origin: ResolvedOrigin,
    pub kind: CategoryKind,
    pub radius_km: f64,
    pub limit: u32,
}

impl SearchRequest {
    /// Request using the configured radius and result limit.
    #[must_use]
    pub fn from_config(origin: ResolvedOrigin, kind: CategoryKind, config: &AppConfig) -> Self {
        Self {
            origin,
            kind,
            radius_km: config.search_radius_km,
            limit: config.result_limit,
        }
    }
}

/// Result of a completed search. `Empty` is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Vec<RankedPlace>),
    Empty,
}

impl SearchOutcome {
    #[must_use]
    pub fn places(&self) -> &[RankedPlace] {
        match self {
            SearchOutcome::Found(places) => places,
            SearchOutcome::Empty => &[],
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, SearchOutcome::Empty)
    }
}

/// Run one search against the provider and rank the results.
///
/// # Errors
///
/// Returns [`PlacesError::InvalidRadius`] for a non-positive or non-finite
/// radius, [`PlacesError::InvalidLimit`] for a zero limit, otherwise any
/// error from [`PlacesClient::search_places`].
pub async fn run_search(
    client: &PlacesClient,
    request: &SearchRequest,
) -> Result<SearchOutcome, PlacesError> {
    if !request.radius_km.is_finite() || request.radius_km <= 0.0 {
        return Err(PlacesError::InvalidRadius(request.radius_km));
    }
    if request.limit == 0 {
        return Err(PlacesError::InvalidLimit);
    }

    let origin = request.origin.coordinate;
    let bbox = compute_bounding_box(origin, request.radius_km);
    tracing::debug!(
        kind = %request.kind,
        %origin,
        radius_km = request.radius_km,
        filter = %bbox.to_rect_filter(),
        "searching places"
    );

    let raw = client.search_places(request.kind, &bbox, request.limit).await?;
    if raw.is_empty() {
        tracing::info!(kind = %request.kind, "no places found in this area");
        return Ok(SearchOutcome::Empty);
    }

    let ranked = normalize(&raw, origin, request.kind);
    tracing::info!(kind = %request.kind, count = ranked.len(), "loaded places");
    Ok(SearchOutcome::Found(ranked))
}
