//! Resolution of the search origin from device location or a postcode.

use nearby_core::Coordinate;
use thiserror::Error;

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::types::GeocodedArea;

/// Minimum accepted postcode length after trimming.
const MIN_POSTCODE_LEN: usize = 3;

/// Why a device could not report its position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location services are disabled")]
    ServicesDisabled,
    #[error("unable to get location: {0}")]
    Unavailable(String),
}

/// Source of the device's current position.
pub trait LocationSource {
    /// # Errors
    ///
    /// Returns a [`LocationError`] when the position cannot be obtained.
    fn current_location(&self) -> Result<Coordinate, LocationError>;
}

/// A [`LocationSource`] that always reports the same coordinate.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

impl LocationSource for FixedLocation {
    fn current_location(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// How the origin was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginSource {
    Device,
    Postcode(String),
}

/// A search origin plus the area names shown alongside results.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOrigin {
    pub coordinate: Coordinate,
    pub city: String,
    pub region: String,
    pub source: OriginSource,
}

/// Trim and length-check a user-entered postcode.
///
/// # Errors
///
/// Returns [`PlacesError::InvalidPostcode`] if fewer than three characters
/// remain after trimming.
pub fn validate_postcode(input: &str) -> Result<&str, PlacesError> {
    let trimmed = input.trim();
    if trimmed.chars().count() < MIN_POSTCODE_LEN {
        return Err(PlacesError::InvalidPostcode(trimmed.to_owned()));
    }
    Ok(trimmed)
}

/// Geocode `postcode` into a search origin.
///
/// `Ok(None)` means the provider knows no such postcode; transport and
/// provider failures are returned as errors.
///
/// # Errors
///
/// - [`PlacesError::InvalidPostcode`] if the postcode is too short.
/// - Any error from [`PlacesClient::geocode_postcode`].
pub async fn resolve_from_postcode(
    client: &PlacesClient,
    postcode: &str,
) -> Result<Option<ResolvedOrigin>, PlacesError> {
    let postcode = validate_postcode(postcode)?;
    let Some(area) = client.geocode_postcode(postcode).await? else {
        tracing::info!(postcode, "postcode not found");
        return Ok(None);
    };

    Ok(Some(ResolvedOrigin {
        coordinate: area.coordinate,
        city: area.city,
        region: area.region,
        source: OriginSource::Postcode(postcode.to_owned()),
    }))
}

/// Read the device position and label it with its area names.
///
/// A failed or empty reverse lookup does not fail the search; the origin is
/// labelled `"Unknown City"` / `"Unknown"` instead.
///
/// # Errors
///
/// Returns [`PlacesError::Location`] if the device cannot report a position.
pub async fn resolve_from_device<L: LocationSource>(
    source: &L,
    client: &PlacesClient,
) -> Result<ResolvedOrigin, PlacesError> {
    let coordinate = source.current_location()?;

    let area = match client.reverse_geocode(coordinate).await {
        Ok(area) => area,
        Err(e) => {
            tracing::warn!(%coordinate, error = %e, "reverse geocoding failed; using unknown area");
            None
        }
    };

    let (city, region) = area.map_or_else(
        || ("Unknown City".to_string(), "Unknown".to_string()),
        |GeocodedArea { city, region, .. }| (city, region),
    );

    Ok(ResolvedOrigin {
        coordinate,
        city,
        region,
        source: OriginSource::Device,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DeniedLocation;

    impl LocationSource for DeniedLocation {
        fn current_location(&self) -> Result<Coordinate, LocationError> {
            Err(LocationError::PermissionDenied)
        }
    }

    #[test]
    fn validate_postcode_trims() {
        assert_eq!(validate_postcode(" 10001 ").unwrap(), "10001");
    }

    #[test]
    fn validate_postcode_rejects_short_input() {
        assert!(matches!(
            validate_postcode(" 12 "),
            Err(PlacesError::InvalidPostcode(ref p)) if p == "12"
        ));
        assert!(validate_postcode("").is_err());
    }

    #[test]
    fn fixed_location_reports_its_coordinate() {
        let c = Coordinate::new(51.5, -0.12).unwrap();
        assert_eq!(FixedLocation(c).current_location(), Ok(c));
    }

    #[tokio::test]
    async fn denied_location_surfaces_as_error() {
        let client = PlacesClient::with_base_url("k", 5, "ua", "http://127.0.0.1:9")
            .expect("client construction should not fail");
        let result = resolve_from_device(&DeniedLocation, &client).await;
        assert!(matches!(
            result,
            Err(PlacesError::Location(LocationError::PermissionDenied))
        ));
    }
}
