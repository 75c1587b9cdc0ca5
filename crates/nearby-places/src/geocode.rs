//! Forward (postcode) and reverse geocoding endpoints.

use nearby_core::Coordinate;

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::types::{GeocodeResponse, GeocodeResult, GeocodedArea};

const UNKNOWN: &str = "Unknown";

impl PlacesClient {
    /// Looks up the centre of a postcode area.
    ///
    /// Only the first result is used. Returns `Ok(None)` when the provider
    /// has no match.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx status.
    /// - [`PlacesError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn geocode_postcode(
        &self,
        postcode: &str,
    ) -> Result<Option<GeocodedArea>, PlacesError> {
        let url = self.build_url(
            "v1/geocode/search",
            &[("postcode", postcode), ("format", "json")],
        )?;
        let body = self.request_json(&url).await?;
        let response: GeocodeResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("geocode(postcode={postcode})"),
                source: e,
            })?;

        Ok(first_area(response))
    }

    /// Looks up the area names around `coordinate`.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::geocode_postcode`].
    pub async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<GeocodedArea>, PlacesError> {
        let lat = coordinate.lat.to_string();
        let lon = coordinate.lon.to_string();
        let url = self.build_url(
            "v1/geocode/reverse",
            &[("lat", &lat), ("lon", &lon), ("format", "json")],
        )?;
        let body = self.request_json(&url).await?;
        let response: GeocodeResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("reverse geocode({coordinate})"),
                source: e,
            })?;

        Ok(first_area(response))
    }
}

fn first_area(response: GeocodeResponse) -> Option<GeocodedArea> {
    let result = response.results.into_iter().next()?;
    to_area(result)
}

fn to_area(result: GeocodeResult) -> Option<GeocodedArea> {
    let coordinate = match Coordinate::new(result.lat, result.lon) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "geocoder returned an invalid coordinate");
            return None;
        }
    };

    let city = pick(result.city, result.county);
    let region = pick(result.state, result.country);

    Some(GeocodedArea {
        coordinate,
        city,
        region,
    })
}

fn pick(primary: Option<String>, secondary: Option<String>) -> String {
    primary
        .filter(|s| !s.is_empty())
        .or_else(|| secondary.filter(|s| !s.is_empty()))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(city: Option<&str>, county: Option<&str>) -> GeocodeResult {
        GeocodeResult {
            lat: 40.75,
            lon: -73.99,
            city: city.map(str::to_owned),
            county: county.map(str::to_owned),
            state: None,
            country: Some("United States".to_owned()),
        }
    }

    #[test]
    fn city_falls_back_to_county_then_unknown() {
        assert_eq!(to_area(result(Some("New York"), None)).unwrap().city, "New York");
        assert_eq!(
            to_area(result(None, Some("Kings County"))).unwrap().city,
            "Kings County"
        );
        assert_eq!(to_area(result(None, None)).unwrap().city, "Unknown");
    }

    #[test]
    fn region_falls_back_to_country() {
        assert_eq!(to_area(result(None, None)).unwrap().region, "United States");
    }

    #[test]
    fn empty_results_are_none() {
        assert!(first_area(GeocodeResponse::default()).is_none());
    }

    #[test]
    fn invalid_coordinate_is_none() {
        let mut r = result(Some("Nowhere"), None);
        r.lat = 123.0;
        assert!(to_area(r).is_none());
    }
}
