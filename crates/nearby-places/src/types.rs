//! Provider response types for the places and geocoding endpoints.
//!
//! ## Observed shape of `GET /v2/places`
//!
//! A `GeoJSON` `FeatureCollection`. Each feature carries a `geometry` whose
//! `coordinates` are **longitude first**, and a `properties` object whose
//! fields are all optional in practice: unnamed places omit `name`, most
//! restaurants omit `catering.cuisine`, and contact details sit either in
//! `contact.phone` / `website` or only in the raw upstream record under
//! `datasource.raw`.
//!
//! ### `datasource.raw.stars`
//! Usually a JSON number, occasionally a numeric string (`"4"`). Anything
//! else is treated as absent.
//!
//! ### `geometry.coordinates`
//! Modelled as a raw [`serde_json::Value`] so that non-point geometries do
//! not fail the whole feature; only a leading numeric pair is read.
//!
//! ## Observed shape of `GET /v1/geocode/*?format=json`
//!
//! `{"results": [...]}` with flat `lat` / `lon` and administrative names.
//! An unknown postcode returns `200` with an empty `results` array.

use nearby_core::Coordinate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Top-level response from the places search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PlacesResponse {
    /// Features are decoded one by one so a single odd record degrades to
    /// fallbacks instead of failing the page.
    #[serde(default)]
    pub features: Option<Vec<serde_json::Value>>,
}

/// One place feature.
///
/// Every field is decoded leniently: a value of the wrong JSON type reads as
/// absent instead of failing the feature, so one bad field never costs the
/// record its id, name, or position.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceFeature {
    #[serde(default, deserialize_with = "lenient")]
    pub geometry: Option<PlaceGeometry>,
    #[serde(default, deserialize_with = "lenient")]
    pub properties: Option<PlaceProperties>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceGeometry {
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceProperties {
    #[serde(default, deserialize_with = "lenient_text")]
    pub place_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub formatted: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address_line1: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub opening_hours: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub contact: Option<PlaceContact>,
    #[serde(default, deserialize_with = "lenient")]
    pub catering: Option<PlaceCatering>,
    #[serde(default, deserialize_with = "lenient")]
    pub datasource: Option<PlaceDatasource>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceContact {
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceCatering {
    /// Semicolon-separated cuisine tags, e.g. `"pizza;italian"`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub cuisine: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceDatasource {
    #[serde(default, deserialize_with = "lenient")]
    pub raw: Option<DatasourceRaw>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DatasourceRaw {
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(default)]
    pub stars: Option<serde_json::Value>,
}

/// Decodes a nested object, reading any mismatched value as `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Strings pass through and numbers are rendered as text; anything else is `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Keeps the string entries of an array and skips the rest.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// A provider record flattened to the fields the normalizer reads.
///
/// Every field is optional; missing data is filled in by the normalizer's
/// fallbacks rather than rejected here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPlace {
    pub id: Option<String>,
    pub name: Option<String>,
    pub categories: Vec<String>,
    /// Raw `[lon, lat]` pair as sent by the provider.
    pub lon_lat: Option<[f64; 2]>,
    pub formatted_address: Option<String>,
    pub address_line1: Option<String>,
    pub phone: Option<String>,
    pub raw_phone: Option<String>,
    pub website: Option<String>,
    pub raw_website: Option<String>,
    pub opening_hours: Option<String>,
    pub cuisine: Option<String>,
    pub stars: Option<f64>,
}

impl RawPlace {
    /// The place position, if the provider sent a valid longitude-first pair.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.lon_lat.and_then(|pair| Coordinate::from_lon_lat(&pair))
    }
}

impl From<PlaceFeature> for RawPlace {
    fn from(feature: PlaceFeature) -> Self {
        let props = feature.properties.unwrap_or_default();
        let lon_lat = feature
            .geometry
            .and_then(|g| read_lon_lat(&g.coordinates));
        let raw = props.datasource.and_then(|d| d.raw).unwrap_or_default();

        Self {
            id: props.place_id,
            name: props.name,
            categories: props.categories,
            lon_lat,
            formatted_address: props.formatted,
            address_line1: props.address_line1,
            phone: props.contact.and_then(|c| c.phone),
            raw_phone: raw.phone,
            website: props.website,
            raw_website: raw.website,
            opening_hours: props.opening_hours,
            cuisine: props.catering.and_then(|c| c.cuisine),
            stars: raw.stars.as_ref().and_then(read_stars),
        }
    }
}

fn read_lon_lat(value: &serde_json::Value) -> Option<[f64; 2]> {
    let items = value.as_array()?;
    let lon = items.first()?.as_f64()?;
    let lat = items.get(1)?.as_f64()?;
    Some([lon, lat])
}

fn read_stars(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Top-level response from the forward and reverse geocoding endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// A geocoded position with display names for the surrounding area.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedArea {
    pub coordinate: Coordinate,
    /// City, else county, else `"Unknown"`.
    pub city: String,
    /// State, else country, else `"Unknown"`.
    pub region: String,
}
