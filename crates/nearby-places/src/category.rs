//! Per-category derivation rules.
//!
//! Restaurants and hotels share one normalizer; everything that differs
//! between them (provider category filter, fallback name, id prefix, and
//! the presentation fields) is selected here by [`CategoryKind`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::pictogram::{pictogram_for_cuisine, Pictogram};
use crate::types::RawPlace;

/// Number of cuisine tags surfaced as "popular items".
const MAX_FOOD_ITEMS: usize = 3;

static WORD_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Restaurant,
    Hotel,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKind::Restaurant => write!(f, "restaurant"),
            CategoryKind::Hotel => write!(f, "hotel"),
        }
    }
}

impl CategoryKind {
    /// Provider `categories` filter value.
    #[must_use]
    pub fn provider_categories(self) -> &'static str {
        match self {
            Self::Restaurant => "catering.restaurant",
            Self::Hotel => "accommodation.hotel,accommodation",
        }
    }

    /// Display name used when the provider record has none.
    #[must_use]
    pub fn fallback_name(self) -> &'static str {
        match self {
            Self::Restaurant => "Unnamed Restaurant",
            Self::Hotel => "Unnamed Hotel",
        }
    }

    /// Plural noun for user-facing messages.
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Self::Restaurant => "restaurants",
            Self::Hotel => "hotels",
        }
    }

    /// Synthetic id for a record without a provider id.
    #[must_use]
    pub fn synthetic_id(self, index: usize) -> String {
        format!("{self}-{index}")
    }

    /// Derive the category-specific presentation fields for `raw`.
    #[must_use]
    pub fn details(self, raw: &RawPlace) -> PlaceDetails {
        match self {
            Self::Restaurant => PlaceDetails::Restaurant {
                food_items: parse_food_items(raw.cuisine.as_deref()),
                pictogram: pictogram_for_cuisine(raw.cuisine.as_deref()),
                opening_hours: non_empty(raw.opening_hours.as_deref()),
            },
            Self::Hotel => PlaceDetails::Hotel {
                category: hotel_category_label(&raw.categories),
                stars: star_count(raw.stars),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaceDetails {
    Restaurant {
        /// Up to three title-cased cuisine tags.
        food_items: Vec<String>,
        pictogram: Pictogram,
        opening_hours: Option<String>,
    },
    Hotel {
        category: String,
        /// `None` renders no stars.
        stars: Option<u8>,
    },
}

/// Split a `;`-separated cuisine string into at most three display labels.
///
/// Underscores become spaces and every word is capitalised, so
/// `"italian_bistro"` becomes `"Italian Bistro"`.
#[must_use]
pub fn parse_food_items(cuisine: Option<&str>) -> Vec<String> {
    let Some(cuisine) = cuisine.filter(|c| !c.is_empty()) else {
        return Vec::new();
    };

    cuisine
        .split(';')
        .take(MAX_FOOD_ITEMS)
        .map(|item| title_case(&item.replace('_', " ")))
        .collect()
}

fn title_case(s: &str) -> String {
    WORD_START_RE
        .replace_all(s, |caps: &regex::Captures<'_>| caps[0].to_uppercase())
        .into_owned()
}

/// Second dot-separated segment of the first category tag, underscores
/// replaced with spaces. `"accommodation.guest_house"` → `"guest house"`.
#[must_use]
pub fn hotel_category_label(categories: &[String]) -> String {
    categories
        .first()
        .and_then(|c| c.split('.').nth(1))
        .filter(|segment| !segment.is_empty())
        .map_or_else(|| "Hotel".to_string(), |segment| segment.replace('_', " "))
}

/// Whole star count, or `None` when the raw value is missing or below one.
#[must_use]
pub fn star_count(raw: Option<f64>) -> Option<u8> {
    let stars = raw.filter(|s| s.is_finite() && *s >= 1.0)?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = stars.trunc().min(f64::from(u8::MAX)) as u8;
    Some(whole)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_items_take_first_three_title_cased() {
        assert_eq!(
            parse_food_items(Some("pizza;italian_bistro;unused")),
            vec!["Pizza", "Italian Bistro", "Unused"]
        );
        assert_eq!(parse_food_items(Some("a;b;c;d;e")), vec!["A", "B", "C"]);
    }

    #[test]
    fn food_items_keep_existing_capitals() {
        assert_eq!(parse_food_items(Some("BBQ")), vec!["BBQ"]);
    }

    #[test]
    fn food_items_empty_for_missing_cuisine() {
        assert!(parse_food_items(None).is_empty());
        assert!(parse_food_items(Some("")).is_empty());
    }

    #[test]
    fn hotel_label_uses_second_segment() {
        let cats = vec!["accommodation.guest_house".to_string()];
        assert_eq!(hotel_category_label(&cats), "guest house");
        let cats = vec!["accommodation.hotel".to_string(), "building".to_string()];
        assert_eq!(hotel_category_label(&cats), "hotel");
    }

    #[test]
    fn hotel_label_falls_back() {
        assert_eq!(hotel_category_label(&[]), "Hotel");
        assert_eq!(hotel_category_label(&["accommodation".to_string()]), "Hotel");
        assert_eq!(hotel_category_label(&["accommodation.".to_string()]), "Hotel");
    }

    #[test]
    fn star_count_rules() {
        assert_eq!(star_count(Some(4.0)), Some(4));
        assert_eq!(star_count(Some(3.6)), Some(3));
        assert_eq!(star_count(Some(1.9)), Some(1));
        assert_eq!(star_count(Some(0.0)), None);
        assert_eq!(star_count(Some(-2.0)), None);
        assert_eq!(star_count(None), None);
    }

    #[test]
    fn synthetic_ids_use_kind_prefix() {
        assert_eq!(CategoryKind::Hotel.synthetic_id(3), "hotel-3");
        assert_eq!(CategoryKind::Restaurant.synthetic_id(0), "restaurant-0");
    }

    #[test]
    fn restaurant_details_drop_blank_opening_hours() {
        let raw = RawPlace {
            opening_hours: Some("  ".to_string()),
            cuisine: Some("coffee_shop".to_string()),
            ..RawPlace::default()
        };
        let details = CategoryKind::Restaurant.details(&raw);
        assert_eq!(
            details,
            PlaceDetails::Restaurant {
                food_items: vec!["Coffee Shop".to_string()],
                pictogram: Pictogram::Coffee,
                opening_hours: None,
            }
        );
    }
}
