//! Cuisine → pictogram lookup for restaurant cards.
//!
//! Matching is a case-insensitive substring search over the raw cuisine
//! string. Rules are evaluated top to bottom and the first hit wins, so a
//! `"pizza;italian"` entry and an `"italian;burger"` entry both resolve to
//! [`Pictogram::Pizza`].

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pictogram {
    Pizza,
    Burger,
    Bento,
    Noodles,
    Curry,
    Stew,
    Taco,
    Poultry,
    Steak,
    Sandwich,
    HotDog,
    Fish,
    Coffee,
    Cake,
    Doughnut,
    Pancakes,
    Kebab,
    Salad,
    Juice,
    Croissant,
    Falafel,
    /// No rule matched.
    Generic,
}

impl Pictogram {
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Pizza => "\u{1F355}",
            Self::Burger => "\u{1F354}",
            Self::Bento => "\u{1F371}",
            Self::Noodles => "\u{1F35C}",
            Self::Curry => "\u{1F35B}",
            Self::Stew => "\u{1F372}",
            Self::Taco => "\u{1F32E}",
            Self::Poultry => "\u{1F357}",
            Self::Steak => "\u{1F969}",
            Self::Sandwich => "\u{1F96A}",
            Self::HotDog => "\u{1F32D}",
            Self::Fish => "\u{1F41F}",
            Self::Coffee => "\u{2615}",
            Self::Cake => "\u{1F370}",
            Self::Doughnut => "\u{1F369}",
            Self::Pancakes => "\u{1F95E}",
            Self::Kebab => "\u{1F959}",
            Self::Salad => "\u{1F957}",
            Self::Juice => "\u{1F9C3}",
            Self::Croissant => "\u{1F950}",
            Self::Falafel => "\u{1F9C6}",
            Self::Generic => "\u{1F37D}\u{FE0F}",
        }
    }
}

/// Ordered match rules. Order matters: earlier rows shadow later ones.
const CUISINE_RULES: &[(&[&str], Pictogram)] = &[
    (&["pizza", "italian"], Pictogram::Pizza),
    (&["burger", "american"], Pictogram::Burger),
    (&["sushi", "japanese"], Pictogram::Bento),
    (&["chinese", "noodle", "ramen"], Pictogram::Noodles),
    (&["thai"], Pictogram::Curry),
    (&["korean"], Pictogram::Stew),
    (&["indian"], Pictogram::Curry),
    (&["taco", "mexican", "burrito"], Pictogram::Taco),
    (&["chicken", "wings"], Pictogram::Poultry),
    (&["steak", "bbq", "grill"], Pictogram::Steak),
    (&["sandwich", "deli"], Pictogram::Sandwich),
    (&["hot_dog", "hotdog"], Pictogram::HotDog),
    (&["fish", "seafood"], Pictogram::Fish),
    (&["coffee", "cafe"], Pictogram::Coffee),
    (&["dessert", "cake", "ice_cream", "bakery"], Pictogram::Cake),
    (&["donut", "doughnut"], Pictogram::Doughnut),
    (&["breakfast", "pancake"], Pictogram::Pancakes),
    (&["kebab"], Pictogram::Kebab),
    (&["salad", "healthy"], Pictogram::Salad),
    (&["juice", "smoothie"], Pictogram::Juice),
    (&["french"], Pictogram::Croissant),
    (&["mediterranean", "falafel"], Pictogram::Falafel),
];

/// Pick the pictogram for a raw cuisine string.
///
/// Absent or empty input yields [`Pictogram::Generic`].
#[must_use]
pub fn pictogram_for_cuisine(cuisine: Option<&str>) -> Pictogram {
    let Some(cuisine) = cuisine.filter(|c| !c.is_empty()) else {
        return Pictogram::Generic;
    };
    let lowered = cuisine.to_lowercase();

    CUISINE_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lowered.contains(n)))
        .map_or(Pictogram::Generic, |(_, pictogram)| *pictogram)
}
