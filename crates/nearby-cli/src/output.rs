//! Table and JSON rendering of a committed search.

use nearby_places::{PlaceDetails, RankedPlace, SearchSnapshot};

const NAME_WIDTH: usize = 30;
const DETAILS_WIDTH: usize = 34;

pub(crate) fn print_table(snapshot: &SearchSnapshot) {
    let origin = &snapshot.request.origin;
    let kind = snapshot.request.kind;
    println!("Near {}, {}", origin.city, origin.region);

    let places = snapshot.outcome.places();
    if places.is_empty() {
        println!("no {} found in this area", kind.plural());
        return;
    }

    println!();
    println!("{:<32}{:>10}  {:<36}ADDRESS", "NAME", "DISTANCE", "DETAILS");
    for place in places {
        println!(
            "{:<32}{:>10}  {:<36}{}",
            truncate(&place.name, NAME_WIDTH),
            place.distance_label,
            truncate(&details_summary(place), DETAILS_WIDTH),
            place.address
        );
    }
}

pub(crate) fn print_json(snapshot: &SearchSnapshot) -> anyhow::Result<()> {
    let origin = &snapshot.request.origin;
    let value = serde_json::json!({
        "origin": {
            "lat": origin.coordinate.lat,
            "lon": origin.coordinate.lon,
            "city": origin.city,
            "region": origin.region,
        },
        "kind": snapshot.request.kind,
        "radius_km": snapshot.request.radius_km,
        "places": snapshot.outcome.places(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// One-line summary of the category-specific fields.
fn details_summary(place: &RankedPlace) -> String {
    match &place.details {
        PlaceDetails::Restaurant {
            food_items,
            pictogram,
            ..
        } => {
            if food_items.is_empty() {
                pictogram.emoji().to_string()
            } else {
                format!("{} {}", pictogram.emoji(), food_items.join(" \u{b7} "))
            }
        }
        PlaceDetails::Hotel { category, stars } => match stars {
            Some(n) => format!("{category} {}", "\u{2b50}".repeat(usize::from(*n))),
            None => category.clone(),
        },
    }
}

/// Shortens `s` to at most `max` characters, ellipsis included.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}
