//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use nearby_core::{compute_bounding_box, Coordinate};
use nearby_places::{normalize, CategoryKind, PlacesClient, PlacesError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 30, "nearby-test", base_url)
        .expect("client construction should not fail")
}

fn origin() -> Coordinate {
    Coordinate::new(40.0, -74.0).unwrap()
}

#[tokio::test]
async fn search_places_sends_category_filter_and_limit() {
    let server = MockServer::start().await;
    let bbox = compute_bounding_box(origin(), 5.0);

    let body = serde_json::json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-74.001, 40.001] },
                "properties": {
                    "place_id": "p1",
                    "name": "Corner Slice",
                    "categories": ["catering.restaurant"],
                    "catering": { "cuisine": "pizza" }
                }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .and(query_param("categories", "catering.restaurant"))
        .and(query_param("filter", bbox.to_rect_filter()))
        .and(query_param("limit", "20"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .search_places(CategoryKind::Restaurant, &bbox, 20)
        .await
        .expect("should parse places");

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].id.as_deref(), Some("p1"));
    assert_eq!(places[0].name.as_deref(), Some("Corner Slice"));
    assert_eq!(places[0].cuisine.as_deref(), Some("pizza"));
    assert_eq!(places[0].lon_lat, Some([-74.001, 40.001]));
}

#[tokio::test]
async fn search_places_uses_hotel_categories() {
    let server = MockServer::start().await;
    let bbox = compute_bounding_box(origin(), 5.0);

    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .and(query_param("categories", "accommodation.hotel,accommodation"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "features": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .search_places(CategoryKind::Hotel, &bbox, 20)
        .await
        .expect("empty features is not an error");
    assert!(places.is_empty());
}

#[tokio::test]
async fn search_places_missing_features_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .search_places(CategoryKind::Hotel, &compute_bounding_box(origin(), 5.0), 20)
        .await
        .unwrap();
    assert!(places.is_empty());
}

#[tokio::test]
async fn malformed_feature_degrades_in_place() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "features": [
            "not a feature",
            {
                "geometry": { "coordinates": [-74.0, 40.0] },
                "properties": { "name": "Good Hotel" }
            }
        ]
    });
    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .search_places(CategoryKind::Hotel, &compute_bounding_box(origin(), 5.0), 20)
        .await
        .unwrap();

    assert_eq!(places.len(), 2, "malformed feature must not be dropped");
    assert_eq!(places[0].name, None);
    assert_eq!(places[1].name.as_deref(), Some("Good Hotel"));
}

#[tokio::test]
async fn mistyped_field_does_not_cost_name_id_or_distance() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "features": [{
            "geometry": { "coordinates": [0.0, 0.001] },
            "properties": {
                "place_id": "p1",
                "name": "Luigi's",
                "contact": { "phone": 5_551_234 }
            }
        }]
    });
    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let here = Coordinate::new(0.0, 0.0).unwrap();
    let client = test_client(&server.uri());
    let raw = client
        .search_places(CategoryKind::Restaurant, &compute_bounding_box(here, 5.0), 20)
        .await
        .unwrap();
    let ranked = normalize(&raw, here, CategoryKind::Restaurant);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].id, "p1");
    assert_eq!(ranked[0].name, "Luigi's");
    assert_eq!(ranked[0].distance_label, "111 m");
    assert_eq!(ranked[0].phone.as_deref(), Some("5551234"));
}

#[tokio::test]
async fn non_success_status_is_an_error_without_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_places(CategoryKind::Restaurant, &compute_bounding_box(origin(), 5.0), 20)
        .await
        .unwrap_err();

    match err {
        PlacesError::UnexpectedStatus { status, url } => {
            assert_eq!(status, 401);
            assert!(!url.contains("test-key"), "api key leaked into error: {url}");
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_json_is_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_places(CategoryKind::Restaurant, &compute_bounding_box(origin(), 5.0), 20)
        .await
        .unwrap_err();
    assert!(matches!(err, PlacesError::Deserialize { .. }));
}

#[tokio::test]
async fn geocode_postcode_returns_first_result() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "results": [
            { "lat": 40.7506, "lon": -73.9972, "city": "New York", "state": "New York" },
            { "lat": 1.0, "lon": 1.0, "city": "Elsewhere" }
        ]
    });
    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .and(query_param("postcode", "10001"))
        .and(query_param("format", "json"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let area = client
        .geocode_postcode("10001")
        .await
        .unwrap()
        .expect("postcode should resolve");

    assert_eq!(area.city, "New York");
    assert_eq!(area.region, "New York");
    assert!((area.coordinate.lat - 40.7506).abs() < 1e-9);
}

#[tokio::test]
async fn geocode_postcode_without_results_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.geocode_postcode("00000").await.unwrap().is_none());
}

#[tokio::test]
async fn geocode_postcode_server_error_is_distinct_from_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.geocode_postcode("10001").await.unwrap_err();
    assert!(matches!(err, PlacesError::UnexpectedStatus { status: 503, .. }));
}

#[tokio::test]
async fn reverse_geocode_sends_lat_lon() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/geocode/reverse"))
        .and(query_param("lat", "40"))
        .and(query_param("lon", "-74"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{
                "lat": 40.0,
                "lon": -74.0,
                "county": "Monmouth County",
                "country": "United States"
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let area = client.reverse_geocode(origin()).await.unwrap().unwrap();
    assert_eq!(area.city, "Monmouth County");
    assert_eq!(area.region, "United States");
}
