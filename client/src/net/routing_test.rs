use super::*;

use futures::executor::block_on;

const KATHMANDU: LatLng = LatLng::new(27.7172, 85.324);
const LUKLA: LatLng = LatLng::new(27.6881, 86.7314);

#[test]
fn route_url_orders_points_lat_lng_and_requests_geojson() {
    assert_eq!(
        route_url(KATHMANDU, LUKLA, "k3y"),
        "https://graphhopper.com/api/1/route?point=27.7172,85.324&point=27.6881,86.7314\
         &profile=hike&points_encoded=false&key=k3y"
    );
}

#[test]
fn route_url_encodes_key() {
    assert!(route_url(KATHMANDU, LUKLA, "a b&c").ends_with("&key=a%20b%26c"));
}

#[test]
fn parse_swaps_lng_lat_pairs() {
    let body = r#"{"paths":[{"distance":1234.5,"time":60000,
        "points":{"type":"LineString","coordinates":[[85.1,27.1],[85.2,27.2]]}}]}"#;
    let route = parse_route_response(body).unwrap();
    assert_eq!(route.path, vec![LatLng::new(27.1, 85.1), LatLng::new(27.2, 85.2)]);
    assert!((route.distance_m - 1234.5).abs() < f64::EPSILON);
    assert_eq!(route.duration_ms, 60_000);
}

#[test]
fn parse_without_paths_is_no_route() {
    assert_eq!(parse_route_response(r#"{"paths":[]}"#), Err(RouteError::NoRoute));
    assert_eq!(parse_route_response(r#"{"message":"Cannot find point 2"}"#), Err(RouteError::NoRoute));
}

#[test]
fn parse_rejects_garbage() {
    assert!(matches!(parse_route_response("<html>"), Err(RouteError::Request(_))));
}

#[test]
fn missing_key_fails_fast() {
    assert_eq!(block_on(fetch_hiking_route(KATHMANDU, LUKLA, None)), Err(RouteError::MissingApiKey));
    assert_eq!(block_on(fetch_hiking_route(KATHMANDU, LUKLA, Some("  "))), Err(RouteError::MissingApiKey));
}

#[test]
fn error_messages() {
    assert_eq!(RouteError::MissingApiKey.to_string(), "GraphHopper key missing");
    assert_eq!(RouteError::NoRoute.to_string(), "No hiking route");
}
