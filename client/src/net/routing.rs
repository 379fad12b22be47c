//! Hiking directions from the GraphHopper routing API.
//!
//! One call covers one leg between two waypoints. Multi-leg assembly,
//! fallbacks and pacing live in `util::trek_route`.
//!
//! ERROR HANDLING
//! ==============
//! A missing API key fails before any request is made. Legs with no route
//! surface `RouteError::NoRoute` so callers can substitute a straight line.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "routing_test.rs"]
mod routing_test;

use serde::Deserialize;

use super::types::LatLng;

pub const GRAPHHOPPER_ROUTE_URL: &str = "https://graphhopper.com/api/1/route";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("GraphHopper key missing")]
    MissingApiKey,
    #[error("No hiking route")]
    NoRoute,
    #[error("routing request failed: {0}")]
    Request(String),
}

/// One routed leg.
#[derive(Clone, Debug, PartialEq)]
pub struct HikingRoute {
    pub path: Vec<LatLng>,
    /// Metres.
    pub distance_m: f64,
    /// Milliseconds.
    pub duration_ms: u64,
}

#[derive(Deserialize)]
struct RouteBody {
    #[serde(default)]
    paths: Vec<RoutePath>,
}

#[derive(Deserialize)]
struct RoutePath {
    points: RoutePoints,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    time: u64,
}

#[derive(Deserialize)]
struct RoutePoints {
    coordinates: Vec<[f64; 2]>,
}

/// Request URL for the leg `a -> b`.
pub fn route_url(a: LatLng, b: LatLng, key: &str) -> String {
    format!(
        "{GRAPHHOPPER_ROUTE_URL}?point={},{}&point={},{}&profile=hike&points_encoded=false&key={}",
        a.lat,
        a.lng,
        b.lat,
        b.lng,
        urlencoding::encode(key)
    )
}

/// Decode a GraphHopper response; coordinates arrive as `[lng, lat]`.
///
/// # Errors
///
/// `NoRoute` when the body carries no path, `Request` when it is not JSON of
/// the expected shape.
pub fn parse_route_response(body: &str) -> Result<HikingRoute, RouteError> {
    let parsed: RouteBody = serde_json::from_str(body).map_err(|e| RouteError::Request(e.to_string()))?;
    let first = parsed.paths.into_iter().next().ok_or(RouteError::NoRoute)?;
    if first.points.coordinates.is_empty() {
        return Err(RouteError::NoRoute);
    }
    Ok(HikingRoute {
        path: first.points.coordinates.into_iter().map(|[lng, lat]| LatLng::new(lat, lng)).collect(),
        distance_m: first.distance,
        duration_ms: first.time,
    })
}

/// Route one hiking leg.
///
/// # Errors
///
/// `MissingApiKey` when `key` is absent or blank; otherwise any network or
/// decode failure, or `NoRoute`.
pub async fn fetch_hiking_route(a: LatLng, b: LatLng, key: Option<&str>) -> Result<HikingRoute, RouteError> {
    let key = key.map(str::trim).filter(|k| !k.is_empty()).ok_or(RouteError::MissingApiKey)?;

    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&route_url(a, b, key))
            .send()
            .await
            .map_err(|e| RouteError::Request(e.to_string()))?;
        let body = resp.text().await.map_err(|e| RouteError::Request(e.to_string()))?;
        parse_route_response(&body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (a, b, key);
        Err(RouteError::Request("not available on server".to_owned()))
    }
}
