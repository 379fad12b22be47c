//! Multi-leg trek route assembly for the map display.
//!
//! DESIGN
//! ======
//! An itinerary is a list of overnight waypoints. Rest days repeat the
//! previous stop, so those are collapsed before routing. Each remaining leg is
//! routed separately with a pause between calls to stay under the routing
//! API's rate limit; a leg that cannot be routed is drawn as a straight line
//! and counted so the UI can say the route is approximate.
//!
//! The leg router and the pause are parameters, so the assembly logic runs the
//! same under tests as in the browser.

#[cfg(test)]
#[path = "trek_route_test.rs"]
mod trek_route_test;

use std::future::Future;

use crate::net::routing::{HikingRoute, RouteError};
use crate::net::types::LatLng;

/// Waypoints closer than this in both axes are the same stop.
pub const SAME_STOP_DEGREES: f64 = 0.001;
pub const LEG_PAUSE_MS: u32 = 500;

/// A fully assembled trek path.
#[derive(Clone, Debug, PartialEq)]
pub struct TrekRoute {
    pub path: Vec<LatLng>,
    pub legs: usize,
    /// Legs drawn as straight lines because routing failed.
    pub failed_legs: usize,
    pub distance_m: f64,
    pub duration_ms: u64,
}

impl TrekRoute {
    #[must_use]
    pub fn is_fully_routed(&self) -> bool {
        self.failed_legs == 0
    }
}

/// Drop waypoints that repeat the next one (acclimatization days).
///
/// The final waypoint is always kept.
pub fn skip_acclimatization(points: &[LatLng]) -> Vec<LatLng> {
    points
        .iter()
        .enumerate()
        .filter(|(i, point)| {
            points.get(i + 1).map_or(true, |next| {
                (point.lat - next.lat).abs() > SAME_STOP_DEGREES || (point.lng - next.lng).abs() > SAME_STOP_DEGREES
            })
        })
        .map(|(_, point)| *point)
        .collect()
}

/// Append `leg` to `path`, skipping its first point when `path` already ends
/// there.
pub fn stitch(path: &mut Vec<LatLng>, leg: &[LatLng]) {
    let skip = usize::from(!path.is_empty() && !leg.is_empty());
    path.extend_from_slice(&leg[skip..]);
}

/// Route every leg between consecutive stops and stitch the result.
///
/// `route_leg` is called once per leg; `pause` is awaited between calls.
///
/// # Errors
///
/// `NoRoute` when fewer than two distinct stops remain. `MissingApiKey` from
/// any leg aborts the whole assembly.
pub async fn assemble_route<L, LF, P, PF>(waypoints: &[LatLng], mut route_leg: L, mut pause: P) -> Result<TrekRoute, RouteError>
where
    L: FnMut(LatLng, LatLng) -> LF,
    LF: Future<Output = Result<HikingRoute, RouteError>>,
    P: FnMut() -> PF,
    PF: Future<Output = ()>,
{
    let stops = skip_acclimatization(waypoints);
    if stops.len() < 2 {
        return Err(RouteError::NoRoute);
    }

    let mut route =
        TrekRoute { path: Vec::new(), legs: stops.len() - 1, failed_legs: 0, distance_m: 0.0, duration_ms: 0 };
    for (i, pair) in stops.windows(2).enumerate() {
        if i > 0 {
            pause().await;
        }
        let (start, end) = (pair[0], pair[1]);
        match route_leg(start, end).await {
            Ok(leg) => {
                log::debug!("leg {}/{} routed ({} points)", i + 1, route.legs, leg.path.len());
                route.distance_m += leg.distance_m;
                route.duration_ms += leg.duration_ms;
                stitch(&mut route.path, &leg.path);
            }
            Err(RouteError::MissingApiKey) => return Err(RouteError::MissingApiKey),
            Err(e) => {
                log::warn!("leg {}/{} unroutable, using straight line: {e}", i + 1, route.legs);
                route.failed_legs += 1;
                stitch(&mut route.path, &[start, end]);
            }
        }
    }
    Ok(route)
}

/// Route a trek itinerary through GraphHopper with the standard pause.
///
/// # Errors
///
/// `MissingApiKey` before any request when `key` is absent or blank;
/// otherwise see `assemble_route`.
#[allow(clippy::unused_async)]
pub async fn fetch_trek_route(waypoints: Vec<LatLng>, key: Option<String>) -> Result<TrekRoute, RouteError> {
    let key = key.filter(|k| !k.trim().is_empty()).ok_or(RouteError::MissingApiKey)?;

    #[cfg(feature = "hydrate")]
    {
        assemble_route(
            &waypoints,
            |a, b| {
                let key = key.clone();
                async move { crate::net::routing::fetch_hiking_route(a, b, Some(&key)).await }
            },
            || gloo_timers::future::TimeoutFuture::new(LEG_PAUSE_MS),
        )
        .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (waypoints, key);
        Err(RouteError::Request("not available on server".to_owned()))
    }
}

// =============================================================================
// SVG PROJECTION
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewbox {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for Viewbox {
    fn default() -> Self {
        Self { width: 400.0, height: 300.0, padding: 16.0 }
    }
}

/// Fit `path` into `view`, preserving aspect ratio and centring it.
/// North is up.
pub fn project_to_viewbox(path: &[LatLng], view: Viewbox) -> Vec<(f64, f64)> {
    let Some(first) = path.first() else {
        return Vec::new();
    };
    let (mut min_lng, mut max_lng, mut min_lat, mut max_lat) = (first.lng, first.lng, first.lat, first.lat);
    for p in path {
        min_lng = min_lng.min(p.lng);
        max_lng = max_lng.max(p.lng);
        min_lat = min_lat.min(p.lat);
        max_lat = max_lat.max(p.lat);
    }
    let span_x = max_lng - min_lng;
    let span_y = max_lat - min_lat;
    let avail_w = (view.width - 2.0 * view.padding).max(0.0);
    let avail_h = (view.height - 2.0 * view.padding).max(0.0);
    let scale = match (span_x > 0.0, span_y > 0.0) {
        (false, false) => 0.0,
        (true, false) => avail_w / span_x,
        (false, true) => avail_h / span_y,
        (true, true) => (avail_w / span_x).min(avail_h / span_y),
    };
    let off_x = (view.width - span_x * scale) / 2.0;
    let off_y = (view.height - span_y * scale) / 2.0;
    path.iter().map(|p| (off_x + (p.lng - min_lng) * scale, off_y + (max_lat - p.lat) * scale)).collect()
}

/// SVG `d` attribute for a projected polyline.
pub fn svg_path_data(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, (x, y))| format!("{}{x:.1} {y:.1}", if i == 0 { "M" } else { " L" }))
        .collect()
}

/// `12.3 km`
pub fn format_distance(distance_m: f64) -> String {
    format!("{:.1} km", distance_m / 1000.0)
}

/// `5h 20m`, or `20m` under an hour.
pub fn format_duration(duration_ms: u64) -> String {
    let minutes = duration_ms / 60_000;
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, m) => format!("{h}h {m}m"),
    }
}
