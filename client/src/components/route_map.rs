//! SVG map of a trek route.
//!
//! DESIGN
//! ======
//! The overnight stops are drawn immediately as a dashed straight-line path.
//! Once the routed path arrives it is drawn on top; legs that could not be
//! routed stay straight and the caption says the route is approximate. The
//! stops and the path share one projection so markers sit on the line.

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::hooks::use_fetch;
use crate::net::types::LatLng;
use crate::util::trek_route::{
    TrekRoute, Viewbox, fetch_trek_route, format_distance, format_duration, project_to_viewbox, skip_acclimatization,
    svg_path_data,
};

#[component]
pub fn RouteMap(#[prop(into)] waypoints: Signal<Vec<LatLng>>) -> impl IntoView {
    let key = expect_context::<ClientConfig>().graphhopper_key;
    let route = use_fetch(
        move || {
            let stops = waypoints.get();
            (stops.len() >= 2).then_some(stops)
        },
        move |stops: Vec<LatLng>| fetch_trek_route(stops, key.clone()),
    );
    let view_box = Viewbox::default();

    let drawing = move || {
        let stops = skip_acclimatization(&waypoints.get());
        let state = route.get();
        let routed = state.data.as_ref().map(|r| r.path.clone()).unwrap_or_default();

        let mut all = routed.clone();
        all.extend_from_slice(&stops);
        let projected = project_to_viewbox(&all, view_box);
        let (line, markers) = projected.split_at(routed.len());

        let routed_d = svg_path_data(line);
        let straight_d = svg_path_data(markers);
        view! {
            <path class="route-map__straight" d=straight_d></path>
            {(!routed_d.is_empty()).then(|| view! { <path class="route-map__routed" d=routed_d></path> })}
            {markers
                .iter()
                .enumerate()
                .map(|(i, (x, y))| {
                    view! {
                        <g class="route-map__stop">
                            <circle cx=format!("{x:.1}") cy=format!("{y:.1}") r="5"></circle>
                            <text x=format!("{:.1}", x + 7.0) y=format!("{:.1}", y - 7.0)>{i + 1}</text>
                        </g>
                    }
                })
                .collect_view()}
        }
    };

    let caption = move || {
        let state = route.get();
        if state.loading {
            return "Plotting route…".to_owned();
        }
        if let Some(err) = state.error {
            return format!("Showing straight-line route: {err}");
        }
        state.data.as_ref().map(summary).unwrap_or_default()
    };

    view! {
        <figure class="route-map">
            <svg
                class="route-map__canvas"
                viewBox=format!("0 0 {} {}", view_box.width, view_box.height)
                xmlns="http://www.w3.org/2000/svg"
            >
                {drawing}
            </svg>
            <figcaption class="route-map__caption">{caption}</figcaption>
        </figure>
    }
}

fn summary(route: &TrekRoute) -> String {
    let base = format!("{} • {}", format_distance(route.distance_m), format_duration(route.duration_ms));
    if route.is_fully_routed() {
        base
    } else {
        format!("{base} • approximate ({} of {} legs straight-line)", route.failed_legs, route.legs)
    }
}
