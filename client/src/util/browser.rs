//! Small DOM helpers. Every function is a no-op outside the browser.

/// Jump to the top of the page.
pub fn scroll_to_top() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }
}

/// Stop the page behind an overlay from scrolling.
pub fn lock_body_scroll(locked: bool) {
    #[cfg(feature = "hydrate")]
    {
        let body = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body());
        if let Some(body) = body {
            let _ = body.style().set_property("overflow", if locked { "hidden" } else { "" });
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = locked;
    }
}

/// Full navigation, used after sign-out so no protected view lingers.
pub fn hard_navigate(href: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(href);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = href;
    }
}
