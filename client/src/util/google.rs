//! Google Identity Services button glue.
//!
//! The GIS script is loaded asynchronously from the page shell, so the button
//! is installed with retries until `google.accounts.id` shows up.

/// Element the sign-in button is rendered into.
pub const GOOGLE_BUTTON_ID: &str = "google-signin-button";
pub const GIS_SCRIPT_URL: &str = "https://accounts.google.com/gsi/client";

/// Initialise GIS with `client_id` and render its button.
///
/// `on_credential` receives the ID token from each successful sign-in.
///
/// # Errors
///
/// Returns a description of what is missing when the script has not loaded
/// yet or the container element is absent.
#[cfg(feature = "hydrate")]
pub fn render_google_button(client_id: &str, on_credential: impl Fn(String) + 'static) -> Result<(), String> {
    use js_sys::{Function, Object, Reflect};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    fn get(target: &JsValue, key: &str) -> Option<JsValue> {
        Reflect::get(target, &JsValue::from_str(key)).ok().filter(|v| !v.is_undefined() && !v.is_null())
    }
    fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), String> {
        Reflect::set(target, &JsValue::from_str(key), value).map(|_| ()).map_err(|_| format!("could not set {key}"))
    }
    fn method(target: &JsValue, name: &str) -> Result<Function, String> {
        get(target, name).and_then(|f| f.dyn_into::<Function>().ok()).ok_or_else(|| format!("google.accounts.id.{name} missing"))
    }

    let window = web_sys::window().ok_or("no window")?;
    let id_api = ["google", "accounts", "id"]
        .into_iter()
        .try_fold(JsValue::from(window.clone()), |obj, key| get(&obj, key))
        .ok_or("Google Identity script not loaded")?;
    let container = window
        .document()
        .and_then(|d| d.get_element_by_id(GOOGLE_BUTTON_ID))
        .ok_or("sign-in button container missing")?;

    let callback = Closure::<dyn Fn(JsValue)>::new(move |response: JsValue| {
        match get(&response, "credential").and_then(|c| c.as_string()) {
            Some(token) => on_credential(token),
            None => log::warn!("Google sign-in returned no credential"),
        }
    });

    let init = Object::new();
    set(&init, "client_id", &JsValue::from_str(client_id))?;
    set(&init, "callback", callback.as_ref())?;
    set(&init, "auto_select", &JsValue::FALSE)?;
    method(&id_api, "initialize")?.call1(&id_api, &init).map_err(|_| "google.accounts.id.initialize failed")?;

    let look = Object::new();
    for (key, value) in [("theme", "outline"), ("size", "large"), ("text", "signin_with"), ("shape", "rectangular")] {
        set(&look, key, &JsValue::from_str(value))?;
    }
    method(&id_api, "renderButton")?
        .call2(&id_api, &container, &look)
        .map_err(|_| "google.accounts.id.renderButton failed")?;

    // GIS holds on to the callback for the page's lifetime.
    callback.forget();
    Ok(())
}
