//! Build-time client configuration.
//!
//! The WASM bundle has no process environment, so values are baked in at
//! compile time with `option_env!`:
//! - `EVERTREK_API_URL`: backend origin (default `http://127.0.0.1:8000`)
//! - `EVERTREK_GRAPHHOPPER_KEY`: routing API key (optional)
//! - `EVERTREK_GOOGLE_CLIENT_ID`: Google Identity client id (optional)

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without a trailing slash.
    pub api_base_url: String,
    pub graphhopper_key: Option<String>,
    pub google_client_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

impl ClientConfig {
    /// Configuration compiled into this build.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("EVERTREK_API_URL"),
            option_env!("EVERTREK_GRAPHHOPPER_KEY"),
            option_env!("EVERTREK_GOOGLE_CLIENT_ID"),
        )
    }

    /// Normalize raw values: blank strings count as absent and the API URL
    /// loses any trailing slashes.
    #[must_use]
    pub fn from_values(api_url: Option<&str>, graphhopper_key: Option<&str>, google_client_id: Option<&str>) -> Self {
        let api_base_url = non_blank(api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        Self {
            api_base_url,
            graphhopper_key: non_blank(graphhopper_key),
            google_client_id: non_blank(google_client_id),
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned)
}
