use super::*;

#[test]
fn defaults_when_nothing_configured() {
    let cfg = ClientConfig::from_values(None, None, None);
    assert_eq!(cfg.api_base_url, DEFAULT_API_URL);
    assert_eq!(cfg.graphhopper_key, None);
    assert_eq!(cfg.google_client_id, None);
    assert_eq!(cfg, ClientConfig::default());
}

#[test]
fn api_url_loses_trailing_slashes() {
    let cfg = ClientConfig::from_values(Some("https://api.evertrek.test///"), None, None);
    assert_eq!(cfg.api_base_url, "https://api.evertrek.test");
}

#[test]
fn blank_values_count_as_absent() {
    let cfg = ClientConfig::from_values(Some("  "), Some(""), Some("   "));
    assert_eq!(cfg.api_base_url, DEFAULT_API_URL);
    assert_eq!(cfg.graphhopper_key, None);
    assert_eq!(cfg.google_client_id, None);
}

#[test]
fn keys_are_trimmed() {
    let cfg = ClientConfig::from_values(None, Some(" gh-key "), Some("client.apps.googleusercontent.com"));
    assert_eq!(cfg.graphhopper_key.as_deref(), Some("gh-key"));
    assert_eq!(cfg.google_client_id.as_deref(), Some("client.apps.googleusercontent.com"));
}
