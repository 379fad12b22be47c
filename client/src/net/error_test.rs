use super::*;

#[test]
fn message_prefers_detail() {
    let body = r#"{"detail":"Invalid credentials","error":"other"}"#;
    assert_eq!(error_message_from_body(body), "Invalid credentials");
}

#[test]
fn message_falls_back_to_error_then_message() {
    assert_eq!(error_message_from_body(r#"{"error":"Invalid Google token"}"#), "Invalid Google token");
    assert_eq!(error_message_from_body(r#"{"message":"Slow down"}"#), "Slow down");
}

#[test]
fn message_reads_first_entry_of_list() {
    assert_eq!(error_message_from_body(r#"{"detail":["Token expired"]}"#), "Token expired");
}

#[test]
fn message_defaults_for_empty_or_invalid_body() {
    assert_eq!(error_message_from_body(""), "Request failed");
    assert_eq!(error_message_from_body("<html>502</html>"), "Request failed");
    assert_eq!(error_message_from_body(r#"{"detail":"  "}"#), "Request failed");
}

#[test]
fn status_error_displays_backend_message() {
    let err = ApiError::from_status(400, r#"{"detail":"Bad token"}"#);
    assert_eq!(err.to_string(), "Bad token");
    assert_eq!(err.status(), Some(400));
    assert!(!err.is_unauthorized());
}

#[test]
fn unauthorized_is_detected_from_status() {
    assert!(ApiError::from_status(401, "{}").is_unauthorized());
    assert!(!ApiError::Network("offline".to_owned()).is_unauthorized());
}
