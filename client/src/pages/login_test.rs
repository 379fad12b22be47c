use super::*;

#[test]
fn validate_credentials_trims_email() {
    assert_eq!(validate_credentials("  trekker@example.com ", "s3cret"), Ok("trekker@example.com".to_owned()));
}

#[test]
fn validate_credentials_requires_email() {
    assert_eq!(validate_credentials("   ", "s3cret"), Err("Please enter your email address."));
}

#[test]
fn validate_credentials_rejects_malformed_email() {
    for email in ["trekker", "@example.com", "trekker@example", "trekker@.com", "trekker@example."] {
        assert_eq!(validate_credentials(email, "s3cret"), Err("Please enter a valid email address."), "{email}");
    }
}

#[test]
fn validate_credentials_requires_password() {
    assert_eq!(validate_credentials("trekker@example.com", ""), Err("Please enter your password."));
}

#[test]
fn password_is_not_trimmed() {
    assert!(validate_credentials("trekker@example.com", "  ").is_ok());
}
