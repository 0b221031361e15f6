//! Wire models for the portal login endpoint.

use serde::{Deserialize, Serialize};

/// JSON payload posted to the login endpoint. The identifier travels under
/// `email` regardless of shape, for compatibility with existing
/// deployments.
///
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub remember: bool,
}

/// JSON envelope returned by the login endpoint. Every field is optional on
/// the wire; an absent `success` counts as a rejection.
///
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_request_serializes_identifier_as_email() {
        let request = LoginRequest {
            email: "12345678901",
            password: "secret1",
            remember: false,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({ "email": "12345678901", "password": "secret1", "remember": false })
        );
    }

    #[test]
    fn test_login_response_defaults_missing_fields() {
        let response: LoginResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.success);
        assert!(response.token.is_none());
        assert!(response.redirect.is_none());
        assert!(response.message.is_none());
    }

    #[test]
    fn test_login_response_full_envelope() {
        let body = json!({
            "success": true,
            "token": "abc123",
            "redirect": "/dashboard",
        });
        let response: LoginResponse = serde_json::from_value(body).unwrap();
        assert!(response.success);
        assert_eq!(response.token.as_deref(), Some("abc123"));
        assert_eq!(response.redirect.as_deref(), Some("/dashboard"));
    }
}
