mod client;
mod error;
mod models;

pub use error::PortalError;

use crate::form::Credentials;
use client::Client;
use log::*;
use models::{LoginRequest, LoginResponse};

/// Fields of a successful login the caller acts on: an optional session
/// token to persist and an optional redirect target.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub token: Option<String>,
    pub redirect: Option<String>,
}

/// Responsible for asynchronous interaction with the portal authentication
/// endpoint, including interpretation of the response envelope.
///
pub struct Portal {
    client: Client,
    login_endpoint: String,
}

impl Portal {
    /// Returns a new instance for the given base URL, login path, and
    /// optional anti-forgery token.
    ///
    pub fn new(base_url: &str, login_endpoint: &str, csrf_token: Option<&str>) -> Portal {
        debug!("Initializing portal client for {}...", base_url);
        Portal {
            client: Client::new(base_url, csrf_token),
            login_endpoint: login_endpoint.to_owned(),
        }
    }

    /// Submit credentials and interpret the response envelope. An HTTP
    /// success whose body signals success resolves to [`LoginSuccess`];
    /// an explicit rejection resolves to [`PortalError::Rejected`] carrying
    /// the server message; everything else is a transport-level error.
    ///
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginSuccess, PortalError> {
        debug!(
            "Posting credentials for identifier '{}'...",
            credentials.identifier
        );
        let response = self
            .client
            .post_json(
                &self.login_endpoint,
                &LoginRequest {
                    email: &credentials.identifier,
                    password: &credentials.password,
                    remember: credentials.remember,
                },
            )
            .await?;

        let status = response.status();
        let response_bytes = response.bytes().await?;

        // The server reports rejections in the body even on non-2xx
        // statuses, so parse before checking either signal.
        let parsed: LoginResponse = match serde_json::from_slice(&response_bytes) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!(
                    "Failed to deserialize login response (status {}): {}",
                    status, e
                );
                return Err(e.into());
            }
        };

        if status.is_success() && parsed.success {
            debug!("Login accepted (token: {}).", parsed.token.is_some());
            Ok(LoginSuccess {
                token: parsed.token,
                redirect: parsed.redirect,
            })
        } else {
            warn!(
                "Login rejected with status {}: {}",
                status,
                parsed.message.as_deref().unwrap_or("no message")
            );
            Err(PortalError::Rejected {
                message: parsed.message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::uuid::UUIDv4;
    use fake::Fake;
    use httpmock::MockServer;
    use serde_json::json;
    use uuid::Uuid;

    fn credentials() -> Credentials {
        Credentials {
            identifier: "12345678901".to_string(),
            password: "secret1".to_string(),
            remember: false,
        }
    }

    #[tokio::test]
    async fn login_success() {
        let token: Uuid = UUIDv4.fake();

        let server = MockServer::start();
        let mock = server.mock_async(|when, then| {
            when.method("POST")
                .path("/api/login")
                .header("content-type", "application/json")
                .header("accept", "application/json")
                .json_body(json!({
                    "email": "12345678901",
                    "password": "secret1",
                    "remember": false,
                }));
            then.status(200).json_body(json!({
                "success": true,
                "token": token.to_string(),
                "redirect": "/painel",
            }));
        }).await;

        let portal = Portal::new(&server.base_url(), "/api/login", None);
        let outcome = portal.login(&credentials()).await.unwrap();
        assert_eq!(outcome.token, Some(token.to_string()));
        assert_eq!(outcome.redirect.as_deref(), Some("/painel"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn login_success_without_token_or_redirect() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/api/login");
                then.status(200).json_body(json!({ "success": true }));
            })
            .await;

        let portal = Portal::new(&server.base_url(), "/api/login", None);
        let outcome = portal.login(&credentials()).await.unwrap();
        assert_eq!(outcome, LoginSuccess { token: None, redirect: None });
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn login_rejected_with_message() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/api/login");
                then.status(200).json_body(json!({
                    "success": false,
                    "message": "Invalid credentials",
                }));
            })
            .await;

        let portal = Portal::new(&server.base_url(), "/api/login", None);
        let error = portal.login(&credentials()).await.unwrap_err();
        match error {
            PortalError::Rejected { message } => {
                assert_eq!(message.as_deref(), Some("Invalid credentials"))
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn login_rejected_on_http_failure_status() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/api/login");
                then.status(423).json_body(json!({ "message": "Account locked" }));
            })
            .await;

        let portal = Portal::new(&server.base_url(), "/api/login", None);
        let error = portal.login(&credentials()).await.unwrap_err();
        match error {
            PortalError::Rejected { message } => {
                assert_eq!(message.as_deref(), Some("Account locked"))
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn login_fails_on_unparsable_body() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/api/login");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let portal = Portal::new(&server.base_url(), "/api/login", None);
        let error = portal.login(&credentials()).await.unwrap_err();
        assert!(matches!(error, PortalError::Deserialization(_)));
        assert!(error.is_transport());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn login_fails_when_server_unreachable() {
        // Nothing listens here; the request must surface as a transport
        // error rather than a rejection.
        let portal = Portal::new("http://127.0.0.1:9", "/api/login", None);
        let error = portal.login(&credentials()).await.unwrap_err();
        assert!(matches!(error, PortalError::HttpRequest(_)));
        assert!(error.is_transport());
    }

    #[tokio::test]
    async fn login_sends_csrf_header_when_configured() {
        let token: Uuid = UUIDv4.fake();

        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/login")
                    .header("X-CSRF-Token", &token.to_string());
                then.status(200).json_body(json!({ "success": true }));
            })
            .await;

        let portal = Portal::new(&server.base_url(), "/api/login", Some(&token.to_string()));
        portal.login(&credentials()).await.unwrap();
        mock.assert_async().await;
    }
}
