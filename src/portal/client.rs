//! HTTP client for portal API requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the scheduling portal, handling the JSON content negotiation headers
//! and the optional anti-forgery token.

use reqwest::header;
use reqwest::Response;
use serde::Serialize;

/// Header carrying the anti-forgery token when one is configured.
///
const CSRF_HEADER: &str = "X-CSRF-Token";

/// Makes JSON requests against the portal base URL.
///
pub struct Client {
    pub(crate) base_url: String,
    csrf_token: Option<String>,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and optional
    /// anti-forgery token.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created. This should never happen
    /// in practice as reqwest::Client::builder().build() only fails on
    /// invalid configuration, which we don't use.
    pub fn new(base_url: &str, csrf_token: Option<&str>) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            csrf_token: csrf_token.map(str::to_owned),
            http_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create HTTP client - this should never happen"),
        }
    }

    /// Post a JSON body to the given path and return the raw response.
    /// Requests and declares JSON on both sides of the exchange.
    ///
    pub(crate) async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, reqwest::Error> {
        let request_url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http_client
            .post(&request_url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .json(body);
        if let Some(token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        request.send().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_normalizes_trailing_slash() {
        let client = Client::new("http://localhost:8080/", None);
        assert_eq!(client.base_url, "http://localhost:8080");

        let client = Client::new("http://localhost:8080", None);
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
