// src/http.rs
//! HTTP client abstraction for the gift-code API.
//!
//! The trait exists so the retry logic in [`crate::transport`] can be
//! exercised in tests with scripted responses instead of real network
//! calls. The default implementation wraps reqwest.

use async_trait::async_trait;
use crate::Error;

/// Status and raw body of one HTTP exchange. The status is surfaced
/// separately because the retry policy is driven by it (429 vs other
/// failures) before the body is ever parsed.
#[derive(Debug, Clone)]
pub struct FormResponse {
    pub status: u16,
    pub body: String,
}

impl FormResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A client able to POST `application/x-www-form-urlencoded` bodies.
///
/// `Err` means the exchange never produced an HTTP status (connect
/// failure, timeout); an error status from the server comes back as
/// `Ok` with that status in the [`FormResponse`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<FormResponse, Error>;
}

#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<FormResponse, Error> {
        let resp = self
            .client
            .post(url)
            .header("accept", "application/json, text/plain, */*")
            .form(form)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(FormResponse { status, body })
    }
}
