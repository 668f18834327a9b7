//! Upstream HTTP client
//!
//! One `reqwest::Client` per oracle, with the Basic-auth credential
//! precomputed at startup and a bounded retry loop for 500/503 responses.
//! Retry exhaustion surfaces as a single terminal failure; the components
//! themselves never retry.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::{Response, StatusCode};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared upstream client with precomputed credentials
pub struct UpstreamClient {
    client: reqwest::Client,
    /// `Basic base64(client_id:client_secret)`, computed once
    basic_auth: String,
    max_retries: u32,
}

impl UpstreamClient {
    /// Build the client; the Basic credential is derived here and the
    /// secret is not retained in any other form. A builder failure is
    /// fatal at startup, like invalid key material.
    pub fn new(client_id: &str, client_secret: &str, max_retries: u32) -> reqwest::Result<Self> {
        let credential = BASE64.encode(format!("{client_id}:{client_secret}"));
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            basic_auth: format!("Basic {credential}"),
            max_retries,
        })
    }

    /// POST a urlencoded form with Basic auth
    pub async fn post_form_basic(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> reqwest::Result<Response> {
        self.send_with_retry(|| {
            self.client
                .post(url)
                .header(reqwest::header::AUTHORIZATION, &self.basic_auth)
                .form(form)
        })
        .await
    }

    /// GET with Basic auth
    pub async fn get_basic(&self, url: &str) -> reqwest::Result<Response> {
        self.send_with_retry(|| {
            self.client
                .get(url)
                .header(reqwest::header::AUTHORIZATION, &self.basic_auth)
        })
        .await
    }

    /// GET with a bearer token
    pub async fn get_bearer(&self, url: &str, token: &str) -> reqwest::Result<Response> {
        self.send_with_retry(|| self.client.get(url).bearer_auth(token))
            .await
    }

    /// GET without credentials (token verification endpoint); query pairs
    /// are appended and encoded by the client
    pub async fn get_plain(&self, url: &str, query: &[(&str, &str)]) -> reqwest::Result<Response> {
        self.send_with_retry(|| self.client.get(url).query(query))
            .await
    }

    /// Retry transient upstream failures (500/503 or transport errors) up
    /// to the configured budget, then return the last outcome as-is.
    async fn send_with_retry<F>(&self, build: F) -> reqwest::Result<Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let outcome = build().send().await;
            let retryable = match &outcome {
                Ok(response) => {
                    let status = response.status();
                    status == StatusCode::INTERNAL_SERVER_ERROR
                        || status == StatusCode::SERVICE_UNAVAILABLE
                }
                Err(_) => true,
            };
            if !retryable || attempt >= self.max_retries {
                return outcome;
            }
            attempt += 1;
            tracing::warn!(attempt, max = self.max_retries, "retrying upstream request");
        }
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}
