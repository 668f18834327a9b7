//! Identity verification
//!
//! Two verifiers share one contract: exchange a caller-supplied credential
//! for a verified [`ExternalIdentity`].
//!
//! - [`PaypalIdentityVerifier`]: OAuth2 authorization-code exchange, then a
//!   bearer-token profile fetch to obtain the payer id.
//! - [`GoogleIdentityVerifier`]: ID-token validation delegated to the
//!   provider's tokeninfo endpoint, then email-domain extraction.
//!
//! Responses are parsed into typed values at this boundary; malformed
//! bodies fail the stage rather than propagating untyped fields.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::errors::OracleError;
use crate::http::UpstreamClient;
use crate::Result;

/// Verified external identity
///
/// Produced here, consumed once by the resource authorizer (or directly as
/// the domain fact), never retained across requests.
#[derive(Debug, Clone)]
pub struct ExternalIdentity {
    /// Provider-scoped owner identifier: payer id, or email domain
    pub owner_id: String,
    /// Raw verified claims, kept opaque for logging/auditing
    pub raw_claims: serde_json::Value,
}

/// Credential-to-identity contract shared by both verifiers
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Exchange a credential for a verified identity
    async fn verify(&self, credential: &str) -> Result<ExternalIdentity>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// OAuth2 authorization-code verifier for the billing provider
#[derive(Debug)]
pub struct PaypalIdentityVerifier {
    upstream: Arc<UpstreamClient>,
    token_url: String,
    userinfo_url: String,
}

impl PaypalIdentityVerifier {
    /// Endpoints are derived from the provider base URL
    pub fn new(upstream: Arc<UpstreamClient>, base_url: &str) -> Self {
        Self {
            upstream,
            token_url: format!("{base_url}/v1/oauth2/token"),
            userinfo_url: format!("{base_url}/v1/identity/oauth2/userinfo?schema=paypalv1.1"),
        }
    }

    async fn exchange_code(&self, code: &str) -> Result<String> {
        tracing::debug!("exchanging authorization code for access token");
        let response = self
            .upstream
            .post_form_basic(
                &self.token_url,
                &[("grant_type", "authorization_code"), ("code", code)],
            )
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "token exchange transport failure");
                OracleError::TokenExchangeFailed
            })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "token exchange rejected");
            return Err(OracleError::TokenExchangeFailed);
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "token response missing access_token");
            OracleError::TokenExchangeFailed
        })?;
        Ok(token.access_token)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<ExternalIdentity> {
        tracing::debug!("fetching identity profile");
        let response = self
            .upstream
            .get_bearer(&self.userinfo_url, access_token)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "profile fetch transport failure");
                OracleError::ProfileFetchFailed
            })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "profile fetch rejected");
            return Err(OracleError::ProfileFetchFailed);
        }

        let claims: serde_json::Value = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "profile body unparseable");
            OracleError::ProfileFetchFailed
        })?;
        let payer_id = claims
            .get("payer_id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                tracing::warn!("profile lacks payer_id");
                OracleError::ProfileFetchFailed
            })?
            .to_string();

        Ok(ExternalIdentity {
            owner_id: payer_id,
            raw_claims: claims,
        })
    }
}

#[async_trait]
impl IdentityVerifier for PaypalIdentityVerifier {
    async fn verify(&self, credential: &str) -> Result<ExternalIdentity> {
        let access_token = self.exchange_code(credential).await?;
        self.fetch_profile(&access_token).await
    }
}

/// ID-token verifier backed by the provider's tokeninfo endpoint
#[derive(Debug)]
pub struct GoogleIdentityVerifier {
    upstream: Arc<UpstreamClient>,
    tokeninfo_url: String,
    audience: String,
}

impl GoogleIdentityVerifier {
    /// `audience` is the expected `aud` claim (the OAuth client id)
    pub fn new(upstream: Arc<UpstreamClient>, tokeninfo_url: &str, audience: &str) -> Self {
        Self {
            upstream,
            tokeninfo_url: tokeninfo_url.to_string(),
            audience: audience.to_string(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify(&self, credential: &str) -> Result<ExternalIdentity> {
        tracing::debug!("verifying ID token against the provider");
        let response = self
            .upstream
            .get_plain(&self.tokeninfo_url, &[("id_token", credential)])
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "tokeninfo transport failure");
                OracleError::InvalidToken
            })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "ID token rejected");
            return Err(OracleError::InvalidToken);
        }

        let claims: serde_json::Value = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "tokeninfo body unparseable");
            OracleError::InvalidToken
        })?;
        let domain = validate_claims(&claims, &self.audience)?;

        Ok(ExternalIdentity {
            owner_id: domain,
            raw_claims: claims,
        })
    }
}

/// Check the audience claim and extract the verified email domain
pub(crate) fn validate_claims(claims: &serde_json::Value, audience: &str) -> Result<String> {
    let aud = claims.get("aud").and_then(|v| v.as_str());
    if aud != Some(audience) {
        tracing::warn!("ID token audience mismatch");
        return Err(OracleError::InvalidToken);
    }
    let email = claims
        .get("email")
        .and_then(|v| v.as_str())
        .ok_or(OracleError::MalformedClaim)?;
    domain_of(email).map(str::to_string)
}

/// Domain part of a verified email claim
pub(crate) fn domain_of(email: &str) -> Result<&str> {
    match email.split_once('@') {
        Some((_, domain)) if !domain.is_empty() => Ok(domain),
        _ => Err(OracleError::MalformedClaim),
    }
}
