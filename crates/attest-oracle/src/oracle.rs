//! Oracle orchestrator
//!
//! Composes identity verification, resource authorization, canonical
//! encoding, and signing into the two attestation flows. The issuance
//! timestamp is stamped here, immediately before encoding, and never taken
//! from the caller. Any stage failure short-circuits before the signer is
//! reached.

use attest_core::{encode, CanonicalPayload, Clock, Facts, SystemClock};
use attest_crypto::{sign, OracleKeyMaterial, Signature};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::config::OracleConfig;
use crate::errors::OracleError;
use crate::http::UpstreamClient;
use crate::identity::{GoogleIdentityVerifier, IdentityVerifier, PaypalIdentityVerifier};
use crate::subscription::{PaypalSubscriptionAuthorizer, ResourceAuthorizer};
use crate::Result;

/// Signed attestation artifact
///
/// The payload plus signature is what the downstream zero-knowledge
/// verifier consumes; stateless and never mutated after creation.
#[derive(Debug, Clone)]
pub struct Attestation {
    /// Canonical fixed-width payload that was signed
    pub payload: CanonicalPayload,
    /// Deterministic signature over the payload
    pub signature: Signature,
    /// Unix seconds stamped by the oracle
    pub issued_at: i64,
}

/// Subscription-flow response
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionAttestation {
    /// Issuance time, Unix seconds
    pub timestamp: i64,
    /// Attested plan identifier
    #[serde(rename = "subsPlanID")]
    pub subs_plan_id: String,
    /// Attested subscription age in whole days
    #[serde(rename = "subsAge")]
    pub subs_age: i64,
    /// Packed signature, lowercase hex
    pub signature: String,
    /// Full artifact for downstream consumers
    #[serde(skip)]
    pub attestation: Attestation,
}

/// Domain-flow response
#[derive(Debug, Clone, Serialize)]
pub struct DomainAttestation {
    /// Issuance time, Unix seconds
    pub timestamp: i64,
    /// Attested email domain
    #[serde(rename = "emailDomain")]
    pub email_domain: String,
    /// Packed signature, lowercase hex
    pub signature: String,
    /// Full artifact for downstream consumers
    #[serde(skip)]
    pub attestation: Attestation,
}

/// The attestation oracle
///
/// Holds only read-only state: key material, collaborator handles, and the
/// clock. Safe for unlimited concurrent use.
pub struct Oracle {
    keys: OracleKeyMaterial,
    paypal_identity: Arc<dyn IdentityVerifier>,
    google_identity: Arc<dyn IdentityVerifier>,
    authorizer: Arc<dyn ResourceAuthorizer>,
    clock: Arc<dyn Clock>,
}

impl Oracle {
    /// Assemble an oracle from explicit collaborators
    pub fn new(
        keys: OracleKeyMaterial,
        paypal_identity: Arc<dyn IdentityVerifier>,
        google_identity: Arc<dyn IdentityVerifier>,
        authorizer: Arc<dyn ResourceAuthorizer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            keys,
            paypal_identity,
            google_identity,
            authorizer,
            clock,
        }
    }

    /// Build the production oracle from configuration
    ///
    /// Fails on invalid key material or an unbuildable HTTP client;
    /// callers must treat either as fatal and refuse to serve requests.
    pub fn from_config(config: &OracleConfig) -> Result<Self> {
        let keys = OracleKeyMaterial::from_hex(&config.private_key_hex)?;
        let upstream = Arc::new(
            UpstreamClient::new(
                &config.paypal_client_id,
                &config.paypal_client_secret,
                config.max_retries,
            )
            .map_err(|e| OracleError::Startup(e.to_string()))?,
        );
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let paypal_identity: Arc<dyn IdentityVerifier> = Arc::new(PaypalIdentityVerifier::new(
            Arc::clone(&upstream),
            &config.paypal_base_url,
        ));
        let google_identity: Arc<dyn IdentityVerifier> = Arc::new(GoogleIdentityVerifier::new(
            Arc::clone(&upstream),
            &config.google_tokeninfo_url,
            &config.google_client_id,
        ));
        let authorizer: Arc<dyn ResourceAuthorizer> = Arc::new(PaypalSubscriptionAuthorizer::new(
            upstream,
            &config.paypal_base_url,
            Arc::clone(&clock),
        ));

        Ok(Self::new(
            keys,
            paypal_identity,
            google_identity,
            authorizer,
            clock,
        ))
    }

    /// Oracle public key, compressed, lowercase hex
    pub fn public_key_hex(&self) -> String {
        self.keys.public_key_hex()
    }

    /// Subscription flow: verify the code, authorize the subscription,
    /// then encode and sign the plan/age facts.
    pub async fn get_subscription_info(
        &self,
        code: &str,
        subscription_id: &str,
    ) -> Result<SubscriptionAttestation> {
        let started = Instant::now();
        tracing::info!("subscription attestation requested");

        let identity = self.paypal_identity.verify(code).await?;
        let facts = self
            .authorizer
            .authorize_and_extract(subscription_id, &identity)
            .await?;

        let issued_at = self.clock.unix_now();
        let attestation = self.issue(
            &Facts::Subscription {
                plan_id: facts.plan_id.clone(),
                age_days: facts.age_days,
            },
            issued_at,
        )?;

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "subscription attestation issued"
        );
        Ok(SubscriptionAttestation {
            timestamp: issued_at,
            subs_plan_id: facts.plan_id,
            subs_age: facts.age_days,
            signature: attestation.signature.to_hex(),
            attestation,
        })
    }

    /// Domain flow: verify the ID token, then encode and sign the domain
    /// fact; resource authorization does not apply.
    pub async fn verify_google_credential(&self, id_token: &str) -> Result<DomainAttestation> {
        let started = Instant::now();
        tracing::info!("domain attestation requested");

        let identity = self.google_identity.verify(id_token).await?;

        let issued_at = self.clock.unix_now();
        let attestation = self.issue(
            &Facts::Domain {
                domain: identity.owner_id.clone(),
            },
            issued_at,
        )?;

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "domain attestation issued"
        );
        Ok(DomainAttestation {
            timestamp: issued_at,
            email_domain: identity.owner_id,
            signature: attestation.signature.to_hex(),
            attestation,
        })
    }

    /// Encode and sign; the single place the signer is invoked
    fn issue(&self, facts: &Facts, issued_at: i64) -> Result<Attestation> {
        let payload = encode(facts, issued_at)?;
        let signature = sign(&self.keys, payload.as_bytes());
        Ok(Attestation {
            payload,
            signature,
            issued_at,
        })
    }
}
