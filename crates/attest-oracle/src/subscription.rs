//! Resource authorization and fact extraction
//!
//! Fetches the subscription record fresh per request, enforces the policy
//! gate (ACTIVE status and ownership by the verified identity), and derives
//! the one numeric fact: subscription age in whole days, truncating toward
//! zero. Records are never cached; the record is discarded after the facts
//! are extracted.

use async_trait::async_trait;
use attest_core::Clock;
use serde::Deserialize;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::errors::OracleError;
use crate::http::UpstreamClient;
use crate::identity::ExternalIdentity;
use crate::Result;

const SECONDS_PER_DAY: i64 = 86_400;

/// Subscription status required by policy, exact case-sensitive match
const ACTIVE_STATUS: &str = "ACTIVE";

/// Typed subscription record, parsed at the provider boundary
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionRecord {
    /// Provider status string; only `ACTIVE` passes policy
    pub status: String,
    /// Plan identifier attested on success
    pub plan_id: String,
    /// RFC 3339 start time of the subscription
    pub start_time: String,
    /// Owner of the subscription
    pub subscriber: Subscriber,
}

/// Subscription owner as reported by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct Subscriber {
    /// Provider-scoped owner identifier
    pub payer_id: String,
}

/// Facts extracted from an authorized subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionFacts {
    /// Plan identifier
    pub plan_id: String,
    /// Whole days since the subscription started
    pub age_days: i64,
}

/// Policy gate and fact extraction contract
#[async_trait]
pub trait ResourceAuthorizer: Send + Sync {
    /// Fetch the resource, enforce policy, and derive facts
    async fn authorize_and_extract(
        &self,
        resource_id: &str,
        identity: &ExternalIdentity,
    ) -> Result<SubscriptionFacts>;
}

/// Apply the policy gate and derive facts from a fetched record
///
/// Both checks must pass: exact `ACTIVE` status and ownership by the
/// verified identity. Either failure collapses to one combined error and
/// nothing further runs.
pub fn evaluate(
    record: &SubscriptionRecord,
    identity: &ExternalIdentity,
    now: i64,
) -> Result<SubscriptionFacts> {
    if record.status != ACTIVE_STATUS {
        tracing::warn!(status = %record.status, "subscription not active");
        return Err(OracleError::InactiveOrUnowned);
    }
    if record.subscriber.payer_id != identity.owner_id {
        tracing::warn!("subscription not owned by the verified identity");
        return Err(OracleError::InactiveOrUnowned);
    }

    let start = OffsetDateTime::parse(&record.start_time, &Rfc3339).map_err(|e| {
        tracing::warn!(error = %e, "unparseable subscription start_time");
        OracleError::FetchFailed
    })?;

    // i64 division truncates toward zero; a start time in the future
    // yields a non-positive age and is rejected later by the encoder.
    let age_days = (now - start.unix_timestamp()) / SECONDS_PER_DAY;

    Ok(SubscriptionFacts {
        plan_id: record.plan_id.clone(),
        age_days,
    })
}

/// Billing-provider implementation of the authorizer
pub struct PaypalSubscriptionAuthorizer {
    upstream: Arc<UpstreamClient>,
    base_url: String,
    clock: Arc<dyn Clock>,
}

impl PaypalSubscriptionAuthorizer {
    /// Authorizer over the provider base URL, sharing the oracle clock
    pub fn new(upstream: Arc<UpstreamClient>, base_url: &str, clock: Arc<dyn Clock>) -> Self {
        Self {
            upstream,
            base_url: base_url.to_string(),
            clock,
        }
    }

    async fn fetch_record(&self, subscription_id: &str) -> Result<SubscriptionRecord> {
        tracing::debug!("fetching subscription detail");
        let url = format!(
            "{}/v1/billing/subscriptions/{}?fields=last_failed_payment,plan",
            self.base_url, subscription_id
        );
        let response = self.upstream.get_basic(&url).await.map_err(|e| {
            tracing::warn!(error = %e, "subscription fetch transport failure");
            OracleError::FetchFailed
        })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "subscription fetch rejected");
            return Err(OracleError::FetchFailed);
        }

        response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "subscription body malformed");
            OracleError::FetchFailed
        })
    }
}

#[async_trait]
impl ResourceAuthorizer for PaypalSubscriptionAuthorizer {
    async fn authorize_and_extract(
        &self,
        resource_id: &str,
        identity: &ExternalIdentity,
    ) -> Result<SubscriptionFacts> {
        let record = self.fetch_record(resource_id).await?;
        evaluate(&record, identity, self.clock.unix_now())
    }
}
