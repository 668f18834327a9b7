//! Attest Oracle
//!
//! The attestation pipeline: identity verification, resource policy, and
//! issuance of signed canonical statements.
//!
//! A caller proves control of an external account (an OAuth2 authorization
//! code for a billing provider, or a provider-issued ID token); the oracle
//! verifies the associated business policy and returns a fixed-width
//! canonical payload signed with its Baby Jubjub key. Any failure at any
//! stage short-circuits to the uniform [`attest_core::ErrorBody`] shape and
//! no signing occurs.
//!
//! Modules:
//! - [`config`]: immutable startup configuration from the environment
//! - [`http`]: upstream client with precomputed Basic auth and bounded retry
//! - [`identity`]: OAuth2 code exchange and ID-token verification
//! - [`subscription`]: subscription fetch, policy gate, derived facts
//! - [`oracle`]: the orchestrator composing the stages
//!
//! The HTTP routing layer that exposes these flows is a separate concern;
//! this crate ends at typed requests and responses.

#![forbid(unsafe_code)]

pub mod config;
pub mod errors;
pub mod http;
pub mod identity;
pub mod oracle;
pub mod subscription;

pub use config::{ConfigError, OracleConfig};
pub use errors::OracleError;
pub use http::UpstreamClient;
pub use identity::{ExternalIdentity, GoogleIdentityVerifier, IdentityVerifier, PaypalIdentityVerifier};
pub use oracle::{Attestation, DomainAttestation, Oracle, SubscriptionAttestation};
pub use subscription::{
    PaypalSubscriptionAuthorizer, ResourceAuthorizer, SubscriptionFacts, SubscriptionRecord,
};

/// Result alias for oracle operations
pub type Result<T> = std::result::Result<T, OracleError>;
