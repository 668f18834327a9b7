//! Oracle error taxonomy and the mapping to the uniform wire shape
//!
//! Component failures are explicit enum variants; the transport layer
//! renders every one of them as `{error, error_description}` via
//! [`OracleError::to_error_body`]. Stage-specific detail goes to the log at
//! the failure site, never to the caller.

use attest_core::{EncodingError, ErrorBody};
use attest_crypto::CryptoError;

/// Failure of any stage of the attestation pipeline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// OAuth2 code exchange returned non-2xx or no access token
    #[error("Error when retrieving access token")]
    TokenExchangeFailed,

    /// Identity profile fetch failed or lacked the owner identifier
    #[error("Error when retrieving user info")]
    ProfileFetchFailed,

    /// ID token rejected by the provider or audience mismatch
    #[error("ID token rejected by the identity provider")]
    InvalidToken,

    /// A verified claim is present but unusable (no `@` in the email)
    #[error("verified claim is malformed")]
    MalformedClaim,

    /// Subscription detail fetch failed or body was malformed
    #[error("Error occured during subscription data retrieval. Check the billing-id.")]
    FetchFailed,

    /// Subscription is not ACTIVE or not owned by the verified identity
    #[error("Subscription is inactive or not owned by the logged-on user")]
    InactiveOrUnowned,

    /// Upstream HTTP client could not be constructed; fatal at startup
    #[error("failed to construct the upstream HTTP client: {0}")]
    Startup(String),

    /// Canonical encoding rejected the fact tuple
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Key material failed validation
    #[error(transparent)]
    Signing(#[from] CryptoError),
}

impl OracleError {
    /// Uniform caller-facing error body
    ///
    /// ID-token failures collapse to one generic description so the body
    /// never leaks which validation step rejected the credential.
    pub fn to_error_body(&self) -> ErrorBody {
        match self {
            OracleError::InvalidToken | OracleError::MalformedClaim => {
                ErrorBody::oracle("Data is invalid or does not fit the requirements")
            }
            other => ErrorBody::oracle(other.to_string()),
        }
    }
}

impl From<OracleError> for ErrorBody {
    fn from(err: OracleError) -> Self {
        err.to_error_body()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_exchange_body_matches_the_wire_contract() {
        let body = OracleError::TokenExchangeFailed.to_error_body();
        assert_eq!(body.error, "Oracle Error");
        assert_eq!(body.error_description, "Error when retrieving access token");
    }

    #[test]
    fn id_token_failures_share_one_description() {
        let invalid = OracleError::InvalidToken.to_error_body();
        let malformed = OracleError::MalformedClaim.to_error_body();
        assert_eq!(invalid, malformed);
        assert_eq!(
            invalid.error_description,
            "Data is invalid or does not fit the requirements"
        );
    }

    #[test]
    fn policy_failure_is_one_combined_message() {
        let body = OracleError::InactiveOrUnowned.to_error_body();
        assert_eq!(
            body.error_description,
            "Subscription is inactive or not owned by the logged-on user"
        );
    }
}
