//! Startup configuration
//!
//! All secrets and endpoints are read once from the environment into an
//! immutable [`OracleConfig`] passed into the orchestrator's constructor;
//! no component performs ambient lookups. Invalid or missing key material
//! must abort startup; the oracle never serves requests without it.

use std::env;

/// Environment variable names, shared with the deployment manifests
const PAYPAL_CLIENT_ID: &str = "PayPalClientID";
const PAYPAL_SECRET: &str = "PayPalSecret";
const PAYPAL_BASE_URL: &str = "PayPalBasedAPIURL";
const GOOGLE_CLIENT_ID: &str = "GoogleClientID";
const GOOGLE_TOKENINFO_URL: &str = "GoogleTokenInfoURL";
const ORACLE_PRIVATE_KEY: &str = "OraclePrivateKey";
const RETRIES_NUMBER: &str = "RetriesNumber";

const DEFAULT_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";
const DEFAULT_RETRIES: u32 = 1;

/// Configuration load failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is absent or empty
    #[error("missing required environment variable `{0}`")]
    MissingVar(&'static str),

    /// A variable is present but unusable
    #[error("invalid value for `{name}`: {reason}")]
    InvalidVar {
        /// Variable name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Immutable oracle configuration
///
/// The private key is held as the raw hex string only until key material is
/// constructed; it is never logged (no `Debug` on this type).
#[derive(Clone)]
pub struct OracleConfig {
    /// OAuth2 client id for the billing provider
    pub paypal_client_id: String,
    /// OAuth2 client secret for the billing provider
    pub paypal_client_secret: String,
    /// Base URL of the billing provider API
    pub paypal_base_url: String,
    /// Expected audience of Google ID tokens
    pub google_client_id: String,
    /// Token verification endpoint of the identity provider
    pub google_tokeninfo_url: String,
    /// Hex-encoded oracle private scalar
    pub private_key_hex: String,
    /// Bounded retry count for 500/503 upstream responses
    pub max_retries: u32,
}

impl OracleConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            paypal_client_id: required(PAYPAL_CLIENT_ID)?,
            paypal_client_secret: required(PAYPAL_SECRET)?,
            paypal_base_url: required(PAYPAL_BASE_URL)?.trim_end_matches('/').to_string(),
            google_client_id: required(GOOGLE_CLIENT_ID)?,
            google_tokeninfo_url: env::var(GOOGLE_TOKENINFO_URL)
                .unwrap_or_else(|_| DEFAULT_TOKENINFO_URL.to_string()),
            private_key_hex: required(ORACLE_PRIVATE_KEY)?,
            max_retries: retries()?,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

fn retries() -> Result<u32, ConfigError> {
    match env::var(RETRIES_NUMBER) {
        Err(_) => Ok(DEFAULT_RETRIES),
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidVar {
            name: RETRIES_NUMBER,
            reason: format!("`{raw}` is not an unsigned integer"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment-variable tests mutate process state; each one uses its
    // own variable names via the helpers below to stay independent.

    #[test]
    fn missing_variable_is_reported_by_name() {
        env::remove_var(PAYPAL_CLIENT_ID);
        let err = required(PAYPAL_CLIENT_ID).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(PAYPAL_CLIENT_ID));
    }

    #[test]
    fn blank_variable_counts_as_missing() {
        env::set_var(GOOGLE_CLIENT_ID, "   ");
        let err = required(GOOGLE_CLIENT_ID).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(GOOGLE_CLIENT_ID));
        env::remove_var(GOOGLE_CLIENT_ID);
    }

    #[test]
    fn retries_default_when_unset() {
        env::remove_var(RETRIES_NUMBER);
        assert_eq!(retries().unwrap(), DEFAULT_RETRIES);
    }

    #[test]
    fn non_numeric_retries_are_rejected() {
        env::set_var(RETRIES_NUMBER, "many");
        assert!(matches!(
            retries().unwrap_err(),
            ConfigError::InvalidVar { name: RETRIES_NUMBER, .. }
        ));
        env::remove_var(RETRIES_NUMBER);
    }
}
