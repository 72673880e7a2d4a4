//! Time-based one-time password authorization (RFC 6238).

use crate::domain::authorizer::Authorizer;
use totp_rs::{Algorithm, Secret, TOTP};
use tracing::warn;

/// Number of digits in a code, as shown by common authenticator apps.
const DIGITS: usize = 6;

/// Seconds each code stays valid.
const STEP_SECONDS: u64 = 30;

/// Accepted clock drift, in steps, on either side of the current one.
const SKEW_STEPS: u8 = 1;

/// Errors raised while setting up TOTP authorization.
#[derive(Debug, thiserror::Error)]
pub enum TotpError {
    #[error("TOTP secret must be non-empty base32")]
    InvalidSecret,

    #[error("system clock is before the Unix epoch: {0}")]
    Clock(#[from] std::time::SystemTimeError),
}

/// Accepts the current 6-digit SHA-1 TOTP code for a shared base32 secret.
///
/// Parameters match Google Authenticator and similar apps: 30-second steps,
/// with one step of skew allowed in each direction.
pub struct TotpAuthorizer {
    totp: TOTP,
}

impl TotpAuthorizer {
    /// Builds an authorizer from a base32 secret.
    ///
    /// Whitespace and `=` padding are ignored and lowercase is accepted, so
    /// secrets can be pasted the way authenticator apps display them.
    ///
    /// # Errors
    ///
    /// Returns [`TotpError::InvalidSecret`] if the secret is empty or not base32.
    pub fn from_base32(secret: &str) -> Result<Self, TotpError> {
        let normalized: String = secret
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '=')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if normalized.is_empty() {
            return Err(TotpError::InvalidSecret);
        }

        let bytes = Secret::Encoded(normalized)
            .to_bytes()
            .map_err(|_| TotpError::InvalidSecret)?;

        if bytes.is_empty() {
            return Err(TotpError::InvalidSecret);
        }

        Ok(Self {
            totp: TOTP::new_unchecked(Algorithm::SHA1, DIGITS, SKEW_STEPS, STEP_SECONDS, bytes),
        })
    }

    /// Code valid at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TotpError::Clock`] if the system clock is unusable.
    pub fn current_code(&self) -> Result<String, TotpError> {
        Ok(self.totp.generate_current()?)
    }

    /// Code valid at `unix_seconds`.
    pub fn code_at(&self, unix_seconds: u64) -> String {
        self.totp.generate(unix_seconds)
    }

    /// Checks `token` against the codes around `unix_seconds`.
    pub fn check_at(&self, token: &str, unix_seconds: u64) -> bool {
        self.totp.check(token.trim(), unix_seconds)
    }
}

impl Authorizer for TotpAuthorizer {
    fn is_authorized(&self, token: &str) -> bool {
        self.totp
            .check_current(token.trim())
            .unwrap_or_else(|e| {
                warn!(error = %e, "Cannot check TOTP code, system clock is invalid");
                false
            })
    }
}

/// Generates a fresh 160-bit secret, base32 encoded.
pub fn generate_secret() -> String {
    Secret::generate_secret().to_encoded().to_string()
}
