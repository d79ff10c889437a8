use std::fmt;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Validation};

use crate::config::JwtConfig;
use crate::error::ConfigError;

/// The only algorithm tokens are signed with or accepted under.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Immutable issuer/verifier context.
///
/// Built once at startup and shared (typically behind an `Arc`) by every
/// caller that mints or checks tokens. Nothing in here changes after
/// construction, so no locking is needed.
#[derive(Clone)]
pub struct JwtContext {
    pub(crate) config: JwtConfig,
    pub(crate) encoding_key: EncodingKey,
    pub(crate) decoding_key: DecodingKey,
    pub(crate) validation: Validation,
}

impl JwtContext {
    pub fn new(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        secret: impl AsRef<[u8]>,
        lifetime: Duration,
    ) -> Result<Self, ConfigError> {
        JwtConfig::new(issuer, audience, secret, lifetime).map(Self::from_config)
    }

    pub fn from_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret());
        let decoding_key = DecodingKey::from_secret(config.secret());

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = config.leeway_seconds;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // aud is compared against our own issuer after decoding.
        validation.validate_aud = false;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }
}

impl fmt::Debug for JwtContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtContext")
            .field("config", &self.config)
            .field("algorithm", &ALGORITHM)
            .finish()
    }
}
