use std::fmt;

use chrono::Duration;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::error::ConfigError;

/// Upper bound on clock-skew tolerance.
pub const MAX_LEEWAY_SECONDS: u64 = 3_600;

/// Validated trust parameters for issuing and verifying tokens.
#[derive(Clone)]
pub struct JwtConfig {
    /// Issuer claim (iss) stamped on minted tokens.
    pub issuer: String,
    /// Audience claim (aud) stamped on minted tokens.
    pub audience: String,
    /// Lifetime added to the issuance instant to produce exp.
    pub lifetime: Duration,
    /// Allowable clock skew in seconds when validating exp/nbf/iat.
    pub leeway_seconds: u64,
    secret: Zeroizing<Vec<u8>>,
}

impl JwtConfig {
    /// Validate and build a config with no leeway.
    pub fn new(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        secret: impl AsRef<[u8]>,
        lifetime: Duration,
    ) -> Result<Self, ConfigError> {
        let issuer = issuer.into();
        if issuer.is_empty() {
            return Err(ConfigError::EmptyIssuer);
        }

        let audience = audience.into();
        if audience.is_empty() {
            return Err(ConfigError::EmptyAudience);
        }

        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        if lifetime <= Duration::zero() {
            return Err(ConfigError::NonPositiveLifetime);
        }

        Ok(Self {
            issuer,
            audience,
            lifetime,
            leeway_seconds: 0,
            secret: Zeroizing::new(secret.to_vec()),
        })
    }

    /// Adjust the allowed leeway, up to [`MAX_LEEWAY_SECONDS`].
    pub fn with_leeway(mut self, seconds: u64) -> Result<Self, ConfigError> {
        if seconds > MAX_LEEWAY_SECONDS {
            return Err(ConfigError::LeewayOutOfRange(seconds));
        }
        self.leeway_seconds = seconds;
        Ok(self)
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("lifetime", &self.lifetime)
            .field("leeway_seconds", &self.leeway_seconds)
            .field("secret", &"[redacted]")
            .finish()
    }
}

/// Raw settings as loaded by the embedding service (file, env, secrets store).
#[derive(Deserialize)]
pub struct JwtSettings {
    pub issuer: String,
    pub audience: String,
    pub secret: String,
    pub lifetime_seconds: i64,
    #[serde(default)]
    pub leeway_seconds: u64,
}

impl TryFrom<JwtSettings> for JwtConfig {
    type Error = ConfigError;

    fn try_from(value: JwtSettings) -> Result<Self, ConfigError> {
        let secret = Zeroizing::new(value.secret);
        let lifetime = Duration::try_seconds(value.lifetime_seconds)
            .ok_or(ConfigError::LifetimeOutOfRange(value.lifetime_seconds))?;
        let config = JwtConfig::new(value.issuer, value.audience, secret.as_bytes(), lifetime)?;
        config.with_leeway(value.leeway_seconds)
    }
}
