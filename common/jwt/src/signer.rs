use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Header};
use serde::Serialize;
use tracing::debug;

use crate::claims::IssuedClaims;
use crate::context::{JwtContext, ALGORITHM};
use crate::error::ValidationError;

impl JwtContext {
    /// Mint a signed token for `subject` carrying `auth` as its opaque payload.
    pub fn issue<A>(&self, subject: &str, auth: &A) -> Result<String, ValidationError>
    where
        A: Serialize + ?Sized,
    {
        self.issue_at(subject, auth, Utc::now())
    }

    /// Same as [`JwtContext::issue`] with an explicit issuance instant.
    pub fn issue_at<A>(
        &self,
        subject: &str,
        auth: &A,
        now: DateTime<Utc>,
    ) -> Result<String, ValidationError>
    where
        A: Serialize + ?Sized,
    {
        if subject.is_empty() {
            return Err(ValidationError::EmptySubject);
        }

        let expires_at = now
            .checked_add_signed(self.config.lifetime)
            .ok_or_else(|| ValidationError::Encoding("expiry out of range".to_string()))?;
        let auth =
            serde_json::to_value(auth).map_err(|err| ValidationError::Encoding(err.to_string()))?;

        let claims = IssuedClaims {
            iss: &self.config.issuer,
            aud: &self.config.audience,
            sub: subject,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            auth,
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|err| ValidationError::Encoding(err.to_string()))?;
        debug!(subject, %expires_at, "issued JWT");
        Ok(token)
    }
}
