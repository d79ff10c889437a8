use chrono::Utc;
use jsonwebtoken::decode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::claims::{parse_subject_id, timestamp, Claims, ClaimsRepr};
use crate::context::JwtContext;
use crate::error::ParseError;

impl JwtContext {
    /// Verify `token` and decode its opaque payload into `A`.
    ///
    /// Checks run in a fixed order and stop at the first failure: structure,
    /// algorithm and signature, then exp/nbf/iat, then audience, then subject,
    /// then the payload decode. The audience must equal this context's own
    /// issuer, since the context is both minter and sole consumer of its
    /// tokens.
    pub fn verify<A>(&self, token: &str) -> Result<Claims<A>, ParseError>
    where
        A: DeserializeOwned,
    {
        match self.verify_claims(token) {
            Ok(claims) => {
                debug!(subject = %claims.subject, "verified JWT successfully");
                Ok(claims)
            }
            Err(err) => {
                debug!(error = %err, "rejected JWT");
                Err(err)
            }
        }
    }

    /// Yes/no variant of [`JwtContext::verify`].
    pub fn check<A>(&self, token: &str) -> Result<(), ParseError>
    where
        A: DeserializeOwned,
    {
        self.verify::<A>(token).map(|_| ())
    }

    fn verify_claims<A>(&self, token: &str) -> Result<Claims<A>, ParseError>
    where
        A: DeserializeOwned,
    {
        let token_data = decode::<ClaimsRepr>(token, &self.decoding_key, &self.validation)?;
        let repr = token_data.claims;

        let exp = repr
            .exp
            .ok_or_else(|| ParseError::MissingClaim("exp".to_string()))?;
        let iat = repr.iat.ok_or_else(|| ParseError::MissingClaim("iat".to_string()))?;
        let leeway = i64::try_from(self.config.leeway_seconds).unwrap_or(i64::MAX);
        if iat > Utc::now().timestamp().saturating_add(leeway) {
            return Err(ParseError::IssuedInFuture);
        }

        let audience = repr
            .aud
            .as_ref()
            .and_then(|aud| aud.matching(&self.config.issuer))
            .ok_or_else(|| ParseError::AudienceMismatch {
                expected: self.config.issuer.clone(),
            })?
            .to_owned();

        let subject_id = parse_subject_id(&repr.sub)?;

        let auth = serde_json::from_value(repr.auth.unwrap_or(Value::Null))
            .map_err(|err| ParseError::AuthPayload(err.to_string()))?;

        Ok(Claims {
            issuer: repr.iss,
            audience,
            subject: repr.sub,
            subject_id,
            issued_at: timestamp("iat", iat)?,
            expires_at: timestamp("exp", exp)?,
            not_before: repr.nbf.map(|nbf| timestamp("nbf", nbf)).transpose()?,
            auth,
        })
    }
}
