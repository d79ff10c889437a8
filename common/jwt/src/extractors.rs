use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header::AUTHORIZATION, request::Parts, HeaderMap};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::claims::Claims;
use crate::context::JwtContext;
use crate::error::{AuthError, AuthResult};

/// Caller identity established from an `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthContext<A> {
    pub claims: Claims<A>,
    pub token: String,
}

impl<A> AuthContext<A>
where
    A: DeserializeOwned,
{
    /// Verify the bearer token carried by `headers` against `context`.
    pub fn authenticate(context: &JwtContext, headers: &HeaderMap) -> AuthResult<Self> {
        let token = bearer_token(headers)?;
        let claims = context.verify(token).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            AuthError::Parse(err)
        })?;

        Ok(Self {
            claims,
            token: token.to_owned(),
        })
    }
}

impl<A> AuthContext<A> {
    pub fn subject_id(&self) -> i64 {
        self.claims.subject_id
    }

    pub fn into_claims(self) -> Claims<A> {
        self.claims
    }
}

#[async_trait]
impl<S, A> FromRequestParts<S> for AuthContext<A>
where
    Arc<JwtContext>: FromRef<S>,
    S: Send + Sync,
    A: DeserializeOwned + Send,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let context = Arc::<JwtContext>::from_ref(state);
        Self::authenticate(&context, &parts.headers)
    }
}

/// Token portion of the `Authorization` header. The scheme is matched
/// case-insensitively.
fn bearer_token(headers: &HeaderMap) -> AuthResult<&str> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthorization)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorization)?;

    match value.trim().split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
            let token = token.trim();
            if token.is_empty() || token.contains(' ') {
                Err(AuthError::InvalidAuthorization)
            } else {
                Ok(token)
            }
        }
        _ => Err(AuthError::InvalidAuthorization),
    }
}
