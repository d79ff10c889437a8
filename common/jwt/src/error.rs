use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use jsonwebtoken::errors::ErrorKind;
use serde::Serialize;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

/// Rejected construction arguments; each variant names the offending field.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("issuer must not be an empty string")]
    EmptyIssuer,
    #[error("audience must not be an empty string")]
    EmptyAudience,
    #[error("secret must not be empty")]
    EmptySecret,
    #[error("lifetime must be greater than zero")]
    NonPositiveLifetime,
    #[error("lifetime of {0} seconds is out of range")]
    LifetimeOutOfRange(i64),
    #[error("leeway of {0} seconds exceeds the allowed maximum")]
    LeewayOutOfRange(u64),
}

/// Rejected issuance arguments.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("empty subject")]
    EmptySubject,
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

/// Verification failures. Any variant means the caller is unauthenticated;
/// the distinction exists for diagnostics only.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("token signature mismatch")]
    SignatureMismatch,
    #[error("token algorithm does not match HS256")]
    AlgorithmMismatch,
    #[error("token missing required claim '{0}'")]
    MissingClaim(String),
    #[error("expired")]
    Expired,
    #[error("token not valid yet")]
    NotYetValid,
    #[error("token issued in the future")]
    IssuedInFuture,
    #[error("audience mismatch: expected '{expected}'")]
    AudienceMismatch { expected: String },
    #[error("missing subject")]
    MissingSubject,
    #[error("bad subject '{0}'")]
    BadSubject(String),
    #[error("failed to decode auth payload: {0}")]
    AuthPayload(String),
}

impl From<jsonwebtoken::errors::Error> for ParseError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        match value.kind() {
            ErrorKind::InvalidSignature => Self::SignatureMismatch,
            ErrorKind::InvalidAlgorithm => Self::AlgorithmMismatch,
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::ImmatureSignature => Self::NotYetValid,
            ErrorKind::MissingRequiredClaim(claim) => Self::MissingClaim(claim.clone()),
            _ => Self::Malformed(value.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("authorization header missing")]
    MissingAuthorization,
    #[error("authorization header malformed")]
    InvalidAuthorization,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::MissingAuthorization | AuthError::InvalidAuthorization => {
                (StatusCode::UNAUTHORIZED, "AUTH_HEADER")
            }
            AuthError::Parse(_) => (StatusCode::UNAUTHORIZED, "AUTH_TOKEN"),
            AuthError::Validation(_) => (StatusCode::BAD_REQUEST, "AUTH_CLAIMS"),
        };

        let body = ErrorBody {
            code,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
