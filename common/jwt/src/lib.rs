//! Single-issuer HS256 token issuance and verification.
//!
//! A [`JwtContext`] is built once from trusted configuration and then used to
//! [`issue`](JwtContext::issue) tokens for a numeric subject with an opaque,
//! caller-typed payload, and to [`verify`](JwtContext::verify) them back into
//! [`Claims`].

pub mod claims;
pub mod config;
pub mod context;
pub mod error;
pub mod extractors;
mod signer;
mod verifier;

pub use claims::Claims;
pub use config::{JwtConfig, JwtSettings, MAX_LEEWAY_SECONDS};
pub use context::{JwtContext, ALGORITHM};
pub use error::{AuthError, AuthResult, ConfigError, ParseError, ValidationError};
pub use extractors::AuthContext;
