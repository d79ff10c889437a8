use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;

/// Application-focused representation of verified JWT claims.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claims<A> {
    pub issuer: String,
    pub audience: String,
    pub subject: String,
    /// Principal id parsed from `subject`; always positive.
    pub subject_id: i64,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub not_before: Option<DateTime<Utc>>,
    pub auth: A,
}

/// Payload written into minted tokens.
#[derive(Debug, Serialize)]
pub(crate) struct IssuedClaims<'a> {
    pub iss: &'a str,
    pub aud: &'a str,
    pub sub: &'a str,
    pub iat: i64,
    pub exp: i64,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub auth: Value,
}

/// Payload as read back from a token whose signature already checked out.
#[derive(Debug, Deserialize)]
pub(crate) struct ClaimsRepr {
    #[serde(default)]
    pub iss: String,
    #[serde(default)]
    pub aud: Option<AudienceRepr>,
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub iat: Option<i64>,
    // Optional so jsonwebtoken's required-claim check reports a missing exp.
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub nbf: Option<i64>,
    #[serde(default)]
    pub auth: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum AudienceRepr {
    Single(String),
    Many(Vec<String>),
}

impl AudienceRepr {
    /// Returns the entry equal to `expected`, if any.
    pub fn matching(&self, expected: &str) -> Option<&str> {
        match self {
            AudienceRepr::Single(item) => (item == expected).then_some(item.as_str()),
            AudienceRepr::Many(items) => items
                .iter()
                .find(|item| *item == expected)
                .map(String::as_str),
        }
    }
}

pub(crate) fn parse_subject_id(subject: &str) -> Result<i64, ParseError> {
    if subject.is_empty() {
        return Err(ParseError::MissingSubject);
    }

    match subject.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ParseError::BadSubject(subject.to_owned())),
    }
}

pub(crate) fn timestamp(claim: &'static str, value: i64) -> Result<DateTime<Utc>, ParseError> {
    Utc.timestamp_opt(value, 0)
        .single()
        .ok_or_else(|| ParseError::Malformed(format!("claim '{claim}' out of range: {value}")))
}
