//! Bearer-token authentication for chunk submissions.
//!
//! Authentication is optional. When no [`KeyValidator`] is configured every
//! submission is accepted; otherwise the `Authorization: Bearer <token>`
//! header must be present and the token must validate.

use std::collections::HashSet;

use async_trait::async_trait;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use crate::error::IngestError;

/// Capability that answers "is this key valid?".
#[async_trait]
pub trait KeyValidator: Send + Sync {
    async fn validate(&self, token: &str) -> bool;
}

/// Validates against a fixed set of API keys loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticKeyValidator {
    keys: HashSet<String>,
}

impl StaticKeyValidator {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys
                .into_iter()
                .map(Into::into)
                .filter(|k: &String| !k.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

#[async_trait]
impl KeyValidator for StaticKeyValidator {
    async fn validate(&self, token: &str) -> bool {
        self.keys.contains(token)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively (RFC 6750). Returns `None` for a
/// missing header, a different scheme, a non-ASCII value or an empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            let scheme = v.get(..7)?;
            if scheme.eq_ignore_ascii_case("bearer ") {
                Some(&v[7..])
            } else {
                None
            }
        })
        .filter(|token| !token.is_empty())
}

/// Gate a request on the configured validator.
///
/// No validator means authentication is disabled.
pub async fn authenticate(
    validator: Option<&dyn KeyValidator>,
    headers: &HeaderMap,
) -> Result<(), IngestError> {
    let Some(validator) = validator else {
        return Ok(());
    };

    let token = extract_bearer_token(headers).ok_or(IngestError::Unauthenticated)?;

    if validator.validate(token).await {
        Ok(())
    } else {
        Err(IngestError::InvalidCredential)
    }
}
