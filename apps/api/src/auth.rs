//! Owner authentication.
//!
//! There is exactly one privileged operator. The owner secret is supplied to
//! the process as a SHA-256 digest and injected into the admin console as a
//! `CredentialVerifier`; login attempts are hashed and compared against it.

use std::convert::Infallible;

use anyhow::{anyhow, Context, Result};
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use sha2::{Digest, Sha256};

/// Decides whether a submitted credential is the owner's.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, candidate: &str) -> bool;
}

/// Compares the SHA-256 of a candidate against a configured digest.
pub struct Sha256Verifier {
    digest: [u8; 32],
}

impl Sha256Verifier {
    pub fn from_hex(hex_digest: &str) -> Result<Self> {
        let bytes = hex::decode(hex_digest.trim()).context("secret digest is not valid hex")?;
        let digest: [u8; 32] = bytes
            .try_into()
            .map_err(|_| anyhow!("secret digest must be 32 bytes"))?;
        Ok(Self { digest })
    }

    pub fn from_secret(secret: &str) -> Self {
        Self {
            digest: Sha256::digest(secret.as_bytes()).into(),
        }
    }
}

impl CredentialVerifier for Sha256Verifier {
    fn verify(&self, candidate: &str) -> bool {
        let candidate = Sha256::digest(candidate.as_bytes());
        constant_time_eq(candidate.as_slice(), &self.digest)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Extract bearer token from the Authorization header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// The bearer token of a request, if any. Whether it grants access is decided
/// by the admin console, not here.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(
            extract_bearer_token(&parts.headers).map(str::to_string),
        ))
    }
}
