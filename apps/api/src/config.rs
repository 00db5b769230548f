use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub store_backend: StoreBackend,
    /// Fixed key of the one content record.
    pub document_key: String,
    pub local_cache_path: PathBuf,
    /// Upper bound on one remote store call before falling back locally.
    pub remote_timeout: Duration,
    /// Hex SHA-256 of the owner secret. The plaintext never reaches the process.
    pub admin_secret_sha256: String,
}

#[derive(Debug, Clone)]
pub enum StoreBackend {
    S3(S3Settings),
    Postgres { database_url: String },
    Memory,
}

impl StoreBackend {
    pub fn name(&self) -> &'static str {
        match self {
            StoreBackend::S3(_) => "s3",
            StoreBackend::Postgres { .. } => "postgres",
            StoreBackend::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let store_backend = match optional_env("STORE_BACKEND", "s3").as_str() {
            "s3" => StoreBackend::S3(S3Settings {
                bucket: require_env("S3_BUCKET")?,
                endpoint: require_env("S3_ENDPOINT")?,
                region: optional_env("AWS_REGION", "us-east-1"),
                access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
                secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            }),
            "postgres" => StoreBackend::Postgres {
                database_url: require_env("DATABASE_URL")?,
            },
            "memory" => StoreBackend::Memory,
            other => bail!("STORE_BACKEND must be one of s3, postgres, memory (got '{other}')"),
        };

        let admin_secret_sha256 = require_env("ADMIN_SECRET_SHA256")?;
        validate_secret_digest(&admin_secret_sha256)?;

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
            store_backend,
            document_key: optional_env("DOCUMENT_KEY", "portfolio/owner"),
            local_cache_path: PathBuf::from(optional_env(
                "LOCAL_CACHE_PATH",
                "./data/portfolio_cache.json",
            )),
            remote_timeout: Duration::from_secs(
                optional_env("REMOTE_TIMEOUT_SECS", "10")
                    .parse::<u64>()
                    .context("REMOTE_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            admin_secret_sha256,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn validate_secret_digest(digest: &str) -> Result<()> {
    let bytes = hex::decode(digest).context("ADMIN_SECRET_SHA256 must be hex encoded")?;
    if bytes.len() != 32 {
        bail!("ADMIN_SECRET_SHA256 must be a SHA-256 digest (64 hex characters)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_digest_must_be_32_bytes() {
        assert!(validate_secret_digest(&"ab".repeat(32)).is_ok());
        assert!(validate_secret_digest("abcd").is_err());
        assert!(validate_secret_digest(&"zz".repeat(32)).is_err());
    }
}
