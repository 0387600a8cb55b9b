//! API key generation and validation
//!
//! Raw tokens are minted here, shown once, and only their SHA-256 digest
//! is persisted. Validation failures are reported with one uniform
//! message so callers cannot distinguish unknown, disabled and expired
//! keys.

use rand::distr::{Alphanumeric, SampleString};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::warn;

use solhub_api_types::UnifiedApiKey;
use solhub_interfaces::RepositoryFactory;

use crate::errors::{RestError, RestResult};

/// Every token starts with this marker
pub const TOKEN_PREFIX: &str = "sol_";

/// Random alphanumeric characters after the marker, just over 256 bits
const TOKEN_RANDOM_LEN: usize = 43;

/// Characters of the full token kept for display in listings
const DISPLAY_PREFIX_LEN: usize = 12;

/// The message returned for every failed validation
pub const INVALID_KEY_MESSAGE: &str = "Invalid API key";

/// A freshly minted token with the fields storage needs
pub struct MintedKey {
    /// Full raw token, surfaced exactly once in the creation response
    pub token: String,
    /// SHA-256 hex digest, the only persisted form
    pub hash: String,
    /// Display prefix for listings
    pub prefix: String,
}

/// Generate a new raw token from the OS RNG
pub fn mint_key() -> MintedKey {
    let random = Alphanumeric.sample_string(&mut rand::rng(), TOKEN_RANDOM_LEN);
    let token = format!("{}{}", TOKEN_PREFIX, random);
    let hash = hash_token(&token);
    let prefix = token[..DISPLAY_PREFIX_LEN].to_string();
    MintedKey { token, hash, prefix }
}

/// SHA-256 hex digest of a raw token
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Validate a presented token and resolve the key it belongs to.
///
/// On success the key's `last_used` is updated off the request path;
/// a failed touch is logged and ignored.
pub async fn validate_and_resolve(
    repositories: Arc<dyn RepositoryFactory>,
    token: &str,
) -> RestResult<UnifiedApiKey> {
    let hash = hash_token(token);
    let key = repositories
        .api_key_repository()
        .find_valid_by_hash(&hash)
        .await?
        .ok_or_else(|| RestError::unauthorized(INVALID_KEY_MESSAGE))?;

    if let Some(key_id) = key.id.as_i32() {
        let repositories = repositories.clone();
        tokio::spawn(async move {
            if let Err(e) = repositories.api_key_repository().touch_last_used(key_id).await {
                warn!("failed to record api key use: {}", e);
            }
        });
    }

    Ok(key)
}
