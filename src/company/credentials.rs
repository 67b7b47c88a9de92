//! Client credential generation and access-code hashing.
//!
//! bcrypt is CPU bound, so hashing and verification run on the blocking pool.

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;
use uuid::Uuid;

/// bcrypt work factor for stored access codes.
pub const ACCESS_CODE_HASH_COST: u32 = 10;

const CLIENT_SECRET_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to generate client secret: {0}")]
    Rng(#[from] rand::Error),
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Freshly minted client credentials. The secret is only ever returned here;
/// callers persist [`digest_client_secret`] of it.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: Uuid,
    pub client_secret: String,
}

/// Generate a random client id (`UUIDv4`) and a 256-bit hex client secret.
///
/// # Errors
/// Returns an error if the OS random source fails.
pub fn generate_client_credentials() -> Result<ClientCredentials, CredentialError> {
    let mut bytes = [0u8; CLIENT_SECRET_BYTES];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(ClientCredentials {
        client_id: Uuid::new_v4(),
        client_secret: hex::encode(bytes),
    })
}

/// Digest a client secret so raw values never touch the database.
pub fn digest_client_secret(client_secret: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(client_secret.as_bytes());
    hasher.finalize().to_vec()
}

/// Compare a presented client secret against the stored digest in constant time.
pub fn client_secret_matches(client_secret: &str, stored_digest: &[u8]) -> bool {
    digest_client_secret(client_secret)
        .as_slice()
        .ct_eq(stored_digest)
        .into()
}

/// Hash an access code with bcrypt.
///
/// # Errors
/// Returns an error if bcrypt fails or the blocking task is cancelled.
pub async fn hash_access_code(access_code: String) -> Result<String, CredentialError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(access_code, ACCESS_CODE_HASH_COST))
        .await??;
    Ok(hash)
}

/// Verify an access code against a stored bcrypt hash.
///
/// # Errors
/// Returns an error if the stored hash is malformed or the blocking task is cancelled.
pub async fn verify_access_code(
    access_code: String,
    access_code_hash: String,
) -> Result<bool, CredentialError> {
    let valid =
        tokio::task::spawn_blocking(move || bcrypt::verify(access_code, &access_code_hash))
            .await??;
    Ok(valid)
}
