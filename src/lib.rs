//! # Tessera (Company Credential Issuance)
//!
//! `tessera` lets organizations ("companies") self-register and obtain
//! machine credentials, then log in to receive short-lived access tokens.
//!
//! ## Account Model
//!
//! Each company account is keyed by its owner email and by a generated client
//! identifier; both are unique across the service.
//!
//! - **Access Code:** the login secret. Only a bcrypt hash is persisted and
//!   verification goes through `bcrypt::verify`.
//! - **Client Secret:** 32 random bytes, hex encoded, shown exactly once at
//!   registration. The database keeps a SHA-256 digest.
//! - **Refresh Token:** the latest refresh token is stored on the record,
//!   replaced on every login and cleared on logout.
//!
//! ## Tokens
//!
//! Access and refresh tokens are HS256 JWTs signed with independent secrets
//! that are injected at startup through [`company::tokens::TokenConfig`].
//! Both are set as `HttpOnly; Secure` cookies; the access token is also
//! returned in the login response body for bearer use.

pub mod api;
pub mod cli;
pub mod company;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
