//! Access and refresh token issuance (HS256 JWT).
//!
//! Secrets and lifetimes come from an injected [`TokenConfig`]; nothing here
//! reads the environment.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    get_current_timestamp,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use super::model::CompanyAccount;

/// Value of `token_type` in login responses.
pub const TOKEN_TYPE: &str = "Bearer";

const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: u64 = 24 * 60 * 60;
const DEFAULT_REFRESH_TOKEN_TTL_SECONDS: u64 = 10 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),
    #[error("failed to verify token: {0}")]
    Verify(#[source] jsonwebtoken::errors::Error),
}

#[derive(Clone)]
pub struct TokenConfig {
    access_secret: SecretString,
    access_ttl_seconds: u64,
    refresh_secret: SecretString,
    refresh_ttl_seconds: u64,
}

impl TokenConfig {
    #[must_use]
    pub fn new(access_secret: SecretString, refresh_secret: SecretString) -> Self {
        Self {
            access_secret,
            access_ttl_seconds: DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
            refresh_secret,
            refresh_ttl_seconds: DEFAULT_REFRESH_TOKEN_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_access_ttl_seconds(mut self, seconds: u64) -> Self {
        self.access_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_refresh_ttl_seconds(mut self, seconds: u64) -> Self {
        self.refresh_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn access_ttl_seconds(&self) -> u64 {
        self.access_ttl_seconds
    }

    #[must_use]
    pub fn refresh_ttl_seconds(&self) -> u64 {
        self.refresh_ttl_seconds
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("access_secret", &"***")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_secret", &"***")
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish()
    }
}

/// Claims carried by access tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub sub: Uuid,
    pub owner_email: String,
    pub roll_no: String,
    pub owner_name: String,
    pub iat: u64,
    pub exp: u64,
}

/// Claims carried by refresh tokens: the account id only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Uuid,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Debug)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64,
}

/// Signs and verifies company tokens with keys derived once from [`TokenConfig`].
pub struct TokenIssuer {
    config: TokenConfig,
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    validation: Validation,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(config: TokenConfig) -> Self {
        let access_secret = config.access_secret.expose_secret().as_bytes();
        let refresh_secret = config.refresh_secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            access_encoding: EncodingKey::from_secret(access_secret),
            access_decoding: DecodingKey::from_secret(access_secret),
            refresh_encoding: EncodingKey::from_secret(refresh_secret),
            validation,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Sign an access token embedding the account id and owner identity.
    ///
    /// # Errors
    /// Returns an error if signing fails.
    pub fn issue_access_token(&self, account: &CompanyAccount) -> Result<IssuedToken, TokenError> {
        let iat = get_current_timestamp();
        let expires_in = self.config.access_ttl_seconds;
        let claims = AccessClaims {
            sub: account.id,
            owner_email: account.owner_email.clone(),
            roll_no: account.roll_no.clone(),
            owner_name: account.owner_name.clone(),
            iat,
            exp: iat.saturating_add(expires_in),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.access_encoding)
            .map_err(TokenError::Sign)?;
        Ok(IssuedToken { token, expires_in })
    }

    /// Sign a refresh token embedding only the account id.
    ///
    /// # Errors
    /// Returns an error if signing fails.
    pub fn issue_refresh_token(&self, account_id: Uuid) -> Result<IssuedToken, TokenError> {
        let iat = get_current_timestamp();
        let expires_in = self.config.refresh_ttl_seconds;
        let claims = RefreshClaims {
            sub: account_id,
            iat,
            exp: iat.saturating_add(expires_in),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.refresh_encoding)
            .map_err(TokenError::Sign)?;
        Ok(IssuedToken { token, expires_in })
    }

    /// Verify signature and expiry of an access token and return its claims.
    ///
    /// # Errors
    /// Returns an error for malformed, expired, or foreign-signed tokens.
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        decode::<AccessClaims>(token, &self.access_decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Verify)
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
