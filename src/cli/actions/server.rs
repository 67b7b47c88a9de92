use crate::{
    api,
    company::{TokenConfig, TokenIssuer},
};
use anyhow::Result;
use secrecy::SecretString;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub access_token_secret: SecretString,
    pub access_token_ttl_seconds: u64,
    pub refresh_token_secret: SecretString,
    pub refresh_token_ttl_seconds: u64,
}

impl Args {
    fn token_config(&self) -> TokenConfig {
        TokenConfig::new(
            self.access_token_secret.clone(),
            self.refresh_token_secret.clone(),
        )
        .with_access_ttl_seconds(self.access_token_ttl_seconds)
        .with_refresh_ttl_seconds(self.refresh_token_ttl_seconds)
    }
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let config = args.token_config();
    debug!(?config, "token configuration");

    let issuer = Arc::new(TokenIssuer::new(config));

    api::new(args.port, args.dsn, issuer).await
}
