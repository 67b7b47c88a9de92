use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_ACCESS_TOKEN_SECRET: &str = "access-token-secret";
pub const ARG_ACCESS_TOKEN_TTL_SECONDS: &str = "access-token-ttl-seconds";
pub const ARG_REFRESH_TOKEN_SECRET: &str = "refresh-token-secret";
pub const ARG_REFRESH_TOKEN_TTL_SECONDS: &str = "refresh-token-ttl-seconds";

#[derive(Debug)]
pub struct Options {
    pub access_secret: SecretString,
    pub access_ttl_seconds: u64,
    pub refresh_secret: SecretString,
    pub refresh_ttl_seconds: u64,
}

impl Options {
    /// Parse token signing options.
    ///
    /// # Errors
    /// Returns an error if a secret is missing or blank, or a TTL is zero.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let read_secret = |id: &str| -> anyhow::Result<SecretString> {
            matches
                .get_one::<String>(id)
                .filter(|v| !v.trim().is_empty())
                .map(|v| SecretString::from(v.as_str()))
                .ok_or_else(|| anyhow::anyhow!("missing required argument: --{id}"))
        };
        let read_ttl = |id: &str| -> anyhow::Result<u64> {
            match matches.get_one::<u64>(id).copied() {
                Some(0) => anyhow::bail!("--{id} must be at least 1 second"),
                Some(seconds) => Ok(seconds),
                None => anyhow::bail!("missing required argument: --{id}"),
            }
        };

        Ok(Self {
            access_secret: read_secret(ARG_ACCESS_TOKEN_SECRET)?,
            access_ttl_seconds: read_ttl(ARG_ACCESS_TOKEN_TTL_SECONDS)?,
            refresh_secret: read_secret(ARG_REFRESH_TOKEN_SECRET)?,
            refresh_ttl_seconds: read_ttl(ARG_REFRESH_TOKEN_TTL_SECONDS)?,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_ACCESS_TOKEN_SECRET)
                .long(ARG_ACCESS_TOKEN_SECRET)
                .help("HS256 secret used to sign access tokens")
                .env("TESSERA_ACCESS_TOKEN_SECRET")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_ACCESS_TOKEN_TTL_SECONDS)
                .long(ARG_ACCESS_TOKEN_TTL_SECONDS)
                .help("Access token lifetime in seconds")
                .env("TESSERA_ACCESS_TOKEN_TTL_SECONDS")
                .default_value("86400")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_REFRESH_TOKEN_SECRET)
                .long(ARG_REFRESH_TOKEN_SECRET)
                .help("HS256 secret used to sign refresh tokens")
                .env("TESSERA_REFRESH_TOKEN_SECRET")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_REFRESH_TOKEN_TTL_SECONDS)
                .long(ARG_REFRESH_TOKEN_TTL_SECONDS)
                .help("Refresh token lifetime in seconds")
                .env("TESSERA_REFRESH_TOKEN_TTL_SECONDS")
                .default_value("864000")
                .value_parser(clap::value_parser!(u64)),
        )
}
