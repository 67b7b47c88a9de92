//! Maps validated CLI matches to an [`Action`].

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::tokens;
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or out of range.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;

    let token_opts = tokens::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        dsn,
        access_token_secret: token_opts.access_secret,
        access_token_ttl_seconds: token_opts.access_ttl_seconds,
        refresh_token_secret: token_opts.refresh_secret,
        refresh_token_ttl_seconds: token_opts.refresh_ttl_seconds,
    }))
}
