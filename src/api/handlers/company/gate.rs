//! Authentication gate for protected company routes.
//!
//! Flow Overview: read the access token (cookie, then bearer header), verify
//! it, resolve the embedded account id, and attach the [`CompanyProfile`] to
//! the request. Every failure ends the request with `401`, except store
//! errors which surface as `500`.

use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use super::cookies::extract_access_token;
use crate::{
    api::error::ApiError,
    company::{CompanyProfile, SharedStore, TokenIssuer},
};

const INVALID_ACCESS_TOKEN: &str = "Invalid access token";

/// Middleware for `axum::middleware::from_fn`. Requires `SharedStore` and
/// `Arc<TokenIssuer>` extensions to be layered outside of it.
pub async fn require_company(
    Extension(store): Extension<SharedStore>,
    Extension(issuer): Extension<Arc<TokenIssuer>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let profile = authenticate(request.headers(), &store, &issuer).await?;
    request.extensions_mut().insert(profile);
    Ok(next.run(request).await)
}

async fn authenticate(
    headers: &axum::http::HeaderMap,
    store: &SharedStore,
    issuer: &TokenIssuer,
) -> Result<CompanyProfile, ApiError> {
    let Some(token) = extract_access_token(headers) else {
        return Err(ApiError::Unauthorized("Unauthorized request"));
    };

    let claims = issuer.verify_access_token(&token).map_err(|err| {
        debug!("rejecting access token: {err}");
        ApiError::Unauthorized(INVALID_ACCESS_TOKEN)
    })?;

    match store.find_by_id(claims.sub).await {
        Ok(Some(account)) => Ok(account.profile()),
        Ok(None) => {
            debug!(company_id = %claims.sub, "access token for unknown company");
            Err(ApiError::Unauthorized(INVALID_ACCESS_TOKEN))
        }
        Err(err) => Err(ApiError::internal("Error resolving company", err)),
    }
}
