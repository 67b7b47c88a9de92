use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, header::SET_COOKIE},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    cookies::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, token_cookie},
    types::{LoginRequest, LoginResponse},
    utils::{normalize_email, required, required_secret},
};
use crate::{
    api::{error::ApiError, response::ApiResponse},
    company::{
        CompanyAccount, SharedStore, TokenIssuer,
        credentials::{client_secret_matches, verify_access_code},
        tokens::TOKEN_TYPE,
    },
};

const UNKNOWN_COMPANY: &str = "Company does not exist or Please Provide Valid Email or ClientId";
const TOKEN_FAILURE: &str = "Something went wrong while generating refresh and access tokens";

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; accessToken and refreshToken cookies are set", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Missing or blank fields", body = crate::api::error::ErrorBody),
        (status = 401, description = "Invalid access code or client secret", body = crate::api::error::ErrorBody),
        (status = 404, description = "No company matches the owner email and client id", body = crate::api::error::ErrorBody),
    ),
    tag = "company"
)]
#[instrument(skip(store, issuer, payload))]
pub async fn login(
    store: Extension<SharedStore>,
    issuer: Extension<Arc<TokenIssuer>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<(HeaderMap, ApiResponse<LoginResponse>), ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::BadRequest("Missing payload"));
    };

    // Company name, owner name and roll number are required but not matched
    // against the record; the lookup key is owner email + client id.
    let (
        Some(_company_name),
        Some(_owner_name),
        Some(_roll_no),
        Some(owner_email),
        Some(access_code),
        Some(client_id),
        Some(client_secret),
    ) = (
        required(request.company_name.as_ref()),
        required(request.owner_name.as_ref()),
        required(request.roll_no.as_ref()),
        required(request.owner_email.as_ref()),
        required_secret(request.access_code.as_ref()),
        required(request.client_id.as_ref()),
        required_secret(request.client_secret.as_ref()),
    )
    else {
        return Err(ApiError::BadRequest("All fields are required"));
    };

    // A malformed client id cannot match any record.
    let Ok(client_id) = Uuid::parse_str(client_id) else {
        return Err(ApiError::NotFound(UNKNOWN_COMPANY));
    };
    let owner_email = normalize_email(owner_email);

    let account = match store.find_by_credentials(&owner_email, client_id).await {
        Ok(Some(account)) => account,
        Ok(None) => return Err(ApiError::NotFound(UNKNOWN_COMPANY)),
        Err(err) => return Err(ApiError::internal("Error looking up company", err)),
    };

    // Secret first: a wrong secret must not reveal whether the access code matched.
    if !client_secret_matches(client_secret, &account.client_secret_hash) {
        warn!(company_id = %account.id, "invalid client secret");
        return Err(ApiError::Unauthorized("Invalid client credentials"));
    }

    let access_code_valid =
        verify_access_code(access_code.to_string(), account.access_code_hash.clone())
            .await
            .map_err(|err| ApiError::internal("Error verifying access code", err))?;
    if !access_code_valid {
        warn!(company_id = %account.id, "invalid access code");
        return Err(ApiError::Unauthorized("Invalid access code"));
    }

    let tokens = issue_token_pair(&store, &issuer, &account)
        .await
        .map_err(|err| ApiError::internal(TOKEN_FAILURE, err))?;

    let mut headers = HeaderMap::new();
    let access_cookie = token_cookie(ACCESS_TOKEN_COOKIE, &tokens.access_token, tokens.access_ttl)
        .map_err(|err| ApiError::internal(TOKEN_FAILURE, err))?;
    let refresh_cookie =
        token_cookie(REFRESH_TOKEN_COOKIE, &tokens.refresh_token, tokens.refresh_ttl)
            .map_err(|err| ApiError::internal(TOKEN_FAILURE, err))?;
    headers.append(SET_COOKIE, access_cookie);
    headers.append(SET_COOKIE, refresh_cookie);

    info!(company_id = %account.id, "company logged in");

    Ok((
        headers,
        ApiResponse::ok(
            LoginResponse {
                token_type: TOKEN_TYPE.to_string(),
                access_token: tokens.access_token,
                expires_in: tokens.access_ttl,
            },
            "Company logged in successfully",
        ),
    ))
}

struct TokenPair {
    access_token: String,
    access_ttl: u64,
    refresh_token: String,
    refresh_ttl: u64,
}

/// Sign both tokens and persist the refresh token on the account.
async fn issue_token_pair(
    store: &SharedStore,
    issuer: &TokenIssuer,
    account: &CompanyAccount,
) -> anyhow::Result<TokenPair> {
    let access = issuer.issue_access_token(account)?;
    let refresh = issuer.issue_refresh_token(account.id)?;

    store
        .set_refresh_token(account.id, Some(&refresh.token))
        .await?;

    Ok(TokenPair {
        access_token: access.token,
        access_ttl: access.expires_in,
        refresh_token: refresh.token,
        refresh_ttl: refresh.expires_in,
    })
}
