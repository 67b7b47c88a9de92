use axum::{
    extract::Extension,
    http::{HeaderMap, header::SET_COOKIE},
};
use tracing::{info, instrument};

use super::cookies::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, clear_cookie};
use crate::{
    api::{
        error::ApiError,
        response::{ApiResponse, Empty},
    },
    company::{CompanyProfile, SharedStore},
};

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Refresh token cleared and cookies expired", body = ApiResponse<Empty>),
        (status = 401, description = "Missing or invalid access token", body = crate::api::error::ErrorBody),
    ),
    security(("access_token" = [])),
    tag = "company"
)]
#[instrument(skip_all)]
pub async fn logout(
    Extension(company): Extension<CompanyProfile>,
    store: Extension<SharedStore>,
) -> Result<(HeaderMap, ApiResponse<Empty>), ApiError> {
    store
        .set_refresh_token(company.id, None)
        .await
        .map_err(|err| ApiError::internal("Error clearing refresh token", err))?;

    let mut headers = HeaderMap::new();
    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
        let cookie =
            clear_cookie(name).map_err(|err| ApiError::internal("Error clearing cookies", err))?;
        headers.append(SET_COOKIE, cookie);
    }

    info!(company_id = %company.id, "company logged out");

    Ok((headers, ApiResponse::ok(Empty {}, "Company logged out")))
}
