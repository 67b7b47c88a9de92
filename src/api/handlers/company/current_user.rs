use axum::extract::Extension;

use crate::{api::response::ApiResponse, company::CompanyProfile};

#[utoipa::path(
    get,
    path = "/current-user",
    responses(
        (status = 200, description = "Profile of the authenticated company", body = ApiResponse<CompanyProfile>),
        (status = 401, description = "Missing or invalid access token", body = crate::api::error::ErrorBody),
    ),
    security(("access_token" = [])),
    tag = "company"
)]
// Echoes the identity resolved by the gate.
pub async fn current_user(
    Extension(company): Extension<CompanyProfile>,
) -> ApiResponse<CompanyProfile> {
    ApiResponse::ok(company, "Company fetched successfully")
}
