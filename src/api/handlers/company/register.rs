use axum::{Json, extract::Extension, http::StatusCode};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::{
    types::{RegisterRequest, RegisterResponse},
    utils::{normalize_email, required, required_secret, valid_email},
};
use crate::{
    api::{error::ApiError, response::ApiResponse},
    company::{
        NewCompany, SharedStore, StoreError,
        credentials::{digest_client_secret, generate_client_credentials, hash_access_code},
    },
};

const DUPLICATE_EMAIL: &str = "Company with this email already exists";

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Company registered; client credentials are shown once", body = ApiResponse<RegisterResponse>),
        (status = 400, description = "Missing or blank fields, or invalid email", body = crate::api::error::ErrorBody),
        (status = 409, description = "A company with this owner email already exists", body = crate::api::error::ErrorBody),
    ),
    tag = "company"
)]
#[instrument(skip(store, payload))]
pub async fn register(
    store: Extension<SharedStore>,
    payload: Option<Json<RegisterRequest>>,
) -> Result<ApiResponse<RegisterResponse>, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::BadRequest("Missing payload"));
    };

    let (Some(company_name), Some(owner_name), Some(roll_no), Some(owner_email), Some(access_code)) = (
        required(request.company_name.as_ref()),
        required(request.owner_name.as_ref()),
        required(request.roll_no.as_ref()),
        required(request.owner_email.as_ref()),
        required_secret(request.access_code.as_ref()),
    ) else {
        return Err(ApiError::BadRequest("All fields are required"));
    };

    let owner_email = normalize_email(owner_email);
    if !valid_email(&owner_email) {
        return Err(ApiError::BadRequest("Please use a valid email address."));
    }

    debug!(owner_email = %owner_email, "registering company");

    match store.email_exists(&owner_email).await {
        Ok(false) => (),
        Ok(true) => {
            warn!(owner_email = %owner_email, "company already exists");
            return Err(ApiError::Conflict(DUPLICATE_EMAIL));
        }
        Err(err) => return Err(ApiError::internal("Error checking if company exists", err)),
    }

    let credentials = generate_client_credentials()
        .map_err(|err| ApiError::internal("Error generating client credentials", err))?;

    let access_code_hash = hash_access_code(access_code.to_string())
        .await
        .map_err(|err| ApiError::internal("Error hashing access code", err))?;

    let new_company = NewCompany {
        id: Uuid::now_v7(),
        company_name: company_name.to_string(),
        owner_name: owner_name.to_string(),
        roll_no: roll_no.to_string(),
        owner_email,
        access_code_hash,
        client_id: credentials.client_id,
        client_secret_hash: digest_client_secret(&credentials.client_secret),
    };

    let account = match store.insert(new_company).await {
        Ok(account) => account,
        Err(StoreError::Conflict) => return Err(ApiError::Conflict(DUPLICATE_EMAIL)),
        Err(err) => {
            return Err(ApiError::internal(
                "Something went wrong while registering the company",
                err,
            ));
        }
    };

    info!(company_id = %account.id, client_id = %account.client_id, "company registered");

    Ok(ApiResponse::new(
        StatusCode::CREATED,
        RegisterResponse {
            company_name: account.company_name,
            client_id: account.client_id,
            client_secret: credentials.client_secret,
            owner_name: account.owner_name,
            owner_email: account.owner_email,
            roll_no: account.roll_no,
        },
        "Company registered successfully. Don't forget to save your credentials!",
    ))
}
