//! Request/response payloads for company endpoints.
//!
//! Request fields are optional at the serde level so missing fields become a
//! `400` with the uniform envelope instead of an extractor rejection.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub company_name: Option<String>,
    pub owner_name: Option<String>,
    pub roll_no: Option<String>,
    pub owner_email: Option<String>,
    pub access_code: Option<String>,
}

/// Registration result. `clientSecret` is only ever shown here.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub company_name: String,
    #[serde(rename = "clientID")]
    pub client_id: Uuid,
    pub client_secret: String,
    pub owner_name: String,
    pub owner_email: String,
    pub roll_no: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub company_name: Option<String>,
    pub owner_name: Option<String>,
    pub roll_no: Option<String>,
    pub owner_email: Option<String>,
    pub access_code: Option<String>,
    #[serde(rename = "clientID")]
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token_type: String,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}
