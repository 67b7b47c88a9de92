//! Persistence seam for company accounts.
//!
//! Handlers hold an [`SharedStore`]; production wires [`PgCompanyStore`].
//! Uniqueness of owner email and client id is enforced by the backing store,
//! and a race on insert surfaces as [`StoreError::Conflict`].

mod postgres;

#[cfg(test)]
pub(crate) mod memory;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::model::{CompanyAccount, NewCompany};

pub use postgres::PgCompanyStore;

pub type SharedStore = Arc<dyn CompanyStore>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("company with this email or client id already exists")]
    Conflict,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// Whether an account already uses this (normalized) owner email.
    async fn email_exists(&self, owner_email: &str) -> Result<bool, StoreError>;

    /// Insert a new account; duplicates map to [`StoreError::Conflict`].
    async fn insert(&self, company: NewCompany) -> Result<CompanyAccount, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CompanyAccount>, StoreError>;

    /// Login lookup: both owner email and client id must match the same record.
    async fn find_by_credentials(
        &self,
        owner_email: &str,
        client_id: Uuid,
    ) -> Result<Option<CompanyAccount>, StoreError>;

    /// Overwrite (`Some`) or clear (`None`) the stored refresh token.
    async fn set_refresh_token(
        &self,
        id: Uuid,
        refresh_token: Option<&str>,
    ) -> Result<(), StoreError>;

    /// Liveness check used by `/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}
