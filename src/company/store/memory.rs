//! In-memory store for handler tests.

use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{CompanyStore, StoreError};
use crate::company::model::{CompanyAccount, NewCompany};

#[derive(Debug, Default)]
pub(crate) struct MemoryCompanyStore {
    companies: Mutex<HashMap<Uuid, CompanyAccount>>,
    unavailable: AtomicBool,
    refresh_writes_fail: AtomicBool,
    inserts_conflict: AtomicBool,
}

impl MemoryCompanyStore {
    /// Make every subsequent call fail with a database error.
    pub(crate) fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Fail only `set_refresh_token`; reads and inserts keep working.
    pub(crate) fn set_refresh_writes_fail(&self, fail: bool) {
        self.refresh_writes_fail.store(fail, Ordering::SeqCst);
    }

    /// Report a unique violation on insert even when no duplicate is visible,
    /// as when a concurrent registration wins the race.
    pub(crate) fn set_inserts_conflict(&self, conflict: bool) {
        self.inserts_conflict.store(conflict, Ordering::SeqCst);
    }

    /// Raw stored record, secrets included.
    pub(crate) async fn record(&self, id: Uuid) -> Option<CompanyAccount> {
        self.companies.lock().await.get(&id).cloned()
    }

    pub(crate) async fn record_by_email(&self, owner_email: &str) -> Option<CompanyAccount> {
        self.companies
            .lock()
            .await
            .values()
            .find(|account| account.owner_email == owner_email)
            .cloned()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CompanyStore for MemoryCompanyStore {
    async fn email_exists(&self, owner_email: &str) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self
            .companies
            .lock()
            .await
            .values()
            .any(|account| account.owner_email == owner_email))
    }

    async fn insert(&self, company: NewCompany) -> Result<CompanyAccount, StoreError> {
        self.check_available()?;
        let mut companies = self.companies.lock().await;
        let duplicate = self.inserts_conflict.load(Ordering::SeqCst)
            || companies.values().any(|account| {
                account.owner_email == company.owner_email
                    || account.client_id == company.client_id
            });
        if duplicate || companies.contains_key(&company.id) {
            return Err(StoreError::Conflict);
        }
        let account = company.into_account();
        companies.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CompanyAccount>, StoreError> {
        self.check_available()?;
        Ok(self.companies.lock().await.get(&id).cloned())
    }

    async fn find_by_credentials(
        &self,
        owner_email: &str,
        client_id: Uuid,
    ) -> Result<Option<CompanyAccount>, StoreError> {
        self.check_available()?;
        Ok(self
            .companies
            .lock()
            .await
            .values()
            .find(|account| account.owner_email == owner_email && account.client_id == client_id)
            .cloned())
    }

    async fn set_refresh_token(
        &self,
        id: Uuid,
        refresh_token: Option<&str>,
    ) -> Result<(), StoreError> {
        self.check_available()?;
        if self.refresh_writes_fail.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        if let Some(account) = self.companies.lock().await.get_mut(&id) {
            account.refresh_token = refresh_token.map(str::to_string);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
