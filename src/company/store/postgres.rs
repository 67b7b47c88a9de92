use async_trait::async_trait;
use sqlx::{Connection, PgPool, Row, postgres::PgRow};
use tracing::{Instrument, info_span};
use uuid::Uuid;

use super::{CompanyStore, StoreError};
use crate::company::model::{CompanyAccount, NewCompany};

const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

const SELECT_COLUMNS: &str = "id, company_name, owner_name, roll_no, owner_email, \
     access_code_hash, client_id, client_secret_hash, refresh_token";

/// `sqlx`/Postgres implementation backed by the `companies` table.
#[derive(Clone, Debug)]
pub struct PgCompanyStore {
    pool: PgPool,
}

impl PgCompanyStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `companies` table when missing. Idempotent.
    ///
    /// # Errors
    /// Returns an error if the schema statement fails.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "CREATE",
            db.statement = "CREATE TABLE IF NOT EXISTS companies"
        );
        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&self.pool)
            .instrument(span)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CompanyStore for PgCompanyStore {
    async fn email_exists(&self, owner_email: &str) -> Result<bool, StoreError> {
        let query = "SELECT EXISTS(SELECT 1 FROM companies WHERE owner_email = $1) AS exists";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(owner_email)
            .fetch_one(&self.pool)
            .instrument(span)
            .await?;
        Ok(row.try_get("exists")?)
    }

    async fn insert(&self, company: NewCompany) -> Result<CompanyAccount, StoreError> {
        let query = r"
            INSERT INTO companies (
                id, company_name, owner_name, roll_no, owner_email,
                access_code_hash, client_id, client_secret_hash
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        match sqlx::query(query)
            .bind(company.id)
            .bind(&company.company_name)
            .bind(&company.owner_name)
            .bind(&company.roll_no)
            .bind(&company.owner_email)
            .bind(&company.access_code_hash)
            .bind(company.client_id)
            .bind(&company.client_secret_hash)
            .execute(&self.pool)
            .instrument(span)
            .await
        {
            Ok(_) => Ok(company.into_account()),
            Err(err) if is_unique_violation(&err) => Err(StoreError::Conflict),
            Err(err) => Err(StoreError::Database(err)),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CompanyAccount>, StoreError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM companies WHERE id = $1");
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query.as_str()
        );
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;
        Ok(row.as_ref().map(account_from_row).transpose()?)
    }

    async fn find_by_credentials(
        &self,
        owner_email: &str,
        client_id: Uuid,
    ) -> Result<Option<CompanyAccount>, StoreError> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM companies WHERE owner_email = $1 AND client_id = $2"
        );
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query.as_str()
        );
        let row = sqlx::query(&query)
            .bind(owner_email)
            .bind(client_id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;
        Ok(row.as_ref().map(account_from_row).transpose()?)
    }

    async fn set_refresh_token(
        &self,
        id: Uuid,
        refresh_token: Option<&str>,
    ) -> Result<(), StoreError> {
        let query = "UPDATE companies SET refresh_token = $2 WHERE id = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPDATE",
            db.statement = query
        );
        sqlx::query(query)
            .bind(id)
            .bind(refresh_token)
            .execute(&self.pool)
            .instrument(span)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let acquire_span = info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self.pool.acquire().instrument(acquire_span).await?;
        let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping().instrument(ping_span).await?;
        Ok(())
    }
}

fn account_from_row(row: &PgRow) -> Result<CompanyAccount, sqlx::Error> {
    Ok(CompanyAccount {
        id: row.try_get("id")?,
        company_name: row.try_get("company_name")?,
        owner_name: row.try_get("owner_name")?,
        roll_no: row.try_get("roll_no")?,
        owner_email: row.try_get("owner_email")?,
        access_code_hash: row.try_get("access_code_hash")?,
        client_id: row.try_get("client_id")?,
        client_secret_hash: row.try_get("client_secret_hash")?,
        refresh_token: row.try_get("refresh_token")?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct TestDbError {
        code: Option<&'static str>,
    }

    impl fmt::Display for TestDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "test database error")
        }
    }

    impl StdError for TestDbError {}

    impl DatabaseError for TestDbError {
        fn message(&self) -> &'static str {
            "test database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            self.code.map(Cow::Borrowed)
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn is_unique_violation_matches_sqlstate() {
        let err = sqlx::Error::Database(Box::new(TestDbError {
            code: Some("23505"),
        }));
        assert!(is_unique_violation(&err));

        let err = sqlx::Error::Database(Box::new(TestDbError {
            code: Some("99999"),
        }));
        assert!(!is_unique_violation(&err));

        let err = sqlx::Error::RowNotFound;
        assert!(!is_unique_violation(&err));
    }

    #[test]
    fn schema_declares_unique_credentials() {
        assert!(SCHEMA_SQL.contains("UNIQUE (owner_email)"));
        assert!(SCHEMA_SQL.contains("UNIQUE (client_id)"));
        assert!(!SCHEMA_SQL.contains("access_code TEXT"));
    }
}
