//! Account repository implementation

use core_kernel::{Account, AccountId};
use sqlx::PgPool;

use crate::error::DatabaseError;

/// Repository for ledger accounts
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Creates a new AccountRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves the account with the given name
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` naming the account when no row matches
    pub async fn get_by_name(&self, name: &str) -> Result<Account, DatabaseError> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name
            FROM accounts
            WHERE name = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Account", "name", name))
    }

    /// Retrieves an account by its key
    pub async fn get_by_id(&self, id: AccountId) -> Result<Account, DatabaseError> {
        sqlx::query_as::<_, Account>("SELECT id, name FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Account", "id", id))
    }

    /// Persists a new account
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEntry` if the name is taken
    pub async fn insert(&self, name: &str) -> Result<Account, DatabaseError> {
        let account = sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }
}
