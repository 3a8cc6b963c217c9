//! # User Repository
//!
//! The credential store: username → password-hash mappings.
//!
//! Users are immutable once created and there is no delete path. The hash
//! comparison is deliberately the only signal: `authenticate` returns `None`
//! for both an unknown username and a wrong password, so a caller cannot
//! enumerate accounts.

use sqlx::SqlitePool;
use tracing::debug;

use stockbook_core::password::{hash_password, verify_password};
use stockbook_core::validation::{validate_password, validate_username};
use stockbook_core::UserIdentity;

use crate::error::{DbError, DbResult};

/// Stored credential row. Never leaves this module.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
}

/// Repository for credential operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Registers a new user.
    ///
    /// ## Errors
    /// * `Validation` - empty username or password
    /// * `DuplicateUsername` - the username is taken
    pub async fn register(&self, username: &str, password: &str) -> DbResult<UserIdentity> {
        validate_username(username)?;
        validate_password(password)?;

        let username = username.trim();
        let password_hash = hash_password(password);

        debug!(username = %username, "registering user");

        let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?1, ?2)")
            .bind(username)
            .bind(&password_hash)
            .execute(&self.pool)
            .await
            .map_err(DbError::from)
            .map_err(|e| {
                if e.is_unique_on("users.username") {
                    DbError::DuplicateUsername {
                        username: username.to_string(),
                    }
                } else {
                    e
                }
            })?;

        Ok(UserIdentity {
            id: result.last_insert_rowid(),
            username: username.to_string(),
        })
    }

    /// Authenticates a username/password pair.
    ///
    /// Returns `Some(identity)` only when the username exists AND the hash
    /// matches; both failure modes collapse into `None`.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> DbResult<Option<UserIdentity>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, username, password_hash FROM users WHERE username = ?1")
                .bind(username.trim())
                .fetch_optional(&self.pool)
                .await?;

        let authenticated = match row {
            Some(user) if verify_password(password, &user.password_hash) => Some(UserIdentity {
                id: user.id,
                username: user.username,
            }),
            _ => None,
        };

        debug!(username = %username, ok = authenticated.is_some(), "authenticate");
        Ok(authenticated)
    }

    /// Counts registered users. Zero means the bootstrap seed will run.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
