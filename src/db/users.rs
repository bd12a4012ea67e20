use crate::db::models::DbUser;
use crate::db::sqlite::RoutineStorage;
use crate::error::RoutineError;
use crate::types::payload::{NewUser, UserPatch};
use chrono::Utc;
use sha2::{Digest, Sha256};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::info;
use uuid::Uuid;

const USER_COLUMNS: &str = "user_id, username, password, email, created_at, updated_at";

/// Hex SHA-256 of the password salted with the owning user id.
pub fn credential_digest(user_id: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// `Some` only for values that carry text.
fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl RoutineStorage {
    pub async fn create_user(&self, new: &NewUser) -> Result<DbUser, RoutineError> {
        let user_id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let user = DbUser {
            password_digest: credential_digest(&user_id, &new.password),
            user_id,
            username: new.username.trim().to_string(),
            email: new.email.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"INSERT INTO users (user_id, username, password, email, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&user.user_id)
        .bind(&user.username)
        .bind(&user.password_digest)
        .bind(&user.email)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        info!(user_id = %user.user_id, username = %user.username, "user created");
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<DbUser>, RoutineError> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, username"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_user).collect()
    }

    pub async fn get_user(&self, user_id: &str) -> Result<DbUser, RoutineError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RoutineError::not_found("user", user_id))?;
        Self::row_to_user(row)
    }

    /// Apply the non-blank fields of `patch`. A new password is re-digested.
    pub async fn update_user(
        &self,
        user_id: &str,
        patch: &UserPatch,
    ) -> Result<DbUser, RoutineError> {
        let mut user = self.get_user(user_id).await?;
        if let Some(username) = non_blank(patch.username.as_ref()) {
            user.username = username.to_string();
        }
        if let Some(password) = non_blank(patch.password.as_ref()) {
            user.password_digest = credential_digest(&user.user_id, password);
        }
        if let Some(email) = non_blank(patch.email.as_ref()) {
            user.email = email.to_string();
        }
        user.updated_at = Utc::now();

        sqlx::query(
            r#"UPDATE users SET
                username = ?,
                password = ?,
                email = ?,
                updated_at = ?
              WHERE user_id = ?"#,
        )
        .bind(&user.username)
        .bind(&user.password_digest)
        .bind(&user.email)
        .bind(user.updated_at)
        .bind(&user.user_id)
        .execute(&self.pool)
        .await?;

        info!(user_id = %user.user_id, "user updated");
        Ok(user)
    }

    /// Deleting a user cascades to their fitness records and ledger entries.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), RoutineError> {
        let done = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(RoutineError::not_found("user", user_id));
        }
        info!(user_id, "user deleted");
        Ok(())
    }

    fn row_to_user(row: SqliteRow) -> Result<DbUser, RoutineError> {
        Ok(DbUser {
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            password_digest: row.try_get("password")?,
            email: row.try_get("email")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
