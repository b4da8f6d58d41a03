//! # User Model
//!
//! Tester accounts referenced by results (`tester`, `modified_by`). Account
//! provisioning and authentication live in the frontend; this crate only
//! needs identity rows to attribute work to.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New User for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
}

impl User {
    /// Create a new user
    pub async fn create(pool: &PgPool, new_user: NewUser) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO casetrack_users (username, email, is_active, created_at, updated_at)
            VALUES ($1, $2, true, NOW(), NOW())
            RETURNING user_id, username, email, is_active, created_at, updated_at
            "#,
        )
        .bind(new_user.username)
        .bind(new_user.email)
        .fetch_one(pool)
        .await
    }

    /// Find a user by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, email, is_active, created_at, updated_at
            FROM casetrack_users
            WHERE user_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find a user by username
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, email, is_active, created_at, updated_at
            FROM casetrack_users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// Deactivate a user without deleting their attribution history
    pub async fn deactivate(&mut self, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE casetrack_users SET is_active = false, updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(self.user_id)
        .execute(pool)
        .await?;

        self.is_active = false;
        Ok(())
    }
}
