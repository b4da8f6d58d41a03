//! # Tag Model
//!
//! Free-form labels for case versions. A tag may be global or scoped to one
//! product.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub tag_id: i64,
    pub product_id: Option<i64>,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New Tag for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTag {
    pub product_id: Option<i64>,
    pub name: String,
}

impl Tag {
    /// Create a new tag
    pub async fn create(pool: &PgPool, new_tag: NewTag) -> Result<Tag, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO casetrack_tags (product_id, name, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING tag_id, product_id, name, created_at, updated_at
            "#,
        )
        .bind(new_tag.product_id)
        .bind(new_tag.name)
        .fetch_one(pool)
        .await
    }

    /// Find a tag by name
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            r#"
            SELECT tag_id, product_id, name, created_at, updated_at
            FROM casetrack_tags
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// Attach this tag to a case version
    pub async fn attach_to_case_version(
        &self,
        pool: &PgPool,
        case_version_id: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO casetrack_case_version_tags (case_version_id, tag_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(case_version_id)
        .bind(self.tag_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Tags attached to a case version, ordered by name
    pub async fn list_for_case_version(
        pool: &PgPool,
        case_version_id: i64,
    ) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.tag_id, t.product_id, t.name, t.created_at, t.updated_at
            FROM casetrack_tags t
            JOIN casetrack_case_version_tags cvt ON cvt.tag_id = t.tag_id
            WHERE cvt.case_version_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(case_version_id)
        .fetch_all(pool)
        .await
    }
}
