//! # Environment Models
//!
//! The environment taxonomy: categories ("OS", "Browser") contain elements
//! ("OS X", "Firefox"), and an environment is a set of elements describing
//! the context a test was run under. Profiles group reusable environment
//! sets for a product family.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub profile_id: i64,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub category_id: i64,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Element {
    pub element_id: i64,
    pub category_id: i64,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Environment {
    pub environment_id: i64,
    pub profile_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Profile {
    /// Create a new profile
    pub async fn create(pool: &PgPool, name: &str) -> Result<Profile, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO casetrack_profiles (name, created_at, updated_at)
            VALUES ($1, NOW(), NOW())
            RETURNING profile_id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Find a profile by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Profile>, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT profile_id, name, created_at, updated_at
            FROM casetrack_profiles
            WHERE profile_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

impl Category {
    /// Create a new category
    pub async fn create(pool: &PgPool, name: &str) -> Result<Category, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO casetrack_categories (name, created_at, updated_at)
            VALUES ($1, NOW(), NOW())
            RETURNING category_id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Find a category by name
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT category_id, name, created_at, updated_at
            FROM casetrack_categories
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }
}

impl Element {
    /// Create a new element within a category
    pub async fn create(
        pool: &PgPool,
        category_id: i64,
        name: &str,
    ) -> Result<Element, sqlx::Error> {
        sqlx::query_as::<_, Element>(
            r#"
            INSERT INTO casetrack_elements (category_id, name, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING element_id, category_id, name, created_at, updated_at
            "#,
        )
        .bind(category_id)
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// List elements of a category ordered by name
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: i64,
    ) -> Result<Vec<Element>, sqlx::Error> {
        sqlx::query_as::<_, Element>(
            r#"
            SELECT element_id, category_id, name, created_at, updated_at
            FROM casetrack_elements
            WHERE category_id = $1
            ORDER BY name
            "#,
        )
        .bind(category_id)
        .fetch_all(pool)
        .await
    }
}

impl Environment {
    /// Create a new, empty environment
    pub async fn create(pool: &PgPool, profile_id: Option<i64>) -> Result<Environment, sqlx::Error> {
        sqlx::query_as::<_, Environment>(
            r#"
            INSERT INTO casetrack_environments (profile_id, created_at, updated_at)
            VALUES ($1, NOW(), NOW())
            RETURNING environment_id, profile_id, created_at, updated_at
            "#,
        )
        .bind(profile_id)
        .fetch_one(pool)
        .await
    }

    /// Find an environment by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Environment>, sqlx::Error> {
        sqlx::query_as::<_, Environment>(
            r#"
            SELECT environment_id, profile_id, created_at, updated_at
            FROM casetrack_environments
            WHERE environment_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Attach elements to this environment
    pub async fn add_elements(&self, pool: &PgPool, element_ids: &[i64]) -> Result<(), sqlx::Error> {
        for element_id in element_ids {
            sqlx::query(
                r#"
                INSERT INTO casetrack_environment_elements (environment_id, element_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(self.environment_id)
            .bind(element_id)
            .execute(pool)
            .await?;
        }
        Ok(())
    }

    /// Element names of this environment, sorted alphabetically
    pub async fn element_names(&self, pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (String,)>(
            r#"
            SELECT e.name
            FROM casetrack_elements e
            JOIN casetrack_environment_elements ee ON ee.element_id = e.element_id
            WHERE ee.environment_id = $1
            ORDER BY e.name
            "#,
        )
        .bind(self.environment_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Human-readable rendering, e.g. "English, OS X"
    pub async fn display_name(&self, pool: &PgPool) -> Result<String, sqlx::Error> {
        Ok(self.element_names(pool).await?.join(", "))
    }
}
