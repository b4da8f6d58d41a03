//! # Database Migration System
//!
//! Incremental schema migrations discovered from the `migrations/` directory
//! using a timestamp-based naming convention: `YYYYMMDDHHMMSS_description.sql`.
//!
//! A PostgreSQL advisory lock serializes concurrent runners (e.g. parallel
//! test processes pointing at the same database), and applied versions are
//! tracked in `casetrack_schema_migrations` so re-running is idempotent.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use sqlx::{PgPool, Row};
use tracing::{debug, info};

/// Advisory lock key for migration runs
const MIGRATION_LOCK_KEY: i64 = 7_240_391_517_204_455;

/// Represents a single database migration file.
#[derive(Debug, Clone)]
pub struct Migration {
    /// Version timestamp (YYYYMMDDHHMMSS format)
    pub version: String,
    /// Human-readable migration name
    pub name: String,
    /// Full path to the SQL file
    pub path: PathBuf,
}

/// Manages database schema migrations.
pub struct DatabaseMigrations;

impl DatabaseMigrations {
    /// Run all pending migrations from the default `migrations/` directory
    pub async fn run_all(pool: &PgPool) -> Result<(), sqlx::Error> {
        Self::run_from_directory(pool, Path::new("migrations")).await
    }

    /// Run all pending migrations found under `directory`
    pub async fn run_from_directory(pool: &PgPool, directory: &Path) -> Result<(), sqlx::Error> {
        let migrations = Self::discover(directory)?;
        if migrations.is_empty() {
            debug!(directory = %directory.display(), "no migrations found");
            return Ok(());
        }

        Self::acquire_lock(pool).await?;
        let outcome = Self::apply_pending(pool, &migrations).await;
        Self::release_lock(pool).await?;
        outcome
    }

    /// Discover migration files, ordered by version
    pub fn discover(directory: &Path) -> Result<Vec<Migration>, sqlx::Error> {
        let mut by_version = BTreeMap::new();

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(_) => return Ok(Vec::new()),
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let file_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) if name.ends_with(".sql") => name.to_string(),
                _ => continue,
            };

            let stem = file_name.trim_end_matches(".sql");
            let Some((version, name)) = stem.split_once('_') else {
                continue;
            };
            if version.len() != 14 || !version.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }

            by_version.insert(
                version.to_string(),
                Migration {
                    version: version.to_string(),
                    name: name.to_string(),
                    path,
                },
            );
        }

        Ok(by_version.into_values().collect())
    }

    async fn apply_pending(pool: &PgPool, migrations: &[Migration]) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS casetrack_schema_migrations (
                version VARCHAR(14) PRIMARY KEY,
                applied_at TIMESTAMP NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(pool)
        .await?;

        for migration in migrations {
            let applied = sqlx::query(
                "SELECT version FROM casetrack_schema_migrations WHERE version = $1",
            )
            .bind(&migration.version)
            .fetch_optional(pool)
            .await?
            .is_some();

            if applied {
                continue;
            }

            let sql = fs::read_to_string(&migration.path).map_err(sqlx::Error::Io)?;

            let mut tx = pool.begin().await?;
            sqlx::raw_sql(&sql).execute(&mut *tx).await?;
            sqlx::query("INSERT INTO casetrack_schema_migrations (version) VALUES ($1)")
                .bind(&migration.version)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;

            info!(
                version = %migration.version,
                name = %migration.name,
                "applied migration"
            );
        }

        Ok(())
    }

    async fn acquire_lock(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_lock($1)")
            .bind(MIGRATION_LOCK_KEY)
            .execute(pool)
            .await?;
        Ok(())
    }

    async fn release_lock(pool: &PgPool) -> Result<(), sqlx::Error> {
        let row = sqlx::query("SELECT pg_advisory_unlock($1) AS released")
            .bind(MIGRATION_LOCK_KEY)
            .fetch_one(pool)
            .await?;
        let _released: bool = row.get("released");
        Ok(())
    }
}
