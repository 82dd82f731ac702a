//! Store adapter: a SQLite pool used document-style.
//!
//! Each collection row carries the queryable columns next to the full JSON
//! document, so the read side can filter/sort/project in the store and still
//! hand back unprojected documents. Writes only happen out-of-band (the
//! `seed` subcommand and tests); the HTTP surface is read-only.

use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Pool, Sqlite};
use uuid::Uuid;

use crate::assets::MigrationAssets;
use crate::config::DatabaseConfig;
use crate::models::{Movie, Series};

#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    pub fn pool(&self) -> Pool<Sqlite> {
        self.pool.clone()
    }

    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        // Create the database file if it doesn't exist; in-memory databases
        // need neither the check nor the create.
        if !config.url.contains(":memory:") && !Sqlite::database_exists(&config.url).await? {
            Sqlite::create_database(&config.url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.unwrap_or(10))
            .connect(&config.url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<()> {
        self.run_embedded_migrations().await?;
        Ok(())
    }

    /// Connectivity probe for the health endpoint.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn run_embedded_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        for (name, content) in MigrationAssets::get_migrations() {
            // Filenames are "001_initial_schema.sql"; the numeric prefix is
            // the version.
            let version: i64 = name
                .split('_')
                .next()
                .and_then(|v| v.parse().ok())
                .ok_or_else(|| anyhow::anyhow!("migration {} has no numeric prefix", name))?;

            let applied = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM _migrations WHERE version = ?",
            )
            .bind(version)
            .fetch_one(&self.pool)
            .await?;

            if applied > 0 {
                continue;
            }

            let start = std::time::Instant::now();
            let mut transaction = self.pool.begin().await?;

            match sqlx::query(&content).execute(&mut *transaction).await {
                Ok(_) => {
                    sqlx::query("INSERT INTO _migrations (version, description) VALUES (?, ?)")
                        .bind(version)
                        .bind(&name)
                        .execute(&mut *transaction)
                        .await?;
                    transaction.commit().await?;
                    tracing::info!(
                        "Applied migration: {} ({}ms)",
                        name,
                        start.elapsed().as_millis()
                    );
                }
                Err(e) => {
                    transaction.rollback().await?;
                    return Err(anyhow::anyhow!("Migration {} failed: {}", name, e));
                }
            }
        }

        Ok(())
    }

    /// Ingestion-side write: store one movie document and the columns the
    /// query layer needs. Re-seeding an imdb_id replaces the stored document.
    pub async fn insert_movie(&self, movie: &Movie) -> Result<Uuid> {
        let id = movie.id.unwrap_or_else(Uuid::new_v4);
        let mut document = movie.clone();
        document.id = Some(id);

        let genres = serde_json::to_string(&document.genres)?;
        let body = serde_json::to_string(&document)?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO movies (
                id, imdb_id, tmdb_id, title, media_type, release_date,
                popularity, vote_average, genres, document
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&document.imdb_id)
        .bind(&document.tmdb_id)
        .bind(&document.title)
        .bind(&document.media_type)
        .bind(document.release)
        .bind(document.popularity)
        .bind(document.vote_average)
        .bind(genres)
        .bind(body)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// Ingestion-side write for series documents.
    pub async fn insert_series(&self, series: &Series) -> Result<Uuid> {
        let id = series.id.unwrap_or_else(Uuid::new_v4);
        let mut document = series.clone();
        document.id = Some(id);

        let genres = serde_json::to_string(&document.genres)?;
        let body = serde_json::to_string(&document)?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO series (
                id, imdb_id, tmdb_id, title, media_type, first_air_date,
                popularity, vote_average, genres, document
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&document.imdb_id)
        .bind(&document.tmdb_id)
        .bind(&document.title)
        .bind(&document.media_type)
        .bind(document.first_air_date)
        .bind(document.popularity)
        .bind(document.vote_average)
        .bind(genres)
        .bind(body)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }
}
