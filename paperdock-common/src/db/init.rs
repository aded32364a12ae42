//! Database initialization
//!
//! Creates the SQLite database on first run and keeps schema creation
//! idempotent so every startup path can call it unconditionally.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize the database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc creates the database file on first run
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    configure_and_migrate(&pool).await?;

    Ok(pool)
}

/// In-memory database with the full schema, for tests
pub async fn init_memory_database() -> Result<SqlitePool> {
    // A single connection keeps every statement on the same in-memory db
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    configure_and_migrate(&pool).await?;

    Ok(pool)
}

async fn configure_and_migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(pool)
        .await?;

    // WAL allows the web server and a concurrent CLI invocation to read
    // while one of them writes
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(pool)
        .await?;

    create_papers_table(pool).await?;

    Ok(())
}

async fn create_papers_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS papers (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL DEFAULT '',
            abstract TEXT NOT NULL DEFAULT '',
            authors TEXT NOT NULL DEFAULT '[]',
            categories TEXT NOT NULL DEFAULT '[]',
            tag TEXT NOT NULL DEFAULT 'default',
            pdf_url TEXT,
            source_url TEXT,
            github_url TEXT,
            local_pdf_path TEXT,
            local_source_path TEXT,
            local_github_path TEXT,
            bibtex TEXT,
            date_added TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Every listing sorts on date_added DESC
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_papers_date_added ON papers(date_added)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_papers_tag ON papers(tag)")
        .execute(pool)
        .await?;

    Ok(())
}
