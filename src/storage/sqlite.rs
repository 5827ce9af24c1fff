//! Single-table SQLite store for public notices.
//!
//! Rows are keyed by `council_reference`; writing the same reference again
//! replaces every column of the earlier row.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::crawler::models::Notice;
use crate::error::{StorageError, StorageResult};

pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Open (creating if absent) the database at `database_url`.
    ///
    /// The pool holds exactly one connection for the whole run, which also
    /// keeps `sqlite::memory:` databases alive between calls.
    pub async fn open(database_url: &str) -> StorageResult<Self> {
        let open_err = |source| StorageError::Open {
            url: database_url.to_string(),
            source,
        };

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(open_err)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(open_err)?;

        debug!(database_url, "Database opened");
        Ok(Self { pool })
    }

    /// In-memory store, used by tests.
    pub async fn in_memory() -> StorageResult<Self> {
        Self::open("sqlite::memory:").await
    }

    /// Safe to call on every run.
    pub async fn ensure_schema(&self) -> StorageResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS data (
                council_reference VARCHAR(20) PRIMARY KEY,
                address TEXT,
                description TEXT,
                info_url TEXT,
                date_scraped DATE,
                on_notice_from DATE,
                on_notice_to DATE,
                legal_description TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or fully replace the row for `notice.council_reference`,
    /// committed before returning.
    pub async fn upsert(&self, notice: &Notice) -> StorageResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO data (
                council_reference,
                address,
                description,
                info_url,
                date_scraped,
                on_notice_from,
                on_notice_to,
                legal_description
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&notice.council_reference)
        .bind(&notice.address)
        .bind(&notice.description)
        .bind(&notice.info_url)
        .bind(notice.date_scraped)
        .bind(&notice.on_notice_from)
        .bind(&notice.on_notice_to)
        .bind(&notice.legal_description)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn get(&self, council_reference: &str) -> StorageResult<Option<Notice>> {
        let notice = sqlx::query_as::<_, Notice>(
            r#"
            SELECT council_reference, address, description, info_url,
                   date_scraped, on_notice_from, on_notice_to, legal_description
            FROM data
            WHERE council_reference = ?
            "#,
        )
        .bind(council_reference)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notice)
    }

    pub async fn count(&self) -> StorageResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM data")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
