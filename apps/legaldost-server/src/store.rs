//! Document persistence
//!
//! One row per document. The full [`Document`] is kept as a JSON body so the
//! record shape can grow without migrations; `owner`, `status` and the
//! timestamps are copied into columns for filtering and ordering.

use chrono::SecondsFormat;
use shared_types::Document;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt document record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document not found: {0}")]
    Missing(String),
}

/// SQLite-backed document store
#[derive(Clone)]
pub struct DocumentStore {
    pool: SqlitePool,
}

impl DocumentStore {
    /// Open (creating if needed) the database at `url` and run migrations.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        info!("Connecting to database: {}", url);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await?;

        Self::from_pool(pool).await
    }

    /// Private in-memory database.
    ///
    /// Each SQLite memory connection is its own database, so the pool holds
    /// exactly one connection for its whole lifetime.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        debug!("Running database migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                owner TEXT NOT NULL,
                status TEXT NOT NULL,
                body TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_documents_owner ON documents(owner, created_at)
            "#,
        )
        .execute(&self.pool)
        .await?;

        debug!("Migrations complete");
        Ok(())
    }

    pub async fn insert(&self, document: &Document) -> Result<(), StoreError> {
        let body = serde_json::to_string(document)?;

        sqlx::query(
            r#"
            INSERT INTO documents (id, owner, status, body, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&document.id)
        .bind(&document.owner)
        .bind(document.status.as_str())
        .bind(&body)
        .bind(document.created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .bind(document.updated_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(&self.pool)
        .await?;

        debug!("Inserted document {}", document.id);
        Ok(())
    }

    /// Fetch a document, scoped to its owner.
    ///
    /// Another owner's document is reported exactly like a missing one.
    pub async fn get(&self, owner: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let body: Option<String> =
            sqlx::query_scalar::<_, String>("SELECT body FROM documents WHERE id = ? AND owner = ?")
                .bind(id)
                .bind(owner)
                .fetch_optional(&self.pool)
                .await?;

        body.map(|b| serde_json::from_str(&b))
            .transpose()
            .map_err(StoreError::from)
    }

    /// All of `owner`'s documents, newest first
    pub async fn list(&self, owner: &str) -> Result<Vec<Document>, StoreError> {
        let bodies: Vec<String> = sqlx::query_scalar::<_, String>(
            "SELECT body FROM documents WHERE owner = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        bodies
            .iter()
            .map(|b| serde_json::from_str(b).map_err(StoreError::from))
            .collect()
    }

    /// Overwrite the stored record with `document`.
    pub async fn save(&self, document: &Document) -> Result<(), StoreError> {
        let body = serde_json::to_string(document)?;

        let result = sqlx::query(
            r#"
            UPDATE documents SET status = ?, body = ?, updated_at = ?
            WHERE id = ? AND owner = ?
            "#,
        )
        .bind(document.status.as_str())
        .bind(&body)
        .bind(document.updated_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .bind(&document.id)
        .bind(&document.owner)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(document.id.clone()));
        }
        Ok(())
    }

    /// Remove a document, returning the removed record.
    pub async fn delete(&self, owner: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let Some(document) = self.get(owner, id).await? else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM documents WHERE id = ? AND owner = ?")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        debug!("Deleted document {}", id);
        Ok(Some(document))
    }

    /// Close the pool; later calls fail with a database error.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{Analysis, ChatTurn, DocumentStatus, FileKind};

    fn lease(owner: &str, title: &str) -> Document {
        Document::new(owner, title, "lease.txt", FileKind::Text, "Rent is Rs. 25,000 per month.")
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = DocumentStore::in_memory().await.unwrap();
        let doc = lease("user-1", "Lease");
        store.insert(&doc).await.unwrap();

        let loaded = store.get("user-1", &doc.id).await.unwrap().unwrap();
        assert_eq!(loaded, doc);
    }

    #[tokio::test]
    async fn other_owner_sees_nothing() {
        let store = DocumentStore::in_memory().await.unwrap();
        let doc = lease("user-1", "Lease");
        store.insert(&doc).await.unwrap();

        assert!(store.get("user-2", &doc.id).await.unwrap().is_none());
        assert!(store.list("user-2").await.unwrap().is_empty());
        assert!(store.delete("user-2", &doc.id).await.unwrap().is_none());
        assert!(store.get("user-1", &doc.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = DocumentStore::in_memory().await.unwrap();
        let first = lease("user-1", "First");
        store.insert(&first).await.unwrap();
        let second = lease("user-1", "Second");
        store.insert(&second).await.unwrap();

        let titles: Vec<_> = store
            .list("user-1")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.title)
            .collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn save_overwrites_body() {
        let store = DocumentStore::in_memory().await.unwrap();
        let mut doc = lease("user-1", "Lease");
        store.insert(&doc).await.unwrap();

        doc.status = DocumentStatus::Completed;
        doc.analysis = Some(Analysis {
            summary: "Standard lease".into(),
            ..Default::default()
        });
        doc.chat_history.push(ChatTurn::new("Rent?", "Rs. 25,000"));
        doc.touch();
        store.save(&doc).await.unwrap();

        let loaded = store.get("user-1", &doc.id).await.unwrap().unwrap();
        assert_eq!(loaded, doc);
    }

    #[tokio::test]
    async fn save_of_deleted_document_fails() {
        let store = DocumentStore::in_memory().await.unwrap();
        let doc = lease("user-1", "Lease");
        store.insert(&doc).await.unwrap();
        store.delete("user-1", &doc.id).await.unwrap();

        assert!(matches!(
            store.save(&doc).await,
            Err(StoreError::Missing(_))
        ));
    }
}
