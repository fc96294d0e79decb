#[cfg(feature = "ssr")]
mod db_impl {
    use crate::models::review::{Sentiment, SentimentRecord};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use leptos::logging;
    use leptos::logging::log;
    use rusqlite::{Connection, OptionalExtension, Row};
    use std::sync::Arc;
    use thiserror::Error;
    use tokio::sync::Mutex;
    use uuid::Uuid;


    #[derive(Debug, Error)]
    pub enum StoreError {
        #[error("database error: {0}")]
        Sqlite(#[from] rusqlite::Error),
        #[error("stored review is corrupt: {0}")]
        Corrupt(String),
    }

    /// Append-only sink for finished analyses.
    #[async_trait]
    pub trait ReviewStore: Send + Sync {
        async fn append(
            &self,
            text: &str,
            sentiment: Sentiment,
            explanation: &str,
        ) -> Result<SentimentRecord, StoreError>;
    }

    // Define a struct to represent a database connection
    #[derive(Debug)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    impl Database {
        // Create a new database connection
        pub fn new(db_path: &str) -> Result<Self, StoreError> {
            let conn = Connection::open(db_path)?;
            logging::log!("Database connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        // Create the database schema
        pub async fn create_schema(&self) -> Result<(), StoreError> {
            let conn = self.conn.lock().await;

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS reviews (
                    id TEXT PRIMARY KEY,
                    text TEXT NOT NULL,
                    sentiment TEXT NOT NULL CHECK (sentiment IN ('Positive', 'Negative', 'Neutral')),
                    explanation TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );",
            )
            .map_err(|e| {
                eprintln!("Failed creating reviews table: {}", e);
                e
            })?;
            Ok(())
        }

        // Insert one finished analysis; the id and timestamp are assigned here
        pub async fn insert_review(
            &self,
            text: &str,
            sentiment: Sentiment,
            explanation: &str,
        ) -> Result<SentimentRecord, StoreError> {
            let record = SentimentRecord {
                id: Uuid::new_v4().to_string(),
                text: text.to_string(),
                sentiment,
                explanation: explanation.to_string(),
                created_at: Utc::now(),
            };

            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO reviews (id, text, sentiment, explanation, created_at)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![
                    &record.id,
                    &record.text,
                    record.sentiment.as_str(),
                    &record.explanation,
                    record.created_at.to_rfc3339(),
                ],
            )?;
            log!("[DB] Review stored with ID: {}", record.id);
            Ok(record)
        }

        pub async fn get_review(&self, id: &str) -> Result<Option<SentimentRecord>, StoreError> {
            let conn = self.conn.lock().await;
            let row = conn
                .query_row(
                    "SELECT id, text, sentiment, explanation, created_at FROM reviews WHERE id = ?",
                    [id],
                    read_row,
                )
                .optional()?;

            row.map(RawReview::into_record).transpose()
        }

        pub async fn count_reviews(&self) -> Result<i64, StoreError> {
            let conn = self.conn.lock().await;
            let count = conn.query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))?;
            Ok(count)
        }
    }

    #[async_trait]
    impl ReviewStore for Database {
        async fn append(
            &self,
            text: &str,
            sentiment: Sentiment,
            explanation: &str,
        ) -> Result<SentimentRecord, StoreError> {
            self.insert_review(text, sentiment, explanation).await
        }
    }

    // Row as stored, before the category and timestamp are checked
    struct RawReview {
        id: String,
        text: String,
        sentiment: String,
        explanation: String,
        created_at: String,
    }

    fn read_row(row: &Row<'_>) -> rusqlite::Result<RawReview> {
        Ok(RawReview {
            id: row.get(0)?,
            text: row.get(1)?,
            sentiment: row.get(2)?,
            explanation: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    impl RawReview {
        fn into_record(self) -> Result<SentimentRecord, StoreError> {
            let sentiment = self
                .sentiment
                .parse::<Sentiment>()
                .map_err(|e| StoreError::Corrupt(e.to_string()))?;
            let created_at = DateTime::parse_from_rfc3339(&self.created_at)
                .map_err(|e| StoreError::Corrupt(format!("created_at {:?}: {}", self.created_at, e)))?
                .with_timezone(&Utc);

            Ok(SentimentRecord {
                id: self.id,
                text: self.text,
                sentiment,
                explanation: self.explanation,
                created_at,
            })
        }
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::{Database, ReviewStore, StoreError};
