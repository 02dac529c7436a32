use rusqlite::Connection;

use crate::domain::{Collection, Document};
use crate::error::AppError;
use crate::repo;

/// Read handle over the knowledge base, passed explicitly per request.
///
/// Query handling only ever reads; writers (ingest, demo seed) go through
/// `repo` directly. Implementations must signal an unreadable store with the
/// `STORE_UNAVAILABLE` code so callers can degrade to a contextless answer.
pub trait KnowledgeStore {
    fn list_documents(&self, collection: Option<Collection>) -> Result<Vec<Document>, AppError>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl KnowledgeStore for SqliteStore {
    fn list_documents(&self, collection: Option<Collection>) -> Result<Vec<Document>, AppError> {
        repo::list_documents(&self.conn, collection).map_err(|e| {
            AppError::new("STORE_UNAVAILABLE", "Knowledge store is unreadable")
                .with_details(e.to_string())
        })
    }
}
