use async_trait::async_trait;
use mongodb::bson::{self, Document};
use mongodb::{Client, Database};
use serde_json::{Map, Value};
use tracing::info;

use datagen_core::redact_connection_string;

use crate::credentials::Credentials;
use crate::errors::ExportError;

/// Destination that accepts generated documents one at a time.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn insert(&self, collection: &str, document: &Map<String, Value>)
    -> Result<(), ExportError>;
}

/// MongoDB database as a document sink.
pub struct MongoSink {
    database: Database,
}

impl MongoSink {
    /// Connect and verify the database is reachable.
    pub async fn connect(credentials: &Credentials) -> Result<Self, ExportError> {
        let connection = redact_connection_string(&credentials.uri);
        info!(
            uri = %connection.redacted,
            hosts = connection.hosts.len(),
            database = %credentials.database,
            "connecting to mongodb"
        );

        let client = Client::with_uri_str(&credentials.uri).await?;
        let database = client.database(&credentials.database);
        database.list_collection_names().await?;

        Ok(Self { database })
    }

    pub fn with_database(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl DocumentSink for MongoSink {
    async fn insert(
        &self,
        collection: &str,
        document: &Map<String, Value>,
    ) -> Result<(), ExportError> {
        let document = bson::to_document(document)?;
        self.database
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;
        Ok(())
    }
}
