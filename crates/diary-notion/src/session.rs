//! NotionSession - session initializer and IDataSource implementation
//!
//! A session is created once per run: it looks up the configured database,
//! picks its first data source, and from then on answers page queries for
//! that data source through the [`IDataSource`] port.
//!
//! ## Design Notes
//!
//! - A database may have several data sources; only the first one reported
//!   is queried.
//! - A database with no data sources is an explicit
//!   [`NotionError::NoDataSource`] rather than an index failure.
//! - The session is immutable after creation.

use anyhow::Result;
use diary_core::config::Config;
use diary_core::domain::{Cursor, DataSourceId, DatabaseId};
use diary_core::ports::{IDataSource, Page};
use tracing::debug;

use crate::client::NotionClient;
use crate::query::{self, QueryOptions};
use crate::schema::DatabaseObject;
use crate::NotionError;

/// A resolved connection to one data source
#[derive(Debug, Clone)]
pub struct NotionSession {
    client: NotionClient,
    database_id: DatabaseId,
    data_source_id: DataSourceId,
    options: QueryOptions,
}

impl NotionSession {
    /// Builds the transport from `config` and resolves the configured database
    ///
    /// # Errors
    ///
    /// Returns [`NotionError::InvalidConfig`] for a missing token or
    /// database ID, and any error of [`NotionSession::resolve_with_client`].
    pub async fn resolve(config: &Config) -> Result<Self, NotionError> {
        let database_id = DatabaseId::new(config.notion.database.clone())
            .map_err(|e| NotionError::InvalidConfig(e.to_string()))?;
        let client = NotionClient::from_config(&config.notion)?;

        let session = Self::resolve_with_client(client, database_id).await?;
        Ok(session.with_query_options(QueryOptions::from_config(config)))
    }

    /// Resolves `database_id` to its first data source using `client`
    ///
    /// Issues one `GET /databases/{id}` request.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the lookup fails after retries,
    /// [`NotionError::NoDataSource`] if the database lists no data sources,
    /// or [`NotionError::InvalidResponse`] if the listed ID is malformed.
    pub async fn resolve_with_client(
        client: NotionClient,
        database_id: DatabaseId,
    ) -> Result<Self, NotionError> {
        let path = format!("/databases/{}", database_id.as_str());
        let database: DatabaseObject = client.get_json(&path).await?;

        let first = database
            .data_sources
            .into_iter()
            .next()
            .ok_or_else(|| NotionError::NoDataSource {
                database_id: database_id.to_string(),
            })?;

        let data_source_id = DataSourceId::new(first.id)
            .map_err(|e| NotionError::InvalidResponse(e.to_string()))?;

        debug!(
            database = %database_id,
            data_source = %data_source_id,
            name = %first.name,
            "Resolved data source"
        );

        Ok(Self {
            client,
            database_id,
            data_source_id,
            options: QueryOptions::default(),
        })
    }

    /// Replaces the options sent with every query
    pub fn with_query_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn database_id(&self) -> &DatabaseId {
        &self.database_id
    }

    /// Fetches one page of the resolved data source
    pub async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<Page, NotionError> {
        query::query_data_source(&self.client, &self.data_source_id, cursor, &self.options).await
    }
}

#[async_trait::async_trait]
impl IDataSource for NotionSession {
    fn data_source_id(&self) -> &DataSourceId {
        &self.data_source_id
    }

    async fn query_page(&self, cursor: Option<&Cursor>) -> Result<Page> {
        Ok(self.fetch_page(cursor).await?)
    }
}
