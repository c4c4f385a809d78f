//! Connection manager.

use crate::{CollectionName, DatabaseConfig, DatabaseResult, Repositories};
use bson::{Document, doc};
use mongodb::{Client, Collection, Database};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use tracing::{debug, error, info, instrument};
use zbot_error::{ConfigError, DatabaseError, DatabaseErrorKind};

/// Owns the MongoDB client and the resolved collection handles.
///
/// The connector starts disconnected. [`MongoConnector::open`] connects,
/// probes the server and resolves one handle per [`CollectionName`].
///
/// # Example
///
/// ```no_run
/// use zbot_database::{DatabaseConfig, MongoConnector};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut connector = MongoConnector::new(DatabaseConfig::from_env()?)?;
/// if connector.open().await {
///     let repos = connector.repositories()?;
///     let last_sync = repos.metadata.get_metadata("last_recruitment_sync").await?;
///     println!("{last_sync:?}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct MongoConnector {
    config: DatabaseConfig,
    client: Option<Client>,
    database: Option<Database>,
    collections: HashMap<CollectionName, Collection<Document>>,
}

impl MongoConnector {
    /// Create a disconnected connector.
    ///
    /// # Errors
    ///
    /// Returns an error if the database name is empty.
    pub fn new(config: DatabaseConfig) -> Result<Self, ConfigError> {
        if config.database_name().trim().is_empty() {
            return Err(ConfigError::new("MongoDB database name is empty"));
        }
        Ok(Self {
            config,
            client: None,
            database: None,
            collections: HashMap::new(),
        })
    }

    /// Create a connector configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(DatabaseConfig::from_env()?)
    }

    /// Connect, probe liveness and resolve collection handles.
    ///
    /// Returns whether the connection succeeded. Failures are logged and leave
    /// the connector disconnected; nothing is retried.
    #[instrument(skip(self), fields(database = %self.config.database_name()))]
    pub async fn open(&mut self) -> bool {
        match self.connect().await {
            Ok(()) => true,
            Err(e) => {
                error!(
                    error = %e,
                    "Could not connect to MongoDB database '{}'.",
                    self.config.database_name()
                );
                self.client = None;
                self.database = None;
                self.collections.clear();
                false
            }
        }
    }

    async fn connect(&mut self) -> DatabaseResult<()> {
        let connection_error =
            |e: mongodb::error::Error| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string()));

        let client = Client::with_uri_str(self.config.target().uri())
            .await
            .map_err(connection_error)?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(connection_error)?;
        debug!(
            "Connected to MongoDB database '{}'.",
            self.config.database_name()
        );

        let database = client.database(self.config.database_name());
        self.collections = CollectionName::iter()
            .map(|name| (name, database.collection::<Document>(name.as_ref())))
            .collect();
        debug!("Loaded {} collection(s).", self.collections.len());

        self.client = Some(client);
        self.database = Some(database);
        Ok(())
    }

    /// Whether [`MongoConnector::open`] succeeded.
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Configuration the connector was built with.
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Name of the bot database.
    pub fn database_name(&self) -> &str {
        self.config.database_name()
    }

    /// Handle of a collection.
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` before a successful [`MongoConnector::open`].
    pub fn collection(&self, name: CollectionName) -> DatabaseResult<Collection<Document>> {
        self.collections
            .get(&name)
            .cloned()
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NotConnected))
    }

    /// Build the repository set over the resolved collections.
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` before a successful [`MongoConnector::open`].
    pub fn repositories(&self) -> DatabaseResult<Repositories> {
        Repositories::from_connector(self)
    }

    /// Drop the client and its pooled connections.
    #[instrument(skip(self))]
    pub async fn close(&mut self) {
        self.collections.clear();
        self.database = None;
        if let Some(client) = self.client.take() {
            client.shutdown().await;
            info!("Closed MongoDB connection");
        }
    }
}
