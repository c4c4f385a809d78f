//! Connection configuration.
//!
//! Two deployment variants are supported:
//! - a full host URI plus database name (`MONGODB_DATABASE_HOST`, `MONGODB_DATABASE_NAME`)
//! - a username/password pair against the managed cluster (`MONGODB_USERNAME`,
//!   `MONGODB_PASSWORD`, optionally `MONGODB_CLUSTER` and `MONGODB_DATABASE_NAME`)
//!
//! Missing required values are reported as [`ConfigError`] when the
//! configuration is built, before any connection attempt.

use config::{Config, Environment, Map};
use derive_getters::Getters;
use serde::Deserialize;
use tracing::{debug, instrument};
use zbot_error::ConfigError;

/// Managed cluster used by the credentials deployment variant.
pub const DEFAULT_CLUSTER: &str = "zbot-cluster.mongodb.net";

/// Database used by the credentials variant when no name is configured.
pub const DEFAULT_DATABASE_NAME: &str = "zbot";

/// Prefix of the environment variables read by [`DatabaseConfig::from_env`].
pub const ENV_PREFIX: &str = "MONGODB";

/// Raw settings as read from the environment, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DatabaseSettings {
    /// Full connection URI of the host variant
    #[serde(default)]
    pub database_host: Option<String>,
    /// Name of the database holding the bot collections
    #[serde(default)]
    pub database_name: Option<String>,
    /// Username of the credentials variant
    #[serde(default)]
    pub username: Option<String>,
    /// Password of the credentials variant
    #[serde(default)]
    pub password: Option<String>,
    /// Cluster address of the credentials variant
    #[serde(default)]
    pub cluster: Option<String>,
}

/// Where and how to connect.
#[derive(Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    /// Connection URI supplied verbatim.
    Host(String),
    /// Username/password against a managed cluster.
    Credentials {
        /// Account name
        username: String,
        /// Account password
        password: String,
        /// SRV address of the cluster
        cluster: String,
    },
}

impl ConnectionTarget {
    /// Build the connection URI handed to the driver.
    ///
    /// # Examples
    ///
    /// ```
    /// use zbot_database::ConnectionTarget;
    ///
    /// let target = ConnectionTarget::Host("mongodb://localhost:27017".to_string());
    /// assert_eq!(target.uri(), "mongodb://localhost:27017/?retryWrites=true");
    ///
    /// let target = ConnectionTarget::Host("mongodb://localhost:27017/zbot".to_string());
    /// assert_eq!(target.uri(), "mongodb://localhost:27017/zbot?retryWrites=true");
    /// ```
    pub fn uri(&self) -> String {
        match self {
            Self::Host(host) => {
                let authority = host.split_once("://").map_or(host.as_str(), |(_, rest)| rest);
                if host.contains('?') {
                    format!("{host}&retryWrites=true")
                } else if authority.contains('/') {
                    // A path (default database or bare `/`) already separates the options.
                    format!("{host}?retryWrites=true")
                } else {
                    format!("{host}/?retryWrites=true")
                }
            }
            Self::Credentials {
                username,
                password,
                cluster,
            } => format!(
                "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
                urlencoding::encode(username),
                urlencoding::encode(password),
                cluster
            ),
        }
    }
}

impl std::fmt::Debug for ConnectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Host(_) => f.debug_tuple("Host").field(&"<redacted>").finish(),
            Self::Credentials {
                username, cluster, ..
            } => f
                .debug_struct("Credentials")
                .field("username", username)
                .field("password", &"<redacted>")
                .field("cluster", cluster)
                .finish(),
        }
    }
}

/// Validated database configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct DatabaseConfig {
    /// Connection target
    target: ConnectionTarget,
    /// Database holding the bot collections
    database_name: String,
}

impl DatabaseConfig {
    /// Configuration for the host variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the host or database name is empty.
    #[track_caller]
    pub fn host(
        host: impl Into<String>,
        database_name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::try_from(DatabaseSettings {
            database_host: Some(host.into()),
            database_name: Some(database_name.into()),
            ..Default::default()
        })
    }

    /// Load configuration from `MONGODB_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment cannot be read or required values
    /// are missing.
    #[instrument]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load configuration from an explicit variable map, using the same keys
    /// as the environment (`MONGODB_DATABASE_HOST`, ...).
    ///
    /// # Errors
    ///
    /// Returns an error if required values are missing.
    pub fn from_vars(vars: Map<String, String>) -> Result<Self, ConfigError> {
        Self::from_source(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn from_source(source: Environment) -> Result<Self, ConfigError> {
        let settings: DatabaseSettings = Config::builder()
            .add_source(source)
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ConfigError::new(format!("Failed to read MongoDB settings: {e}")))?;
        debug!(
            has_host = settings.database_host.is_some(),
            has_credentials = settings.username.is_some(),
            "Loaded MongoDB settings"
        );
        Self::try_from(settings)
    }
}

impl TryFrom<DatabaseSettings> for DatabaseConfig {
    type Error = ConfigError;

    #[track_caller]
    fn try_from(settings: DatabaseSettings) -> Result<Self, Self::Error> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let database_name = present(settings.database_name);

        match (present(settings.username), present(settings.password)) {
            (Some(username), Some(password)) => Ok(Self {
                target: ConnectionTarget::Credentials {
                    username,
                    password,
                    cluster: present(settings.cluster)
                        .unwrap_or_else(|| DEFAULT_CLUSTER.to_string()),
                },
                database_name: database_name.unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            }),
            (Some(_), None) => Err(ConfigError::new(
                "No MongoDB password found under the key 'MONGODB_PASSWORD'.",
            )),
            (None, Some(_)) => Err(ConfigError::new(
                "No MongoDB username found under the key 'MONGODB_USERNAME'.",
            )),
            (None, None) => {
                let host = present(settings.database_host).ok_or_else(|| {
                    ConfigError::new(
                        "No MongoDB host found under the key 'MONGODB_DATABASE_HOST'.",
                    )
                })?;
                let database_name = database_name.ok_or_else(|| {
                    ConfigError::new(
                        "No MongoDB database name found under the key 'MONGODB_DATABASE_NAME'.",
                    )
                })?;
                Ok(Self {
                    target: ConnectionTarget::Host(host),
                    database_name,
                })
            }
        }
    }
}
