//! Command handlers.

use super::commands::{Commands, MetadataCommands, StoreArg};
use bson::{Bson, Document};
use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};
use zbot_core::{COMMUNITY_TIMEZONE, local_midnight};
use zbot_database::{DatabaseError, DatabaseErrorKind, MongoConnector, Repositories};
use zbot_error::{ConfigError, ZbotResult};

/// Dispatch a parsed command.
pub async fn handle_command(command: Commands) -> ZbotResult<()> {
    let mut connector = connect().await?;
    let result = run(&connector, command).await;
    connector.close().await;
    result
}

async fn run(connector: &MongoConnector, command: Commands) -> ZbotResult<()> {
    match command {
        Commands::Ping => {
            println!("Connected to database '{}'", connector.database_name());
            Ok(())
        }
        Commands::Metadata(cmd) => handle_metadata(&connector.repositories()?, cmd).await,
        Commands::Anniversaries { date, since } => {
            list_anniversaries(&connector.repositories()?, date, since).await
        }
        Commands::Jobs { store, keys } => {
            list_jobs(&connector.repositories()?, store, &keys).await
        }
    }
}

async fn connect() -> ZbotResult<MongoConnector> {
    let mut connector = MongoConnector::from_env()?;
    if !connector.open().await {
        Err(DatabaseError::new(DatabaseErrorKind::Connection(format!(
            "could not reach database '{}'",
            connector.database_name()
        ))))?;
    }
    Ok(connector)
}

/// Interpret a command-line metadata value.
///
/// Valid JSON is stored with its structure; anything else is stored as a string.
///
/// # Examples
///
/// ```
/// use bson::Bson;
/// use zbot::cli::parse_metadata_value;
///
/// assert_eq!(parse_metadata_value("hello"), Bson::String("hello".into()));
/// assert_eq!(parse_metadata_value("true"), Bson::Boolean(true));
/// ```
pub fn parse_metadata_value(raw: &str) -> Bson {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|value| Bson::try_from(value).ok())
        .unwrap_or_else(|| Bson::String(raw.to_string()))
}

#[instrument(skip(repos))]
async fn handle_metadata(repos: &Repositories, cmd: MetadataCommands) -> ZbotResult<()> {
    match cmd {
        MetadataCommands::Get { key } => match repos.metadata.get_metadata(&key).await? {
            Some(value) => println!("{:#}", value.into_relaxed_extjson()),
            None => println!("No metadata stored under '{}'", key),
        },
        MetadataCommands::Set { key, value } => {
            let value = parse_metadata_value(&value);
            repos.metadata.update_metadata(&key, value).await?;
            info!(key = %key, "Metadata updated");
        }
    }
    Ok(())
}

#[instrument(skip(repos))]
async fn list_anniversaries(
    repos: &Repositories,
    date: Option<NaiveDate>,
    since: NaiveDate,
) -> ZbotResult<()> {
    let date = date.unwrap_or_else(|| Utc::now().with_timezone(&COMMUNITY_TIMEZONE).date_naive());
    let reference = local_midnight(date)
        .ok_or_else(|| ConfigError::new(format!("no local midnight on {}", date)))?;
    let min_creation = local_midnight(since)
        .ok_or_else(|| ConfigError::new(format!("no local midnight on {}", since)))?
        .with_timezone(&Utc);

    let buckets = repos
        .accounts
        .get_anniversary_account_ids(&reference, min_creation)
        .await?;

    if buckets.is_empty() {
        println!("No anniversaries on {}", date);
        return Ok(());
    }
    println!("Anniversaries on {}:", date);
    println!("{:-<80}", "");
    for (years, ids) in &buckets {
        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
        println!("{:>3} year(s): {}", years, ids.join(", "));
    }
    Ok(())
}

#[instrument(skip(repos))]
async fn list_jobs(repos: &Repositories, store: StoreArg, keys: &[String]) -> ZbotResult<()> {
    let jobs = repos.jobs.load_pending_jobs_data(store.into(), keys).await?;

    let mut message_ids: Vec<&i64> = jobs.keys().collect();
    message_ids.sort();
    println!("{:?} jobs:", store);
    println!("{:-<80}", "");
    for message_id in message_ids {
        if let Some(document) = jobs.get(message_id) {
            println!("{}: {:#}", message_id, to_json(document));
            println!("{:-<80}", "");
        }
    }
    println!("Total: {} jobs", jobs.len());
    Ok(())
}

fn to_json(document: &Document) -> serde_json::Value {
    Bson::Document(document.clone()).into_relaxed_extjson()
}
