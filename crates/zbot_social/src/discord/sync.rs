//! Recruitment announce sync from channel history.

use super::{DiscordMessage, DiscordResult};
use futures::{StreamExt, TryStreamExt};
use serenity::http::Http;
use serenity::model::channel::Message;
use serenity::model::id::ChannelId;
use tracing::{debug, info, instrument};
use zbot_database::RecruitmentRepository;

/// Fetch the recruitment channel's history and upsert every message as an
/// announce.
///
/// Messages are fetched newest first, up to `limit` when given. Returns the
/// number of announces that were not recorded yet.
///
/// # Errors
///
/// Returns an error if the history cannot be fetched or a database write fails.
/// Announces written before the failure are kept.
#[instrument(skip(http, repository), fields(channel_id = channel_id.get()))]
pub async fn sync_recruitment_announces(
    http: impl AsRef<Http>,
    channel_id: ChannelId,
    repository: &RecruitmentRepository,
    limit: Option<usize>,
) -> DiscordResult<u64> {
    let history = channel_id.messages_iter(http.as_ref());
    let messages: Vec<Message> = match limit {
        Some(limit) => history.take(limit).try_collect().await?,
        None => history.try_collect().await?,
    };
    debug!("Fetched {} message(s) from channel history.", messages.len());

    let announces: Vec<DiscordMessage> = messages.into_iter().map(DiscordMessage).collect();
    let inserted = repository.update_recruitment_announces(&announces).await?;
    info!(
        fetched = announces.len(),
        inserted, "Synced recruitment announces"
    );
    Ok(inserted)
}
