//! Replay listing and detail operations.

use crate::client::BallchasingClient;
use crate::decode::{decode_replay_details, decode_replay_list};
use crate::error::Result;
use crate::types::{QueryParams, ReplayDetails, ReplayList};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

/// Replay client for the ballchasing API.
///
/// Every method is a single request/decode round trip against `/replays`.
/// Counts are forwarded as-is; the server decides what is out of range.
pub struct ReplaysClient<'a> {
    client: &'a BallchasingClient,
}

impl<'a> ReplaysClient<'a> {
    pub(crate) fn new(client: &'a BallchasingClient) -> Self {
        Self { client }
    }

    /// List replays matching arbitrary filters.
    ///
    /// Filters are sent verbatim as query parameters, so anything the API
    /// accepts (`season`, `pro`, `sort-by`, ...) can be used here.
    pub async fn list_replays(&self, filters: &QueryParams) -> Result<ReplayList> {
        debug!(filters = filters.len(), "Listing replays");
        let body = self.client.request("/replays", Some(filters)).await?;
        decode_replay_list(&body)
    }

    /// List replays whose players fall between two ranks (e.g. "gold-1").
    pub async fn list_replays_by_rank(
        &self,
        min_rank: &str,
        max_rank: &str,
        count: u32,
    ) -> Result<ReplayList> {
        let filters = QueryParams::new()
            .with("min-rank", min_rank)
            .with("max-rank", max_rank)
            .with("count", count.to_string());
        self.list_replays(&filters).await
    }

    /// List replays from a playlist (e.g. "ranked-duels").
    pub async fn list_replays_by_playlist(
        &self,
        playlist_id: &str,
        count: u32,
    ) -> Result<ReplayList> {
        let filters = QueryParams::new()
            .with("playlist", playlist_id)
            .with("count", count.to_string());
        self.list_replays(&filters).await
    }

    /// Search replays by title.
    pub async fn search_replays_by_title(&self, title: &str, count: u32) -> Result<ReplayList> {
        let filters = QueryParams::new()
            .with("title", title)
            .with("count", count.to_string());
        self.list_replays(&filters).await
    }

    /// List replays featuring a player, matched by in-game name.
    pub async fn list_replays_by_player(
        &self,
        player_name: &str,
        count: u32,
    ) -> Result<ReplayList> {
        let filters = QueryParams::new()
            .with("player-name", player_name)
            .with("count", count.to_string());
        self.list_replays(&filters).await
    }

    /// List replays in a group, optionally only those played after `since`.
    pub async fn list_group_replays(
        &self,
        group_id: &str,
        since: Option<DateTime<Utc>>,
        count: u32,
    ) -> Result<ReplayList> {
        let mut filters = QueryParams::new()
            .with("group", group_id)
            .with("count", count.to_string());
        if let Some(since) = since {
            filters.set(
                "replay-date-after",
                since.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
        }
        self.list_replays(&filters).await
    }

    /// Get full statistics for a single replay.
    pub async fn get_replay_details(&self, replay_id: &str) -> Result<ReplayDetails> {
        debug!(replay_id = %replay_id, "Fetching replay details");
        let body = self
            .client
            .request(&format!("/replays/{}", replay_id), None)
            .await?;
        decode_replay_details(&body)
    }
}
