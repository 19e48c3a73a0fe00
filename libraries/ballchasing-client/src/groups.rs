//! Replay group operations.

use crate::client::BallchasingClient;
use crate::decode::decode_group;
use crate::error::Result;
use crate::types::Group;
use tracing::debug;

/// Group client for the ballchasing API.
pub struct GroupsClient<'a> {
    client: &'a BallchasingClient,
}

impl<'a> GroupsClient<'a> {
    pub(crate) fn new(client: &'a BallchasingClient) -> Self {
        Self { client }
    }

    /// Get a group with its per-player and per-team aggregates.
    pub async fn get_group(&self, group_id: &str) -> Result<Group> {
        debug!(group_id = %group_id, "Fetching group");
        let body = self
            .client
            .request(&format!("/groups/{}", group_id), None)
            .await?;
        decode_group(&body)
    }
}
