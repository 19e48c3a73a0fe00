//! Ballchasing Client
//!
//! HTTP client library for the [ballchasing.com](https://ballchasing.com)
//! Rocket League replay statistics API.
//!
//! # Features
//!
//! - **Replays**: list by rank, playlist, title, player or group; fetch full
//!   per-player statistics for a single replay
//! - **Groups**: fetch aggregate statistics for a replay group
//! - **Raw access**: authenticated GET against any endpoint via
//!   [`BallchasingClient::request`]
//!
//! # Example
//!
//! ```ignore
//! use ballchasing_client::{BallchasingClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BallchasingClient::new(ClientConfig::new("my-api-key"))?;
//!
//!     let replays = client.replays().list_replays_by_rank("gold-1", "gold-3", 10).await?;
//!     println!("{} of {} replays", replays.list.len(), replays.count);
//!
//!     let details = client.replays().get_replay_details(&replays.list[0].id).await?;
//!     for (color, player) in details.players() {
//!         println!("{color}: {} scored {}", player.name, player.goals);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod decode;
mod error;
mod groups;
mod replays;
mod types;

pub use client::BallchasingClient;
pub use decode::{decode_group, decode_replay_details, decode_replay_list};
pub use error::{BallchasingError, Result};
pub use types::{
    AverageCoreStats, ClientConfig, CoreStats, DemoStats, Group, GroupAverage, GroupCumulative,
    GroupPlayer, GroupTeam, PlayerId, PlayerStats, Playlist, QueryParams, ReplayDetails,
    ReplayList, ReplaySummary, StatsBlock, TeamColor, TeamDetails, DEFAULT_BASE_URL,
    REQUEST_TIMEOUT,
};

// Sub-clients, returned by `BallchasingClient::replays()` / `groups()`
pub use groups::GroupsClient;
pub use replays::ReplaysClient;
