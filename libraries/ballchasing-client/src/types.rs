//! Types for ballchasing API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::decode::{count_or_flag, nullable, string_or_number};

/// Base URL of the public ballchasing API.
pub const DEFAULT_BASE_URL: &str = "https://ballchasing.com/api";

/// Timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for connecting to the ballchasing API.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "https://ballchasing.com/api")
    pub base_url: String,
    /// API key sent as the raw `Authorization` header; empty means anonymous
    pub api_key: String,
    /// Total time allowed for one request/response exchange
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config for the public API with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Point the client at a different API root (mirrors, mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<none>"
        } else {
            "<redacted>"
        };
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &api_key)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Query string parameters for a request.
///
/// Keys are kept sorted and unique: setting a key twice replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for QueryParams {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

// =============================================================================
// Replay Types
// =============================================================================

/// Playlist a replay was played in.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Playlist {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
}

/// A replay as returned by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReplaySummary {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    /// API URL of the replay
    #[serde(deserialize_with = "nullable")]
    pub link: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    /// When the replay was uploaded
    #[serde(rename = "created", deserialize_with = "nullable")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
    #[serde(deserialize_with = "nullable")]
    pub rocket_league_id: String,
    #[serde(deserialize_with = "nullable")]
    pub match_guid: String,
    /// When the match was played
    #[serde(deserialize_with = "nullable")]
    pub date: DateTime<Utc>,
    #[serde(deserialize_with = "nullable")]
    pub map_code: String,
    #[serde(deserialize_with = "nullable")]
    pub map_name: String,
    #[serde(deserialize_with = "nullable")]
    pub playlist: Playlist,
    /// Match length in seconds
    #[serde(deserialize_with = "nullable")]
    pub duration: u32,
    #[serde(deserialize_with = "nullable")]
    pub overtime: bool,
    #[serde(deserialize_with = "nullable")]
    pub season: u32,
}

/// One page of replays from `GET /replays`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReplayList {
    #[serde(deserialize_with = "nullable")]
    pub list: Vec<ReplaySummary>,
    /// Total number of matching replays on the server, not the page size
    #[serde(deserialize_with = "nullable")]
    pub count: u64,
    /// Link to the following page; never followed by this client
    pub next: Option<String>,
}

// =============================================================================
// Player Stats Types
// =============================================================================

/// Platform-qualified player identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerId {
    #[serde(deserialize_with = "nullable")]
    pub platform: String,
    #[serde(deserialize_with = "nullable")]
    pub id: String,
}

/// Shot, goal and save aggregates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CoreStats {
    #[serde(deserialize_with = "nullable")]
    pub shots: u32,
    #[serde(deserialize_with = "nullable")]
    pub shots_against: u32,
    #[serde(deserialize_with = "nullable")]
    pub goals: u32,
    #[serde(deserialize_with = "nullable")]
    pub goals_against: u32,
    #[serde(deserialize_with = "nullable")]
    pub saves: u32,
    #[serde(deserialize_with = "nullable")]
    pub assists: u32,
    #[serde(deserialize_with = "nullable")]
    pub score: u32,
    /// MVP count; the boolean flag some payloads send is stored as 0 or 1
    #[serde(deserialize_with = "count_or_flag")]
    pub mvp: u32,
    #[serde(deserialize_with = "nullable")]
    pub shooting_percentage: f64,
}

/// Demolitions dealt and received.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoStats {
    #[serde(deserialize_with = "nullable")]
    pub inflicted: u32,
    #[serde(deserialize_with = "nullable")]
    pub taken: u32,
}

/// Nested `stats` block of a player or team.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StatsBlock {
    #[serde(deserialize_with = "nullable")]
    pub core: CoreStats,
    #[serde(deserialize_with = "nullable")]
    pub demo: DemoStats,
}

/// A player's line in a replay.
///
/// `goals`, `saves` and `assists` appear both here and in `stats.core`.
/// The API does not guarantee they agree; both are kept as received.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerStats {
    #[serde(deserialize_with = "nullable")]
    pub id: PlayerId,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub team: u32,
    #[serde(deserialize_with = "nullable")]
    pub score: u32,
    #[serde(deserialize_with = "nullable")]
    pub goals: u32,
    #[serde(deserialize_with = "nullable")]
    pub saves: u32,
    #[serde(deserialize_with = "nullable")]
    pub assists: u32,
    #[serde(deserialize_with = "nullable")]
    pub stats: StatsBlock,
}

/// Team side in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamColor {
    Blue,
    Orange,
}

impl TeamColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamColor::Blue => "blue",
            TeamColor::Orange => "orange",
        }
    }

    pub fn opponent(&self) -> Self {
        match self {
            TeamColor::Blue => TeamColor::Orange,
            TeamColor::Orange => TeamColor::Blue,
        }
    }
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a replay.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TeamDetails {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub players: Vec<PlayerStats>,
    /// Team totals
    #[serde(deserialize_with = "nullable")]
    pub stats: StatsBlock,
}

/// Full detail of a single replay from `GET /replays/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReplayDetails {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub link: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
    #[serde(deserialize_with = "nullable")]
    pub date: DateTime<Utc>,
    /// Match length in seconds
    #[serde(deserialize_with = "nullable")]
    pub duration: u32,
    #[serde(deserialize_with = "nullable")]
    pub map_code: String,
    #[serde(deserialize_with = "nullable")]
    pub map_name: String,
    #[serde(deserialize_with = "nullable")]
    pub overtime: bool,
    #[serde(deserialize_with = "nullable")]
    pub season: u32,
    #[serde(deserialize_with = "nullable")]
    pub blue: TeamDetails,
    #[serde(deserialize_with = "nullable")]
    pub orange: TeamDetails,
}

impl ReplayDetails {
    pub fn team(&self, color: TeamColor) -> &TeamDetails {
        match color {
            TeamColor::Blue => &self.blue,
            TeamColor::Orange => &self.orange,
        }
    }

    /// Every player with their side, blue first, in API order.
    pub fn players(&self) -> impl Iterator<Item = (TeamColor, &PlayerStats)> {
        let blue = self.blue.players.iter().map(|p| (TeamColor::Blue, p));
        let orange = self.orange.players.iter().map(|p| (TeamColor::Orange, p));
        blue.chain(orange)
    }

    /// Side with more team goals, or `None` for a tie.
    pub fn winner(&self) -> Option<TeamColor> {
        let blue = self.blue.stats.core.goals;
        let orange = self.orange.stats.core.goals;
        match blue.cmp(&orange) {
            std::cmp::Ordering::Greater => Some(TeamColor::Blue),
            std::cmp::Ordering::Less => Some(TeamColor::Orange),
            std::cmp::Ordering::Equal => None,
        }
    }
}

// =============================================================================
// Group Types
// =============================================================================

/// Core stats averaged per game.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AverageCoreStats {
    #[serde(deserialize_with = "nullable")]
    pub shots: f64,
    #[serde(deserialize_with = "nullable")]
    pub shots_against: f64,
    #[serde(deserialize_with = "nullable")]
    pub goals: f64,
    #[serde(deserialize_with = "nullable")]
    pub goals_against: f64,
    #[serde(deserialize_with = "nullable")]
    pub saves: f64,
    #[serde(deserialize_with = "nullable")]
    pub assists: f64,
    #[serde(deserialize_with = "nullable")]
    pub score: f64,
    #[serde(deserialize_with = "nullable")]
    pub mvp: f64,
    #[serde(deserialize_with = "nullable")]
    pub shooting_percentage: f64,
}

/// Totals over every replay in a group.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GroupCumulative {
    #[serde(deserialize_with = "nullable")]
    pub games: u32,
    #[serde(deserialize_with = "nullable")]
    pub wins: u32,
    #[serde(deserialize_with = "nullable")]
    pub win_percentage: f64,
    /// Seconds played
    #[serde(deserialize_with = "nullable")]
    pub play_duration: u32,
    #[serde(deserialize_with = "nullable")]
    pub core: CoreStats,
}

/// Per-game averages over a group.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GroupAverage {
    #[serde(deserialize_with = "nullable")]
    pub core: AverageCoreStats,
}

/// A player's aggregates within a group.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GroupPlayer {
    #[serde(deserialize_with = "nullable")]
    pub platform: String,
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub team: String,
    #[serde(deserialize_with = "nullable")]
    pub cumulative: GroupCumulative,
    #[serde(deserialize_with = "nullable")]
    pub game_average: GroupAverage,
}

/// A team's aggregates within a group.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GroupTeam {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub cumulative: GroupCumulative,
    #[serde(deserialize_with = "nullable")]
    pub game_average: GroupAverage,
}

/// A replay group from `GET /groups/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Group {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub link: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub created: DateTime<Utc>,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
    #[serde(deserialize_with = "nullable")]
    pub players: Vec<GroupPlayer>,
    #[serde(deserialize_with = "nullable")]
    pub teams: Vec<GroupTeam>,
}

impl Group {
    /// Look up a player by display name, ignoring case.
    pub fn player_by_name(&self, name: &str) -> Option<&GroupPlayer> {
        self.players
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}
