//! Decoding of API response bodies into domain records.

use crate::error::Result;
use crate::types::{Group, ReplayDetails, ReplayList};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use tracing::debug;

/// Decode the body of `GET /replays`.
pub fn decode_replay_list(body: &[u8]) -> Result<ReplayList> {
    let list: ReplayList = serde_json::from_slice(body)?;
    debug!(
        entries = list.list.len(),
        count = list.count,
        "Decoded replay list"
    );
    Ok(list)
}

/// Decode the body of `GET /replays/{id}`.
pub fn decode_replay_details(body: &[u8]) -> Result<ReplayDetails> {
    let details: ReplayDetails = serde_json::from_slice(body)?;
    debug!(
        replay_id = %details.id,
        blue_players = details.blue.players.len(),
        orange_players = details.orange.players.len(),
        "Decoded replay details"
    );
    Ok(details)
}

/// Decode the body of `GET /groups/{id}`.
pub fn decode_group(body: &[u8]) -> Result<Group> {
    let group: Group = serde_json::from_slice(body)?;
    debug!(
        group_id = %group.id,
        players = group.players.len(),
        teams = group.teams.len(),
        "Decoded group"
    );
    Ok(group)
}

/// `null` decodes to the type's zero value.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `"ranked-duels"` as well as `13`; `null` becomes empty.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrNumber;

    impl<'de> Visitor<'de> for StringOrNumber {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or an integer")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

/// MVP shows up as a count in some payloads and as a flag in others.
pub(crate) fn count_or_flag<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct CountOrFlag;

    impl<'de> Visitor<'de> for CountOrFlag {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer or a boolean")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<u32, E> {
            Ok(u32::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<u32, E> {
            u32::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<u32, E> {
            u32::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<u32, E> {
            Ok(0)
        }
    }

    deserializer.deserialize_any(CountOrFlag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BallchasingError;
    use crate::types::{Playlist, StatsBlock};
    use serde_json::json;

    fn to_body(value: &serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(value).unwrap()
    }

    #[test]
    fn test_list_preserves_order_and_server_count() {
        let body = to_body(&json!({
            "list": [
                { "id": "a", "title": "First" },
                { "id": "b", "title": "Second" },
                { "id": "c", "title": "Third" }
            ],
            "count": 4213
        }));

        let list = decode_replay_list(&body).unwrap();
        let ids: Vec<_> = list.list.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(list.count, 4213);
    }

    #[test]
    fn test_missing_fields_take_zero_values() {
        let list = decode_replay_list(br#"{"list":[{"id":"x"}]}"#).unwrap();
        assert_eq!(list.count, 0);
        assert!(list.next.is_none());

        let replay = &list.list[0];
        assert_eq!(replay.title, "");
        assert_eq!(replay.duration, 0);
        assert!(!replay.overtime);
        assert_eq!(replay.date.timestamp(), 0);
        assert_eq!(replay.playlist.id, "");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = to_body(&json!({
            "list": [{ "id": "x", "uploader": { "name": "someone" }, "visibility": "public" }],
            "count": 1,
            "extra": true
        }));
        assert_eq!(decode_replay_list(&body).unwrap().list.len(), 1);
    }

    #[test]
    fn test_null_text_fields_decode_as_empty() {
        let body = to_body(&json!({
            "list": [{ "id": "x", "title": null, "map_name": null, "season": null }],
            "count": 1
        }));
        let replay = &decode_replay_list(&body).unwrap().list[0];
        assert_eq!(replay.title, "");
        assert_eq!(replay.map_name, "");
        assert_eq!(replay.season, 0);
    }

    #[test]
    fn test_null_counters_and_collections_decode_as_zero() {
        let body = to_body(&json!({
            "list": [{ "id": "x", "duration": null, "overtime": null, "playlist": null }],
            "count": null
        }));
        let list = decode_replay_list(&body).unwrap();
        assert_eq!(list.count, 0);
        assert_eq!(list.list[0].duration, 0);
        assert!(!list.list[0].overtime);
        assert_eq!(list.list[0].playlist, Playlist::default());

        let list = decode_replay_list(br#"{"list":null,"count":0}"#).unwrap();
        assert!(list.list.is_empty());

        let body = to_body(&json!({
            "id": "r1",
            "blue": { "name": "Blue", "players": null, "stats": null },
            "orange": {
                "players": [{ "name": "b", "goals": null, "stats": { "core": { "saves": null } } }]
            }
        }));
        let details = decode_replay_details(&body).unwrap();
        assert!(details.blue.players.is_empty());
        assert_eq!(details.blue.stats, StatsBlock::default());
        let player = &details.orange.players[0];
        assert_eq!(player.goals, 0);
        assert_eq!(player.stats.core.saves, 0);
    }

    #[test]
    fn test_summary_timestamps_and_playlist() {
        let body = to_body(&json!({
            "list": [{
                "id": "x",
                "created": "2024-03-01T10:00:00Z",
                "date": "2024-02-29T21:15:30+02:00",
                "playlist": { "id": 13, "name": "Ranked Standard" }
            }],
            "count": 1
        }));
        let replay = &decode_replay_list(&body).unwrap().list[0];
        assert_eq!(replay.created_at.to_rfc3339(), "2024-03-01T10:00:00+00:00");
        assert_eq!(replay.date.to_rfc3339(), "2024-02-29T19:15:30+00:00");
        assert_eq!(replay.playlist.id, "13");
        assert_eq!(replay.playlist.name, "Ranked Standard");
    }

    #[test]
    fn test_truncated_body_is_decode_error() {
        let result = decode_replay_list(br#"{"list":[{"id":"a"#);
        assert!(matches!(result, Err(BallchasingError::Decode(_))));
    }

    #[test]
    fn test_type_mismatch_is_decode_error() {
        let result = decode_replay_list(br#"{"list":[{"id":"a","duration":"long"}],"count":1}"#);
        assert!(matches!(result, Err(BallchasingError::Decode(_))));

        let result = decode_replay_details(br#"{"id":"a","blue":{"players":{}}}"#);
        assert!(matches!(result, Err(BallchasingError::Decode(_))));
    }

    #[test]
    fn test_bad_timestamp_is_decode_error() {
        let result = decode_replay_details(br#"{"id":"a","date":"yesterday"}"#);
        assert!(matches!(result, Err(BallchasingError::Decode(_))));
    }

    #[test]
    fn test_duplicated_player_counters_are_not_reconciled() {
        let body = to_body(&json!({
            "id": "r1",
            "blue": {
                "name": "Blue",
                "players": [{
                    "id": { "platform": "steam", "id": "7656" },
                    "name": "alpha",
                    "goals": 2, "saves": 1, "assists": 0,
                    "stats": { "core": { "goals": 3, "saves": 4, "assists": 5 } }
                }]
            }
        }));

        let details = decode_replay_details(&body).unwrap();
        let player = &details.blue.players[0];
        assert_eq!((player.goals, player.saves, player.assists), (2, 1, 0));
        let core = &player.stats.core;
        assert_eq!((core.goals, core.saves, core.assists), (3, 4, 5));
        assert!(details.orange.players.is_empty());
    }

    #[test]
    fn test_mvp_accepts_flag_and_count() {
        let body = to_body(&json!({
            "blue": { "players": [
                { "name": "a", "stats": { "core": { "mvp": true } } },
                { "name": "b", "stats": { "core": { "mvp": false } } },
                { "name": "c", "stats": { "core": { "mvp": 2 } } }
            ]}
        }));
        let details = decode_replay_details(&body).unwrap();
        let mvps: Vec<_> = details
            .blue
            .players
            .iter()
            .map(|p| p.stats.core.mvp)
            .collect();
        assert_eq!(mvps, [1, 0, 2]);
    }

    #[test]
    fn test_negative_mvp_is_decode_error() {
        let body = br#"{"blue":{"players":[{"stats":{"core":{"mvp":-1}}}]}}"#;
        assert!(matches!(
            decode_replay_details(body),
            Err(BallchasingError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_group() {
        let body = to_body(&json!({
            "id": "league-s3-abc",
            "name": "League Season 3",
            "created": "2024-01-05T12:00:00Z",
            "status": "ok",
            "players": [{
                "platform": "epic",
                "id": "e1",
                "name": "Riainoo",
                "team": "Orange Crush",
                "cumulative": {
                    "games": 10, "wins": 7, "win_percentage": 70.0, "play_duration": 3120,
                    "core": { "goals": 14, "saves": 9, "shooting_percentage": 35.5 }
                },
                "game_average": { "core": { "goals": 1.4, "saves": 0.9 } }
            }],
            "teams": [{ "name": "Orange Crush", "cumulative": { "games": 10, "wins": 7 } }]
        }));

        let group = decode_group(&body).unwrap();
        assert_eq!(group.name, "League Season 3");
        assert_eq!(group.teams.len(), 1);

        let player = group.player_by_name("riainoo").unwrap();
        assert_eq!(player.cumulative.wins, 7);
        assert_eq!(player.cumulative.core.goals, 14);
        assert!((player.game_average.core.goals - 1.4).abs() < f64::EPSILON);
        assert!(group.player_by_name("nobody").is_none());
    }
}
