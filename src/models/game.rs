// src/models/game.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serialize::{VisibilityPolicy, GAME_VISIBILITY};
use crate::store::collection::Entity;

/// Externally valid match states. The pre-decision "unknown" placeholder
/// used while a match report is being assembled is not representable
/// here and is rejected at validation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Ongoing,
    Finished,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Finished => "finished",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ongoing" => Some(GameStatus::Ongoing),
            "finished" => Some(GameStatus::Finished),
            _ => None,
        }
    }
}

/// One side of a singles match. `id` is always null pre-match: teams are
/// not persisted as independent entities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Team {
    pub id: Option<String>,
    pub players: Vec<TeamPlayer>,
}

/// A match participant: either a registered player referenced by id or
/// an anonymous, unregistered name. The "both or neither" shape is
/// unrepresentable here; the wire-level validator rejects raw documents
/// carrying it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TeamPlayer {
    Registered { id: String },
    Anonymous { name: String },
}

/// A timestamped event on a game's activity log. Only the "comment"
/// variant exists today; its `data` payload carries a `text` string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StreamItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub date: DateTime<Utc>,
    pub owner: String,
    pub data: Value,
}

impl StreamItem {
    pub const TYPE_COMMENT: &'static str = "comment";

    /// Comment text, when this item is a comment carrying one.
    pub fn comment_text(&self) -> Option<&str> {
        if self.item_type != Self::TYPE_COMMENT {
            return None;
        }
        self.data.get("text").and_then(Value::as_str)
    }
}

/// A tennis match between two singles teams, owned by the reporting
/// player. Teams and stream items are embedded: they live and die with
/// the game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Game {
    pub id: String,
    pub owner: String,
    pub date_creation: DateTime<Utc>,
    pub date_start: DateTime<Utc>,
    pub date_end: Option<DateTime<Utc>>,
    /// Longitude/latitude pair.
    pub pos: Option<[f64; 2]>,
    pub country: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub game_type: String,
    /// Semicolon-separated game scores, each side separated by "/",
    /// e.g. "6/2;6/3".
    pub sets: Option<String>,
    /// Sets won per side, e.g. "2/0".
    pub score: Option<String>,
    pub sport: String,
    pub status: GameStatus,
    pub teams: Vec<Team>,
    pub stream: Vec<StreamItem>,
}

impl Game {
    pub const SPORT: &'static str = "tennis";
    pub const TYPE_SINGLES: &'static str = "singles";
}

impl Entity for Game {
    const KIND: &'static str = "games";

    fn id(&self) -> &str {
        &self.id
    }

    fn visibility() -> &'static VisibilityPolicy {
        &GAME_VISIBILITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn game_status_round_trips_lowercase() {
        assert_eq!(
            serde_json::to_value(GameStatus::Finished).unwrap(),
            json!("finished")
        );
        assert_eq!(GameStatus::from_str("ongoing"), Some(GameStatus::Ongoing));
        assert_eq!(GameStatus::from_str("unknown"), None);
        assert_eq!(GameStatus::from_str("canceled"), None);
    }

    #[test]
    fn team_player_serializes_as_a_single_tag() {
        let registered = TeamPlayer::Registered {
            id: "a5977c38a2955cd64b93d658".into(),
        };
        let anonymous = TeamPlayer::Anonymous {
            name: "Lamasperge".into(),
        };
        assert_eq!(
            serde_json::to_value(&registered).unwrap(),
            json!({ "id": "a5977c38a2955cd64b93d658" })
        );
        assert_eq!(
            serde_json::to_value(&anonymous).unwrap(),
            json!({ "name": "Lamasperge" })
        );
    }

    #[test]
    fn comment_text_is_read_from_the_data_payload() {
        let item = StreamItem {
            id: "f76f0dfbbbabfce6612f5393".into(),
            item_type: StreamItem::TYPE_COMMENT.into(),
            date: Utc::now(),
            owner: "439b3a9cb3ae996b68e0ebf2".into(),
            data: json!({ "text": "Merci!" }),
        };
        assert_eq!(item.comment_text(), Some("Merci!"));

        let other = StreamItem {
            item_type: "photo".into(),
            ..item
        };
        assert_eq!(other.comment_text(), None);
    }
}
