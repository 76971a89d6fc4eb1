// src/models/player.rs
use serde::{Deserialize, Serialize};

use crate::serialize::{VisibilityPolicy, PLAYER_VISIBILITY};
use crate::store::collection::Entity;

/// Embedded reference to the player's club.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClubRef {
    pub id: String,
    pub name: Option<String>,
}

/// A registered player.
///
/// `password` is never exposed in any visible view; `token` only leaves
/// the system in the authenticated self-view (serialization unhides it
/// for that call). Games are referenced by id, never embedded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Player {
    pub id: String,
    pub nickname: Option<String>,
    pub name: Option<String>,
    pub rank: Option<String>,
    pub club: Option<ClubRef>,
    pub games: Vec<String>,
    pub password: Option<String>,
    pub token: Option<String>,
}

impl Entity for Player {
    const KIND: &'static str = "players";

    fn id(&self) -> &str {
        &self.id
    }

    fn visibility() -> &'static VisibilityPolicy {
        &PLAYER_VISIBILITY
    }
}
