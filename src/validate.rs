//! Wire-level structural validation.
//!
//! Per-entity-type checkers over raw `serde_json::Value` documents,
//! composed recursively: a game checker runs the team checker, which
//! runs the team-player checker; every stream entry runs the comment
//! checker. A document either fully satisfies its contract or is
//! rejected as a whole with the offending field path.
//!
//! The field set of each entity is a strict allow-list: unknown keys are
//! rejected, catching typos and leaking internal fields early.

use serde_json::{Map, Value};

use crate::errors::ValidationError;
use crate::models::game::{Game, GameStatus, StreamItem};

type Result<T = ()> = std::result::Result<T, ValidationError>;

const CLUB: &str = "club";
const PLAYER: &str = "player";
const GAME: &str = "game";
const TEAM: &str = "team";
const TEAM_PLAYER: &str = "teamplayer";
const STREAM_ITEM: &str = "streamitem";

impl ValidationError {
    /// Re-root the field path under a parent field, keeping the entity
    /// that actually failed.
    fn nested(self, prefix: &str) -> Self {
        Self {
            entity: self.entity,
            field: format!("{}.{}", prefix, self.field),
            reason: self.reason,
        }
    }
}

fn as_object<'a>(entity: &'static str, value: &'a Value) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::new(entity, "", "must be a non-null object"))
}

fn get<'a>(
    entity: &'static str,
    doc: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value> {
    doc.get(field)
        .ok_or_else(|| ValidationError::new(entity, field, "missing field"))
}

fn is_lower_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Non-empty lowercase-hex id.
fn check_id(entity: &'static str, field: &str, value: &Value) -> Result {
    match value.as_str() {
        Some(s) if is_lower_hex(s) => Ok(()),
        Some(_) => Err(ValidationError::new(
            entity,
            field,
            "must be a non-empty lowercase hex string",
        )),
        None => Err(ValidationError::new(entity, field, "must be a string")),
    }
}

/// Free-text field: string or null.
fn check_nullable_string(entity: &'static str, field: &str, value: &Value) -> Result {
    if value.is_string() || value.is_null() {
        Ok(())
    } else {
        Err(ValidationError::new(entity, field, "must be a string or null"))
    }
}

/// Date field: non-empty string or null.
fn check_date(entity: &'static str, field: &str, value: &Value) -> Result {
    match value {
        Value::Null => Ok(()),
        Value::String(s) if !s.is_empty() => Ok(()),
        _ => Err(ValidationError::new(
            entity,
            field,
            "must be a non-empty date string or null",
        )),
    }
}

/// Position field: a two-number pair or null.
fn check_pos(entity: &'static str, field: &str, value: &Value) -> Result {
    match value {
        Value::Null => Ok(()),
        Value::Array(pair) if pair.len() == 2 && pair.iter().all(Value::is_number) => Ok(()),
        _ => Err(ValidationError::new(
            entity,
            field,
            "must be a [lng, lat] number pair or null",
        )),
    }
}

/// Strict allow-list over the document's keys.
fn check_allowed_fields(
    entity: &'static str,
    doc: &Map<String, Value>,
    allowed: &[&str],
) -> Result {
    for key in doc.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(ValidationError::new(
                entity,
                key.clone(),
                "field is not allowed",
            ));
        }
    }
    Ok(())
}

/// Club contract: mandatory id, nullable free-text fields, nothing else.
pub fn validate_club(club: &Value) -> Result {
    let doc = as_object(CLUB, club)?;
    check_id(CLUB, "id", get(CLUB, doc, "id")?)?;
    check_nullable_string(CLUB, "sport", get(CLUB, doc, "sport")?)?;
    check_nullable_string(CLUB, "name", get(CLUB, doc, "name")?)?;
    check_nullable_string(CLUB, "city", get(CLUB, doc, "city")?)?;
    check_allowed_fields(CLUB, doc, &["id", "sport", "name", "city"])
}

/// Shared player contract, token state left open. The club reference is
/// null or an embedded `{id, name}`; games are referenced by id only.
pub fn validate_player_scheme(player: &Value) -> Result {
    let doc = as_object(PLAYER, player)?;
    check_id(PLAYER, "id", get(PLAYER, doc, "id")?)?;
    check_nullable_string(PLAYER, "nickname", get(PLAYER, doc, "nickname")?)?;
    check_nullable_string(PLAYER, "name", get(PLAYER, doc, "name")?)?;
    check_nullable_string(PLAYER, "rank", get(PLAYER, doc, "rank")?)?;
    check_nullable_string(PLAYER, "password", get(PLAYER, doc, "password")?)?;
    check_nullable_string(PLAYER, "token", get(PLAYER, doc, "token")?)?;

    match get(PLAYER, doc, "club")? {
        Value::Null => {}
        Value::Object(club) => {
            let id = club
                .get("id")
                .ok_or_else(|| ValidationError::new(PLAYER, "club.id", "missing field"))?;
            check_id(PLAYER, "club.id", id)?;
            if let Some(name) = club.get("name") {
                check_nullable_string(PLAYER, "club.name", name)?;
            }
            check_allowed_fields(PLAYER, club, &["id", "name"])
                .map_err(|e| e.nested("club"))?;
        }
        _ => {
            return Err(ValidationError::new(
                PLAYER,
                "club",
                "must be null or an embedded club reference",
            ))
        }
    }

    match get(PLAYER, doc, "games")? {
        Value::Array(games) => {
            for (i, game_id) in games.iter().enumerate() {
                check_id(PLAYER, &format!("games[{}]", i), game_id)?;
            }
        }
        _ => return Err(ValidationError::new(PLAYER, "games", "must be an array")),
    }

    check_allowed_fields(
        PLAYER,
        doc,
        &["id", "nickname", "name", "rank", "club", "games", "password", "token"],
    )
}

/// Default external view of a player: no credential material at all.
pub fn validate_player(player: &Value) -> Result {
    validate_player_scheme(player)?;
    let doc = as_object(PLAYER, player)?;
    if !doc["token"].is_null() {
        return Err(ValidationError::new(PLAYER, "token", "must be null"));
    }
    if !doc["password"].is_null() {
        return Err(ValidationError::new(PLAYER, "password", "must be null"));
    }
    Ok(())
}

/// Authenticated self-view: the token is exposed, the password never is.
pub fn validate_player_with_token(player: &Value) -> Result {
    validate_player_scheme(player)?;
    let doc = as_object(PLAYER, player)?;
    check_id(PLAYER, "token", &doc["token"])?;
    if !doc["password"].is_null() {
        return Err(ValidationError::new(PLAYER, "password", "must be null"));
    }
    Ok(())
}

/// Game contract, including the cross-field state rules: singles tennis
/// only, status strictly ongoing or finished, exactly two teams, every
/// stream entry a well-formed comment.
pub fn validate_game(game: &Value) -> Result {
    let doc = as_object(GAME, game)?;
    check_id(GAME, "id", get(GAME, doc, "id")?)?;
    check_id(GAME, "owner", get(GAME, doc, "owner")?)?;
    check_date(GAME, "date_creation", get(GAME, doc, "date_creation")?)?;
    check_date(GAME, "date_start", get(GAME, doc, "date_start")?)?;
    check_date(GAME, "date_end", get(GAME, doc, "date_end")?)?;
    check_pos(GAME, "pos", get(GAME, doc, "pos")?)?;
    check_nullable_string(GAME, "country", get(GAME, doc, "country")?)?;
    check_nullable_string(GAME, "city", get(GAME, doc, "city")?)?;
    check_nullable_string(GAME, "type", get(GAME, doc, "type")?)?;
    check_nullable_string(GAME, "sets", get(GAME, doc, "sets")?)?;
    check_nullable_string(GAME, "score", get(GAME, doc, "score")?)?;
    check_nullable_string(GAME, "sport", get(GAME, doc, "sport")?)?;
    check_nullable_string(GAME, "status", get(GAME, doc, "status")?)?;

    if doc["type"].as_str() != Some(Game::TYPE_SINGLES) {
        return Err(ValidationError::new(GAME, "type", "can only be singles"));
    }
    if doc["sport"].as_str() != Some(Game::SPORT) {
        return Err(ValidationError::new(GAME, "sport", "can only be tennis"));
    }
    let valid_status = doc["status"]
        .as_str()
        .map_or(false, |s| GameStatus::from_str(s).is_some());
    if !valid_status {
        return Err(ValidationError::new(
            GAME,
            "status",
            "can only be ongoing or finished",
        ));
    }

    match get(GAME, doc, "stream")? {
        Value::Array(stream) => {
            for (i, item) in stream.iter().enumerate() {
                validate_stream_comment(item).map_err(|e| e.nested(&format!("stream[{}]", i)))?;
            }
        }
        _ => return Err(ValidationError::new(GAME, "stream", "must be an array")),
    }

    match get(GAME, doc, "teams")? {
        Value::Array(teams) => {
            if teams.len() != 2 {
                return Err(ValidationError::new(GAME, "teams", "must have exactly 2 teams"));
            }
            for (i, team) in teams.iter().enumerate() {
                validate_team(team).map_err(|e| e.nested(&format!("teams[{}]", i)))?;
            }
        }
        _ => return Err(ValidationError::new(GAME, "teams", "must be an array")),
    }

    check_allowed_fields(
        GAME,
        doc,
        &[
            "id", "owner", "date_creation", "date_start", "date_end", "pos", "country", "city",
            "type", "sets", "score", "sport", "status", "teams", "stream",
        ],
    )
}

/// Team contract: no persisted team id pre-match, exactly one player
/// slot (singles only).
pub fn validate_team(team: &Value) -> Result {
    let doc = as_object(TEAM, team)?;
    if !get(TEAM, doc, "id")?.is_null() {
        return Err(ValidationError::new(TEAM, "id", "must be null (no team yet)"));
    }
    match get(TEAM, doc, "players")? {
        Value::Array(players) => {
            if players.len() != 1 {
                return Err(ValidationError::new(
                    TEAM,
                    "players",
                    "must have exactly 1 player (singles only)",
                ));
            }
            validate_team_player(&players[0]).map_err(|e| e.nested("players[0]"))?;
        }
        _ => return Err(ValidationError::new(TEAM, "players", "must be an array")),
    }
    check_allowed_fields(TEAM, doc, &["id", "players"])
}

/// Team-player tagged variant: a string `id` (well-formed hex) XOR a
/// string `name`. Both present or neither present is rejected.
pub fn validate_team_player(player: &Value) -> Result {
    let doc = as_object(TEAM_PLAYER, player)?;
    let id = doc.get("id");
    let name = doc.get("name");
    match (id, name) {
        (Some(_), Some(_)) => Err(ValidationError::new(
            TEAM_PLAYER,
            "id",
            "cannot carry both 'id' and 'name'",
        )),
        (None, None) => Err(ValidationError::new(
            TEAM_PLAYER,
            "id",
            "must carry an 'id' or a 'name'",
        )),
        (Some(id), None) => {
            check_id(TEAM_PLAYER, "id", id)?;
            check_allowed_fields(TEAM_PLAYER, doc, &["id"])
        }
        (None, Some(name)) => {
            if !name.is_string() {
                return Err(ValidationError::new(TEAM_PLAYER, "name", "must be a string"));
            }
            check_allowed_fields(TEAM_PLAYER, doc, &["name"])
        }
    }
}

/// Stream-item contract, variant left open.
pub fn validate_stream_item(item: &Value) -> Result {
    let doc = as_object(STREAM_ITEM, item)?;
    check_id(STREAM_ITEM, "id", get(STREAM_ITEM, doc, "id")?)?;
    check_id(STREAM_ITEM, "owner", get(STREAM_ITEM, doc, "owner")?)?;
    check_date(STREAM_ITEM, "date", get(STREAM_ITEM, doc, "date")?)?;
    match get(STREAM_ITEM, doc, "type")? {
        Value::String(s) if !s.is_empty() => {}
        _ => {
            return Err(ValidationError::new(
                STREAM_ITEM,
                "type",
                "must be a non-empty string",
            ))
        }
    }
    if !get(STREAM_ITEM, doc, "data")?.is_object() {
        return Err(ValidationError::new(STREAM_ITEM, "data", "must be an object"));
    }
    check_allowed_fields(STREAM_ITEM, doc, &["id", "type", "date", "owner", "data"])
}

/// Comment variant: the only stream-item type accepted on a game today.
pub fn validate_stream_comment(item: &Value) -> Result {
    validate_stream_item(item)?;
    let doc = as_object(STREAM_ITEM, item)?;
    if doc["type"].as_str() != Some(StreamItem::TYPE_COMMENT) {
        return Err(ValidationError::new(STREAM_ITEM, "type", "must be comment"));
    }
    match doc["data"].get("text") {
        Some(Value::String(text)) if !text.is_empty() => Ok(()),
        _ => Err(ValidationError::new(
            STREAM_ITEM,
            "data.text",
            "must be a non-empty string",
        )),
    }
}
