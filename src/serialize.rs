//! Serialization visibility.
//!
//! Every entity type declares which of its fields stay off the wire by
//! default (internal revision markers, and for players the credential
//! fields). A call can unhide specific fields for that call only; the
//! authenticated self-view of a player unhides `token` this way.

use serde_json::{Map, Value};

use crate::errors::PersistenceError;
use crate::store::collection::Entity;

/// Per-entity-type hidden-field table. One `'static` constant per type,
/// built once and never mutated.
#[derive(Debug)]
pub struct VisibilityPolicy {
    /// Field names removed from the serialized form by default.
    pub hidden: &'static [&'static str],
    /// Policies applied to every element of the named array fields.
    pub nested: &'static [(&'static str, &'static VisibilityPolicy)],
}

pub static CLUB_VISIBILITY: VisibilityPolicy = VisibilityPolicy {
    hidden: &["_id", "__v"],
    nested: &[],
};

pub static PLAYER_VISIBILITY: VisibilityPolicy = VisibilityPolicy {
    hidden: &["_id", "__v", "password", "token"],
    nested: &[],
};

pub static TEAM_VISIBILITY: VisibilityPolicy = VisibilityPolicy {
    hidden: &["_id", "__v"],
    nested: &[],
};

pub static STREAM_ITEM_VISIBILITY: VisibilityPolicy = VisibilityPolicy {
    hidden: &["_id", "__v"],
    nested: &[],
};

pub static GAME_VISIBILITY: VisibilityPolicy = VisibilityPolicy {
    hidden: &["_id", "__v"],
    nested: &[
        ("teams", &TEAM_VISIBILITY),
        ("stream", &STREAM_ITEM_VISIBILITY),
    ],
};

/// Per-call overrides for one serialization.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerializeOptions<'a> {
    /// Fields exposed despite being in the default-hidden set, for this
    /// call only.
    pub unhide: &'a [&'a str],
}

impl<'a> SerializeOptions<'a> {
    pub fn unhide(fields: &'a [&'a str]) -> Self {
        Self { unhide: fields }
    }
}

/// Field-filtered structural copy of a wire document. Pure: the source
/// value is never mutated. Arrays are filtered element-wise, order
/// preserved; non-object scalars pass through unchanged.
pub fn serialize_value(doc: &Value, policy: &VisibilityPolicy, opts: &SerializeOptions) -> Value {
    match doc {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| serialize_value(item, policy, opts))
                .collect(),
        ),
        Value::Object(fields) => {
            let mut out = Map::with_capacity(fields.len());
            for (key, value) in fields {
                if policy.hidden.contains(&key.as_str()) && !opts.unhide.contains(&key.as_str()) {
                    continue;
                }
                let nested = policy
                    .nested
                    .iter()
                    .find(|(field, _)| field == key)
                    .map(|(_, policy)| *policy);
                match nested {
                    Some(nested) => out.insert(key.clone(), serialize_value(value, nested, opts)),
                    None => out.insert(key.clone(), value.clone()),
                };
            }
            Value::Object(out)
        }
        scalar => scalar.clone(),
    }
}

/// Wire representation of one typed entity, hidden fields stripped.
pub fn serialize_model<E: Entity>(
    doc: &E,
    opts: &SerializeOptions,
) -> Result<Value, PersistenceError> {
    let raw = serde_json::to_value(doc)?;
    Ok(serialize_value(&raw, E::visibility(), opts))
}

/// Wire representation of a sequence of entities, order preserved, the
/// same transform applied independently to each member.
pub fn serialize_models<E: Entity>(
    docs: &[E],
    opts: &SerializeOptions,
) -> Result<Value, PersistenceError> {
    let mut out = Vec::with_capacity(docs.len());
    for doc in docs {
        out.push(serialize_model(doc, opts)?);
    }
    Ok(Value::Array(out))
}
