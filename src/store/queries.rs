//! Generic query primitives over any [`Collection`].
//!
//! Each primitive takes the collection capability explicitly; nothing in
//! here reaches for global state. All primitives issue one or two round
//! trips and hold no locks.

use std::collections::BTreeSet;

use futures::future::join_all;
use rand::Rng;
use serde_json::Value;
use tracing::debug;

use crate::errors::PersistenceError;
use crate::store::collection::{Collection, Entity, Filter};
use crate::store::id::{to_store_id, StoreId};

/// Persist one document.
pub async fn save<E, C>(col: &C, doc: E) -> Result<E, PersistenceError>
where
    E: Entity,
    C: Collection<E>,
{
    debug!(kind = E::KIND, "saving one document");
    col.save(doc).await
}

/// Persist a batch of documents, each save issued concurrently.
///
/// Waits for every save to settle, preserves input order in the output
/// and surfaces the first failure. Saves that succeeded before the
/// failing one are NOT rolled back; partial success is the documented
/// semantic, not a transactional guarantee.
pub async fn save_many<E, C>(col: &C, docs: Vec<E>) -> Result<Vec<E>, PersistenceError>
where
    E: Entity,
    C: Collection<E>,
{
    debug!(kind = E::KIND, batch = docs.len(), "saving document batch");
    let results = join_all(docs.into_iter().map(|doc| col.save(doc))).await;
    let mut saved = Vec::with_capacity(results.len());
    for result in results {
        saved.push(result?);
    }
    Ok(saved)
}

/// True iff every distinct id in `ids` resolves to exactly one stored
/// document.
///
/// `ids` may be a single reference or an array of heterogeneous
/// references (strings, `{id}` / `{_id}` documents). References are
/// normalized and de-duplicated first; a reference that does not
/// normalize to a well-formed id cannot resolve to anything, so the call
/// short-circuits to `false` without a round trip. Empty input is not
/// special-cased here, see [`exist_or_empty`].
pub async fn exist<E, C>(col: &C, ids: &Value) -> Result<bool, PersistenceError>
where
    E: Entity,
    C: Collection<E>,
{
    let distinct = match normalize_id_set(ids) {
        Some(set) => set,
        None => return Ok(false),
    };
    let expected = distinct.len() as u64;
    let found = col.count(&Filter::IdIn(distinct.into_iter().collect())).await?;
    debug!(kind = E::KIND, expected, found, "existence check");
    Ok(found == expected)
}

/// Like [`exist`], but "nothing to check" is vacuously satisfied: JSON
/// null or an empty array resolves `true` without any store round trip.
pub async fn exist_or_empty<E, C>(col: &C, ids: &Value) -> Result<bool, PersistenceError>
where
    E: Entity,
    C: Collection<E>,
{
    match ids {
        Value::Null => Ok(true),
        Value::Array(refs) if refs.is_empty() => Ok(true),
        _ => exist::<E, C>(col, ids).await,
    }
}

/// One uniformly-selected document, or `None` on an empty collection.
///
/// Two-phase sample: read the count, draw an index, fetch one document
/// past that many in the store's stable ordering. Deliberately
/// non-atomic; a mutation between the two phases degrades to `None` or a
/// slightly skewed pick rather than failing. Cheap by contract: two
/// round trips, never a full scan.
pub async fn get_random_model<E, C>(col: &C) -> Result<Option<E>, PersistenceError>
where
    E: Entity,
    C: Collection<E>,
{
    let total = col.count(&Filter::All).await?;
    if total == 0 {
        return Ok(None);
    }
    let index = rand::thread_rng().gen_range(0..total);
    debug!(kind = E::KIND, total, index, "random sample");
    let mut page = col.find(&Filter::All, index, 1).await?;
    Ok(if page.is_empty() {
        None
    } else {
        Some(page.swap_remove(0))
    })
}

/// Direct lookup by any reference shape. A missing document or a
/// malformed reference is `Ok(None)`, never an error.
pub async fn find_by_id<E, C>(col: &C, id: &Value) -> Result<Option<E>, PersistenceError>
where
    E: Entity,
    C: Collection<E>,
{
    match to_store_id(id) {
        Some(store_id) => col.find_by_id(&store_id).await,
        None => Ok(None),
    }
}

/// De-duplicated id set for an existence check. `None` as soon as one
/// reference fails to normalize to a well-formed id.
fn normalize_id_set(ids: &Value) -> Option<BTreeSet<StoreId>> {
    let refs: &[Value] = match ids {
        Value::Array(refs) => refs.as_slice(),
        single => std::slice::from_ref(single),
    };
    let mut set = BTreeSet::new();
    for reference in refs {
        set.insert(to_store_id(reference)?);
    }
    Some(set)
}
