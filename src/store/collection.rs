//! The minimal contract a backing store must satisfy.
//!
//! The core never implements a store; it consumes one through
//! [`Collection`]. Any backend able to count, page through and save
//! documents of an entity type is acceptable.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::PersistenceError;
use crate::serialize::VisibilityPolicy;
use crate::store::id::StoreId;

/// The only predicates the core ever asks a store to evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Every document in the collection.
    All,
    /// Documents whose id is in the given set.
    IdIn(Vec<StoreId>),
}

/// A persistable domain document.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name in the backing store.
    const KIND: &'static str;

    /// Canonical id of this document.
    fn id(&self) -> &str;

    /// Which fields stay out of the serialized form by default.
    fn visibility() -> &'static VisibilityPolicy;
}

/// Abstract document collection: count, paged find, lookup, save.
///
/// `find` must use an arbitrary but stable ordering so that skip/limit
/// paging is coherent between calls against an unchanged collection.
#[async_trait]
pub trait Collection<E: Entity>: Send + Sync {
    async fn count(&self, filter: &Filter) -> Result<u64, PersistenceError>;

    async fn find(
        &self,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<E>, PersistenceError>;

    async fn find_by_id(&self, id: &StoreId) -> Result<Option<E>, PersistenceError>;

    async fn save(&self, doc: E) -> Result<E, PersistenceError>;
}
