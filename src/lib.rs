//! Persistence-contract core shared by every route handler and fixture
//! generator of the matchpoint backend.
//!
//! Four concerns live here, and nothing else:
//! - identity normalization across the reference shapes a stored entity
//!   can arrive in ([`store::id`]);
//! - generic query primitives built over an abstract document-collection
//!   capability ([`store::queries`]);
//! - serialization visibility, deciding which fields cross the wire
//!   ([`serialize`]);
//! - recursive structural validation of the domain documents
//!   ([`validate`]).
//!
//! Transport, authentication, the database engine and the UI are all
//! callers of this crate, never part of it.

pub mod errors;
pub mod models;
pub mod serialize;
pub mod store;
pub mod telemetry;
pub mod validate;

pub use errors::{PersistenceError, ValidationError};
pub use serialize::{serialize_model, serialize_models, serialize_value, SerializeOptions};
pub use store::{
    exist, exist_or_empty, find_by_id, get_random_model, id_equals, normalize_id, save,
    save_many, to_store_id, Collection, Entity, Filter, StoreId,
};
