pub mod collection;
pub mod id;
pub mod queries;

pub use collection::{Collection, Entity, Filter};
pub use id::{id_equals, normalize_id, to_store_id, StoreId};
pub use queries::{exist, exist_or_empty, find_by_id, get_random_model, save, save_many};
