// src/models/club.rs
use serde::{Deserialize, Serialize};

use crate::serialize::{VisibilityPolicy, CLUB_VISIBILITY};
use crate::store::collection::Entity;

/// A tennis club. Referenced by players, owns no relationship itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Club {
    pub id: String,
    pub sport: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
}

impl Entity for Club {
    const KIND: &'static str = "clubs";

    fn id(&self) -> &str {
        &self.id
    }

    fn visibility() -> &'static VisibilityPolicy {
        &CLUB_VISIBILITY
    }
}
