#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use serde_json::json;

use matchpoint_core::errors::PersistenceError;
use matchpoint_core::models::{Club, Game, GameStatus, Player, StreamItem, Team, TeamPlayer};
use matchpoint_core::store::{Collection, Entity, Filter, StoreId};
use matchpoint_core::telemetry::{get_subscriber, init_subscriber};

// Ensure the tracing stack is only initialised once across tests.
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// In-memory backing store used to exercise the query primitives.
/// Documents are keyed by id in a BTreeMap, giving find() the stable
/// ordering the capability contract requires.
pub struct MemoryCollection<E> {
    docs: Mutex<BTreeMap<String, E>>,
    calls: AtomicUsize,
}

impl<E: Entity> MemoryCollection<E> {
    pub fn new() -> Self {
        init_tracing();
        Self {
            docs: Mutex::new(BTreeMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub async fn with_docs(docs: Vec<E>) -> Self {
        let col = Self::new();
        for doc in docs {
            col.save(doc).await.expect("seeding cannot fail");
        }
        col.calls.store(0, Ordering::SeqCst);
        col
    }

    /// Number of store round trips issued so far.
    pub fn round_trips(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn remove(&self, id: &str) {
        self.docs.lock().unwrap().remove(id);
    }

    fn matches(filter: &Filter, doc: &E) -> bool {
        match filter {
            Filter::All => true,
            Filter::IdIn(ids) => ids.iter().any(|id| id.to_hex() == doc.id()),
        }
    }
}

#[async_trait]
impl<E: Entity> Collection<E> for MemoryCollection<E> {
    async fn count(&self, filter: &Filter) -> Result<u64, PersistenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let docs = self.docs.lock().unwrap();
        Ok(docs.values().filter(|d| Self::matches(filter, d)).count() as u64)
    }

    async fn find(
        &self,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<E>, PersistenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let docs = self.docs.lock().unwrap();
        Ok(docs
            .values()
            .filter(|d| Self::matches(filter, d))
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &StoreId) -> Result<Option<E>, PersistenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let docs = self.docs.lock().unwrap();
        Ok(docs.get(&id.to_hex()).cloned())
    }

    async fn save(&self, doc: E) -> Result<E, PersistenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut docs = self.docs.lock().unwrap();
        docs.insert(doc.id().to_string(), doc.clone());
        Ok(doc)
    }
}

/// Store wrapper rejecting saves for specific document ids, for the
/// partial-success semantics of batch save.
pub struct FailingSaves<E> {
    pub inner: MemoryCollection<E>,
    reject: Vec<String>,
}

impl<E: Entity> FailingSaves<E> {
    pub fn new(reject: Vec<String>) -> Self {
        Self {
            inner: MemoryCollection::new(),
            reject,
        }
    }
}

#[async_trait]
impl<E: Entity> Collection<E> for FailingSaves<E> {
    async fn count(&self, filter: &Filter) -> Result<u64, PersistenceError> {
        self.inner.count(filter).await
    }

    async fn find(
        &self,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<E>, PersistenceError> {
        self.inner.find(filter, skip, limit).await
    }

    async fn find_by_id(&self, id: &StoreId) -> Result<Option<E>, PersistenceError> {
        self.inner.find_by_id(id).await
    }

    async fn save(&self, doc: E) -> Result<E, PersistenceError> {
        if self.reject.iter().any(|id| id == doc.id()) {
            return Err(PersistenceError::backend(format!(
                "write rejected for {}",
                doc.id()
            )));
        }
        self.inner.save(doc).await
    }
}

pub fn fake_id() -> String {
    StoreId::generate().to_hex()
}

pub fn fake_club(name: &str) -> Club {
    Club {
        id: fake_id(),
        sport: Some("tennis".into()),
        name: Some(name.into()),
        city: Some("Caen".into()),
    }
}

pub fn fake_player(nickname: &str) -> Player {
    Player {
        id: fake_id(),
        nickname: Some(nickname.into()),
        name: Some("Clarisse Torres".into()),
        rank: Some("15/2".into()),
        club: None,
        games: vec![],
        password: None,
        token: Some("8871617".into()),
    }
}

pub fn fake_game(owner: &str) -> Game {
    Game {
        id: fake_id(),
        owner: owner.into(),
        date_creation: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        date_start: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        date_end: Some(Utc.with_ymd_and_hms(2024, 1, 1, 1, 30, 0).unwrap()),
        pos: None,
        country: Some("france".into()),
        city: Some("Falaise".into()),
        game_type: Game::TYPE_SINGLES.into(),
        sets: Some("6/2;6/3".into()),
        score: Some("2/0".into()),
        sport: Game::SPORT.into(),
        status: GameStatus::Finished,
        teams: vec![
            Team {
                id: None,
                players: vec![TeamPlayer::Registered { id: fake_id() }],
            },
            Team {
                id: None,
                players: vec![TeamPlayer::Anonymous {
                    name: "Lamasperge".into(),
                }],
            },
        ],
        stream: vec![StreamItem {
            id: fake_id(),
            item_type: StreamItem::TYPE_COMMENT.into(),
            date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 10, 0).unwrap(),
            owner: owner.into(),
            data: json!({ "text": "Merci!" }),
        }],
    }
}
