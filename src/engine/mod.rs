mod availability;
mod conflict;
mod error;
mod mutations;
mod queries;

pub use availability::{available_rooms, room_is_available};
pub use conflict::{has_conflict, overlaps};
pub use error::EngineError;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use ulid::{Generator, Ulid};

use crate::store::{Repository, StoreInfo};

pub type RoomLock = Arc<Mutex<()>>;

/// The booking decision procedure. Owns no data itself: everything goes
/// through the injected repository.
pub struct Engine {
    repo: Option<Arc<dyn Repository>>,
    /// Per-room locks held across check + insert so overlapping requests
    /// for the same room serialize.
    room_locks: DashMap<Ulid, RoomLock>,
    /// Monotonic within a millisecond, so id order is creation order.
    ids: std::sync::Mutex<Generator>,
}

impl Engine {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self {
            repo: Some(repo),
            room_locks: DashMap::new(),
            ids: std::sync::Mutex::new(Generator::new()),
        }
    }

    /// An engine with no backing store; every storage-touching call fails
    /// with `StorageUnavailable`.
    pub fn without_storage() -> Self {
        Self {
            repo: None,
            room_locks: DashMap::new(),
            ids: std::sync::Mutex::new(Generator::new()),
        }
    }

    pub fn storage_info(&self) -> Option<StoreInfo> {
        self.repo.as_ref().map(|r| r.describe())
    }

    pub(super) fn repo(&self) -> Result<&Arc<dyn Repository>, EngineError> {
        self.repo.as_ref().ok_or(EngineError::StorageUnavailable)
    }

    pub(super) fn next_id(&self) -> Result<Ulid, EngineError> {
        let mut ids = self.ids.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        ids.generate()
            .map_err(|_| EngineError::LimitExceeded("ids generated this millisecond"))
    }

    pub(super) fn room_lock(&self, room_id: Ulid) -> RoomLock {
        self.room_locks.entry(room_id).or_default().clone()
    }
}

/// Boundary ids are ULID strings; anything else cannot resolve.
pub(crate) fn parse_id(entity: &'static str, raw: &str) -> Result<Ulid, EngineError> {
    Ulid::from_string(raw.trim()).map_err(|_| EngineError::not_found(entity, raw))
}
