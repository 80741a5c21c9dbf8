//! Document storage behind a small repository interface.
//!
//! The engine only ever talks to `dyn Repository`. `MemoryStore` keeps
//! everything in DashMaps; `WalStore` wraps it with an append-only log so the
//! catalogue and bookings survive restarts.

mod memory;
mod wal_store;

pub use memory::MemoryStore;
pub use wal_store::WalStore;

use async_trait::async_trait;
use serde::Serialize;
use ulid::Ulid;

use crate::model::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Hotels,
    Rooms,
    Bookings,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Hotels => "hotel",
            Collection::Rooms => "room",
            Collection::Bookings => "booking",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Id(Ulid),
    HotelId(Ulid),
    RoomId(Ulid),
}

/// One stored document.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Hotel(Hotel),
    Room(Room),
    Booking(Booking),
}

impl Record {
    pub fn id(&self) -> Ulid {
        match self {
            Record::Hotel(h) => h.id,
            Record::Room(r) => r.id,
            Record::Booking(b) => b.id,
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            Record::Hotel(_) => Collection::Hotels,
            Record::Room(_) => Collection::Rooms,
            Record::Booking(_) => Collection::Bookings,
        }
    }

    pub fn into_hotel(self) -> Option<Hotel> {
        match self {
            Record::Hotel(h) => Some(h),
            _ => None,
        }
    }

    pub fn into_room(self) -> Option<Room> {
        match self {
            Record::Room(r) => Some(r),
            _ => None,
        }
    }

    pub fn into_booking(self) -> Option<Booking> {
        match self {
            Record::Booking(b) => Some(b),
            _ => None,
        }
    }
}

impl From<Record> for Event {
    fn from(record: Record) -> Self {
        match record {
            Record::Hotel(h) => Event::HotelCreated(h),
            Record::Room(r) => Event::RoomCreated(r),
            Record::Booking(b) => Event::BookingConfirmed(b),
        }
    }
}

impl From<Event> for Record {
    fn from(event: Event) -> Self {
        match event {
            Event::HotelCreated(h) => Record::Hotel(h),
            Event::RoomCreated(r) => Record::Room(r),
            Event::BookingConfirmed(b) => Record::Booking(b),
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    AlreadyExists(Ulid),
    UnsupportedFilter(Collection, Filter),
    Wal(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::AlreadyExists(id) => write!(f, "document already exists: {id}"),
            StoreError::UnsupportedFilter(collection, filter) => {
                write!(f, "filter {filter:?} not supported on {}", collection.name())
            }
            StoreError::Wal(e) => write!(f, "WAL error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Diagnostic snapshot of a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreInfo {
    pub kind: &'static str,
    pub path: Option<String>,
    pub hotels: usize,
    pub rooms: usize,
    pub bookings: usize,
}

#[async_trait]
pub trait Repository: Send + Sync {
    /// Store a document under its own id and return that id.
    async fn create(&self, record: Record) -> Result<Ulid, StoreError>;

    /// All matching documents, in id order.
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Record>, StoreError>;

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Record>, StoreError> {
        Ok(self.find(collection, filter).await?.into_iter().next())
    }

    fn describe(&self) -> StoreInfo;
}
