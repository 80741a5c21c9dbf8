use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use ulid::Ulid;

use crate::model::*;

use super::{Collection, Filter, Record, Repository, StoreError, StoreInfo};

pub struct MemoryStore {
    hotels: DashMap<Ulid, Hotel>,
    rooms: DashMap<Ulid, Room>,
    bookings: DashMap<Ulid, Booking>,
    /// Hotel → rooms index.
    rooms_by_hotel: DashMap<Ulid, Vec<Ulid>>,
    /// Room → bookings index.
    bookings_by_room: DashMap<Ulid, Vec<Ulid>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            hotels: DashMap::new(),
            rooms: DashMap::new(),
            bookings: DashMap::new(),
            rooms_by_hotel: DashMap::new(),
            bookings_by_room: DashMap::new(),
        }
    }

    pub fn contains(&self, collection: Collection, id: &Ulid) -> bool {
        match collection {
            Collection::Hotels => self.hotels.contains_key(id),
            Collection::Rooms => self.rooms.contains_key(id),
            Collection::Bookings => self.bookings.contains_key(id),
        }
    }

    /// Insert a document and update the indexes.
    pub fn apply(&self, record: Record) -> Result<Ulid, StoreError> {
        let id = record.id();
        match record {
            Record::Hotel(hotel) => match self.hotels.entry(id) {
                Entry::Occupied(_) => return Err(StoreError::AlreadyExists(id)),
                Entry::Vacant(slot) => {
                    slot.insert(hotel);
                }
            },
            Record::Room(room) => {
                let hotel_id = room.hotel_id;
                match self.rooms.entry(id) {
                    Entry::Occupied(_) => return Err(StoreError::AlreadyExists(id)),
                    Entry::Vacant(slot) => {
                        slot.insert(room);
                    }
                }
                self.rooms_by_hotel.entry(hotel_id).or_default().push(id);
            }
            Record::Booking(booking) => {
                let room_id = booking.room_id;
                match self.bookings.entry(id) {
                    Entry::Occupied(_) => return Err(StoreError::AlreadyExists(id)),
                    Entry::Vacant(slot) => {
                        slot.insert(booking);
                    }
                }
                self.bookings_by_room.entry(room_id).or_default().push(id);
            }
        }
        Ok(id)
    }

    // ── Lookups ──────────────────────────────────────────────

    fn hotel_records(&self, ids: impl IntoIterator<Item = Ulid>) -> Vec<Record> {
        ids.into_iter()
            .filter_map(|id| self.hotels.get(&id).map(|e| Record::Hotel(e.value().clone())))
            .collect()
    }

    fn room_records(&self, ids: impl IntoIterator<Item = Ulid>) -> Vec<Record> {
        ids.into_iter()
            .filter_map(|id| self.rooms.get(&id).map(|e| Record::Room(e.value().clone())))
            .collect()
    }

    fn booking_records(&self, ids: impl IntoIterator<Item = Ulid>) -> Vec<Record> {
        ids.into_iter()
            .filter_map(|id| self.bookings.get(&id).map(|e| Record::Booking(e.value().clone())))
            .collect()
    }

    /// Snapshot keys before reading values so no shard guard is held across lookups.
    fn keys<V>(map: &DashMap<Ulid, V>) -> Vec<Ulid> {
        map.iter().map(|e| *e.key()).collect()
    }

    fn indexed(index: &DashMap<Ulid, Vec<Ulid>>, key: &Ulid) -> Vec<Ulid> {
        index.get(key).map(|e| e.value().clone()).unwrap_or_default()
    }

    pub fn query(&self, collection: Collection, filter: &Filter) -> Result<Vec<Record>, StoreError> {
        let mut records = match (collection, *filter) {
            (Collection::Hotels, Filter::All) => self.hotel_records(Self::keys(&self.hotels)),
            (Collection::Hotels, Filter::Id(id)) => self.hotel_records([id]),
            (Collection::Rooms, Filter::All) => self.room_records(Self::keys(&self.rooms)),
            (Collection::Rooms, Filter::Id(id)) => self.room_records([id]),
            (Collection::Rooms, Filter::HotelId(hotel_id)) => {
                self.room_records(Self::indexed(&self.rooms_by_hotel, &hotel_id))
            }
            (Collection::Bookings, Filter::All) => self.booking_records(Self::keys(&self.bookings)),
            (Collection::Bookings, Filter::Id(id)) => self.booking_records([id]),
            (Collection::Bookings, Filter::RoomId(room_id)) => {
                self.booking_records(Self::indexed(&self.bookings_by_room, &room_id))
            }
            (Collection::Bookings, Filter::HotelId(hotel_id)) => {
                let ids: Vec<Ulid> = Self::indexed(&self.rooms_by_hotel, &hotel_id)
                    .iter()
                    .flat_map(|room_id| Self::indexed(&self.bookings_by_room, room_id))
                    .collect();
                self.booking_records(ids)
            }
            (collection, filter) => return Err(StoreError::UnsupportedFilter(collection, filter)),
        };
        records.sort_by_key(Record::id);
        Ok(records)
    }

    pub fn info(&self, kind: &'static str, path: Option<String>) -> StoreInfo {
        StoreInfo {
            kind,
            path,
            hotels: self.hotels.len(),
            rooms: self.rooms.len(),
            bookings: self.bookings.len(),
        }
    }
}

#[async_trait]
impl Repository for MemoryStore {
    async fn create(&self, record: Record) -> Result<Ulid, StoreError> {
        self.apply(record)
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Record>, StoreError> {
        self.query(collection, filter)
    }

    fn describe(&self) -> StoreInfo {
        self.info("memory", None)
    }
}
