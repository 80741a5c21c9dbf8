use std::collections::HashMap;

use tracing::debug;
use ulid::Ulid;

use crate::model::*;
use crate::store::{Collection, Filter, Record};

use super::availability::available_rooms;
use super::conflict::validate_party;
use super::{parse_id, Engine, EngineError};

impl Engine {
    // ── Typed loaders ────────────────────────────────────────

    pub(super) async fn load_hotel(&self, id: Ulid) -> Result<Hotel, EngineError> {
        self.repo()?
            .find_one(Collection::Hotels, &Filter::Id(id))
            .await?
            .and_then(Record::into_hotel)
            .ok_or_else(|| EngineError::not_found("hotel", id))
    }

    pub(super) async fn load_room(&self, id: Ulid) -> Result<Room, EngineError> {
        self.repo()?
            .find_one(Collection::Rooms, &Filter::Id(id))
            .await?
            .and_then(Record::into_room)
            .ok_or_else(|| EngineError::not_found("room", id))
    }

    pub(super) async fn rooms_of(&self, hotel_id: Ulid) -> Result<Vec<Room>, EngineError> {
        let records = self
            .repo()?
            .find(Collection::Rooms, &Filter::HotelId(hotel_id))
            .await?;
        Ok(records.into_iter().filter_map(Record::into_room).collect())
    }

    /// Every booking of a room, whatever its dates.
    pub(super) async fn bookings_of(&self, room_id: Ulid) -> Result<Vec<Booking>, EngineError> {
        let records = self
            .repo()?
            .find(Collection::Bookings, &Filter::RoomId(room_id))
            .await?;
        Ok(records.into_iter().filter_map(Record::into_booking).collect())
    }

    // ── Public queries ───────────────────────────────────────

    pub async fn list_hotels(&self) -> Result<Vec<Hotel>, EngineError> {
        let records = self.repo()?.find(Collection::Hotels, &Filter::All).await?;
        Ok(records.into_iter().filter_map(Record::into_hotel).collect())
    }

    /// A hotel together with its rooms.
    pub async fn get_hotel(&self, hotel_id: &str) -> Result<(Hotel, Vec<Room>), EngineError> {
        self.repo()?;
        let id = parse_id("hotel", hotel_id)?;
        let hotel = self.load_hotel(id).await?;
        let rooms = self.rooms_of(id).await?;
        Ok((hotel, rooms))
    }

    pub async fn list_bookings(&self) -> Result<Vec<Booking>, EngineError> {
        let records = self.repo()?.find(Collection::Bookings, &Filter::All).await?;
        Ok(records.into_iter().filter_map(Record::into_booking).collect())
    }

    /// Rooms of a hotel that seat the party and are free for the whole stay.
    pub async fn check_availability(
        &self,
        hotel_id: &str,
        query: &AvailabilityQuery,
    ) -> Result<Vec<Room>, EngineError> {
        let result = self.check_availability_inner(hotel_id, query).await;
        metrics::counter!(
            crate::observability::AVAILABILITY_QUERIES_TOTAL,
            "outcome" => crate::observability::outcome_label(&result)
        )
        .increment(1);
        if let Ok(rooms) = &result {
            metrics::histogram!(crate::observability::AVAILABLE_ROOMS).record(rooms.len() as f64);
        }
        result
    }

    async fn check_availability_inner(
        &self,
        hotel_id: &str,
        query: &AvailabilityQuery,
    ) -> Result<Vec<Room>, EngineError> {
        self.repo()?;
        // No upper bounds here: a party too large for every room gets an empty list.
        let stay = DateRange::parse(&query.check_in, &query.check_out)?;
        validate_party(query.guests)?;

        let hotel_id = parse_id("hotel", hotel_id)?;
        self.load_hotel(hotel_id).await?;
        let rooms = self.rooms_of(hotel_id).await?;

        let mut bookings = HashMap::with_capacity(rooms.len());
        for room in &rooms {
            bookings.insert(room.id, self.bookings_of(room.id).await?);
        }

        let total = rooms.len();
        let available = available_rooms(rooms, &bookings, &stay, query.guests);
        debug!(
            "availability {hotel_id} {stay} guests={}: {}/{total} rooms free",
            query.guests,
            available.len()
        );
        Ok(available)
    }
}
