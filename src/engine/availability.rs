use std::collections::HashMap;

use ulid::Ulid;

use crate::model::*;

use super::conflict::has_conflict;

// ── Availability filter ──────────────────────────────────────────

/// A room is available when it seats the party and none of its occupying
/// bookings overlap the stay. Capacity does not depend on dates.
pub fn room_is_available(room: &Room, bookings: &[Booking], stay: &DateRange, guests: u32) -> bool {
    if guests > room.capacity {
        return false;
    }
    let occupied = bookings
        .iter()
        .filter(|b| b.room_id == room.id && b.is_occupying())
        .map(|b| &b.stay);
    !has_conflict(stay, occupied)
}

/// Keep the rooms available for the stay, preserving order.
/// `bookings` is keyed by room id; a room with no entry has no bookings.
pub fn available_rooms(
    rooms: Vec<Room>,
    bookings: &HashMap<Ulid, Vec<Booking>>,
    stay: &DateRange,
    guests: u32,
) -> Vec<Room> {
    rooms
        .into_iter()
        .filter(|room| {
            let existing = bookings.get(&room.id).map(Vec::as_slice).unwrap_or_default();
            room_is_available(room, existing, stay, guests)
        })
        .collect()
}
