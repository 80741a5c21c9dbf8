use serde::Serialize;
use tracing::info;

use crate::engine::{Engine, EngineError};
use crate::model::{NewHotel, NewRoom};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub inserted_hotels: usize,
    pub inserted_rooms: usize,
}

struct RoomSeed {
    name: &'static str,
    price_per_night: f64,
    capacity: u32,
    amenities: &'static [&'static str],
    images: &'static [&'static str],
}

struct HotelSeed {
    name: &'static str,
    location: &'static str,
    description: &'static str,
    rating: f32,
    amenities: &'static [&'static str],
    image_url: &'static str,
    rooms: &'static [RoomSeed],
}

const CATALOGUE: &[HotelSeed] = &[
    HotelSeed {
        name: "Seaside Resort",
        location: "Malibu, USA",
        description: "Oceanfront stays with stunning sunsets.",
        rating: 4.7,
        amenities: &["Pool", "WiFi", "Breakfast", "Spa"],
        image_url: "https://images.unsplash.com/photo-1501117716987-c8e2a9ce5e1d?auto=format&fit=crop&w=1200&q=60",
        rooms: &[
            RoomSeed {
                name: "Deluxe Ocean View",
                price_per_night: 320.0,
                capacity: 2,
                amenities: &["Balcony", "King Bed", "Mini Bar"],
                images: &["https://images.unsplash.com/photo-1505691723518-36a5ac3b2d95?auto=format&fit=crop&w=1200&q=60"],
            },
            RoomSeed {
                name: "Family Suite",
                price_per_night: 450.0,
                capacity: 4,
                amenities: &["Two Bedrooms", "Kitchenette"],
                images: &["https://images.unsplash.com/photo-1505691938895-1758d7feb511?auto=format&fit=crop&w=1200&q=60"],
            },
        ],
    },
    HotelSeed {
        name: "Mountain Lodge",
        location: "Zermatt, Switzerland",
        description: "Cozy lodge with alpine views.",
        rating: 4.6,
        amenities: &["WiFi", "Sauna", "Restaurant"],
        image_url: "https://images.unsplash.com/photo-1528909514045-2fa4ac7a08ba?auto=format&fit=crop&w=1200&q=60",
        rooms: &[RoomSeed {
            name: "Alpine Classic",
            price_per_night: 280.0,
            capacity: 2,
            amenities: &["Queen Bed", "Mountain View"],
            images: &[],
        }],
    },
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Insert the demo catalogue. Every call inserts a fresh copy.
pub async fn seed(engine: &Engine) -> Result<SeedReport, EngineError> {
    let mut report = SeedReport {
        inserted_hotels: 0,
        inserted_rooms: 0,
    };
    for h in CATALOGUE {
        let hotel = engine
            .create_hotel(NewHotel {
                name: h.name.into(),
                location: h.location.into(),
                description: Some(h.description.into()),
                rating: h.rating,
                amenities: strings(h.amenities),
                image_url: Some(h.image_url.into()),
            })
            .await?;
        report.inserted_hotels += 1;

        for r in h.rooms {
            engine
                .create_room(NewRoom {
                    hotel_id: hotel.id,
                    name: r.name.into(),
                    price_per_night: r.price_per_night,
                    capacity: r.capacity,
                    amenities: strings(r.amenities),
                    images: strings(r.images),
                })
                .await?;
            report.inserted_rooms += 1;
        }
    }
    info!(
        "seeded {} hotels, {} rooms",
        report.inserted_hotels, report.inserted_rooms
    );
    Ok(report)
}
