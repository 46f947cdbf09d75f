//! Hotel and room domain entities

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Hotel {
    pub id: i32,
    pub name: String,
    /// Image URL
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hotel {
    pub fn new(id: i32, name: impl Into<String>, image: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            image: image.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Hotel room; `capacity` is the number of simultaneous bookings it accepts
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub hotel_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    pub fn new(id: i32, name: impl Into<String>, capacity: i32, hotel_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            capacity,
            hotel_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether one more booking fits next to `occupied` existing ones
    pub fn has_room_for_another(&self, occupied: usize) -> bool {
        i64::try_from(occupied).map_or(false, |n| n < i64::from(self.capacity))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotelWithRooms {
    pub hotel: Hotel,
    pub rooms: Vec<Room>,
}
