//! Booking domain entity

use chrono::{DateTime, Utc};

use crate::domain::hotel::Room;

/// A user's hold on one room slot. At most one per user.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub room_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(id: i32, user_id: i32, room_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            room_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move the booking to another room
    pub fn move_to(&mut self, room_id: i32) {
        self.room_id = room_id;
        self.updated_at = Utc::now();
    }

    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}

/// Booking joined with the room it holds
#[derive(Debug, Clone, PartialEq)]
pub struct BookingWithRoom {
    pub booking: Booking,
    pub room: Room,
}

/// Count the bookings of a room, skipping the one held by `excluding_user_id`.
pub fn count_occupants(bookings: &[Booking], excluding_user_id: Option<i32>) -> usize {
    bookings
        .iter()
        .filter(|b| excluding_user_id.map_or(true, |uid| b.user_id != uid))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_to_changes_room() {
        let mut b = Booking::new(1, 1, 1);
        b.move_to(2);
        assert_eq!(b.room_id, 2);
        assert!(b.is_owned_by(1));
    }

    #[test]
    fn count_occupants_skips_excluded_user() {
        let bookings = vec![Booking::new(1, 1, 9), Booking::new(2, 2, 9), Booking::new(3, 3, 9)];
        assert_eq!(count_occupants(&bookings, None), 3);
        assert_eq!(count_occupants(&bookings, Some(2)), 2);
        assert_eq!(count_occupants(&bookings, Some(42)), 3);
    }
}
