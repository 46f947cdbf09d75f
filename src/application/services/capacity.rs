//! Room capacity evaluation

use std::sync::Arc;

use crate::domain::booking::count_occupants;
use crate::domain::{DomainResult, RepositoryProvider, Room};

pub struct CapacityEvaluator {
    repos: Arc<dyn RepositoryProvider>,
}

impl CapacityEvaluator {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Whether `room` can take one more booking. The booking held by
    /// `excluding_user_id`, if any, is not counted.
    pub async fn has_capacity(
        &self,
        room: &Room,
        excluding_user_id: Option<i32>,
    ) -> DomainResult<bool> {
        let bookings = self.repos.bookings().find_by_room_id(room.id).await?;
        Ok(room.has_room_for_another(count_occupants(&bookings, excluding_user_id)))
    }
}
