//! SeaORM implementations of HotelRepository and RoomRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::db_err;
use crate::domain::hotel::{Hotel, HotelRepository, HotelWithRooms, Room, RoomRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{hotel, room};

pub struct SeaOrmHotelRepository {
    db: DatabaseConnection,
}

impl SeaOrmHotelRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn hotel_to_domain(m: hotel::Model) -> Hotel {
    Hotel {
        id: m.id,
        name: m.name,
        image: m.image,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub(super) fn room_to_domain(m: room::Model) -> Room {
    Room {
        id: m.id,
        name: m.name,
        capacity: m.capacity,
        hotel_id: m.hotel_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl HotelRepository for SeaOrmHotelRepository {
    async fn find_all(&self) -> DomainResult<Vec<Hotel>> {
        let models = hotel::Entity::find()
            .order_by_asc(hotel::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(hotel_to_domain).collect())
    }

    async fn find_with_rooms_by_id(&self, hotel_id: i32) -> DomainResult<Option<HotelWithRooms>> {
        let Some(model) = hotel::Entity::find_by_id(hotel_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let rooms = room::Entity::find()
            .filter(room::Column::HotelId.eq(hotel_id))
            .order_by_asc(room::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Some(HotelWithRooms {
            hotel: hotel_to_domain(model),
            rooms: rooms.into_iter().map(room_to_domain).collect(),
        }))
    }
}

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(room_to_domain))
    }
}
