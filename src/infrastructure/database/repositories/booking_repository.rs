//! SeaORM implementation of BookingRepository
//!
//! Guarded writes run inside a transaction whose first statement is a no-op
//! `UPDATE` of the room row. That takes the row lock on Postgres and the
//! database write lock on SQLite before anything is read, so racing writers
//! queue on the busy timeout instead of failing a read-to-write upgrade. The
//! recount that follows therefore sees every committed booking.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};

use super::db_err;
use super::hotel_repository::room_to_domain;
use crate::domain::booking::{Booking, BookingRepository, BookingWithRoom};
use crate::domain::hotel::Room;
use crate::domain::{BlockReason, BlockedAction, DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, room};

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        user_id: m.user_id,
        room_id: m.room_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

/// Claim the room for writing. Must be the first statement of the
/// transaction.
async fn lock_room<C: ConnectionTrait>(conn: &C, room_id: i32) -> DomainResult<()> {
    let touched = room::Entity::update_many()
        .col_expr(room::Column::UpdatedAt, Expr::col(room::Column::UpdatedAt).into())
        .filter(room::Column::Id.eq(room_id))
        .exec(conn)
        .await
        .map_err(db_err)?;
    if touched.rows_affected == 0 {
        return Err(DomainError::not_found("Room", "id", room_id));
    }
    Ok(())
}

/// Make sure one more booking fits, ignoring the booking held by
/// `excluding_user_id`. Runs after [`lock_room`].
async fn ensure_room_has_space<C: ConnectionTrait>(
    conn: &C,
    room: &Room,
    excluding_user_id: Option<i32>,
) -> DomainResult<()> {

    let mut query = booking::Entity::find().filter(booking::Column::RoomId.eq(room.id));
    if let Some(user_id) = excluding_user_id {
        query = query.filter(booking::Column::UserId.ne(user_id));
    }
    let occupied = query.count(conn).await.map_err(db_err)?;
    let occupied = usize::try_from(occupied).unwrap_or(usize::MAX);

    if room.has_room_for_another(occupied) {
        Ok(())
    } else {
        debug!("Room {} is full ({} of {})", room.id, occupied, room.capacity);
        Err(DomainError::blocked(BlockedAction::Book, BlockReason::RoomFull))
    }
}

/// The unique index on `bookings.user_id` is the last line of defence
/// against a second booking.
fn write_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::blocked(BlockedAction::Book, BlockReason::AlreadyBooked)
        }
        _ => db_err(e),
    }
}

async fn booking_of<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
) -> DomainResult<Option<booking::Model>> {
    booking::Entity::find()
        .filter(booking::Column::UserId.eq(user_id))
        .one(conn)
        .await
        .map_err(db_err)
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_by_user_id(&self, user_id: i32) -> DomainResult<Option<BookingWithRoom>> {
        let row = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .find_also_related(room::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some((b, r)) = row else {
            return Ok(None);
        };
        let room = r
            .map(room_to_domain)
            .ok_or_else(|| DomainError::not_found("Room", "id", b.room_id))?;
        Ok(Some(BookingWithRoom {
            booking: model_to_domain(b),
            room,
        }))
    }

    async fn find_by_room_id(&self, room_id: i32) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::RoomId.eq(room_id))
            .order_by_asc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn create(&self, user_id: i32, room: &Room) -> DomainResult<Booking> {
        debug!("Creating booking: user={} room={}", user_id, room.id);

        let txn = self.db.begin().await.map_err(db_err)?;

        lock_room(&txn, room.id).await?;
        ensure_room_has_space(&txn, room, None).await?;
        if booking_of(&txn, user_id).await?.is_some() {
            return Err(DomainError::blocked(
                BlockedAction::Book,
                BlockReason::AlreadyBooked,
            ));
        }

        let now = Utc::now();
        let model = booking::ActiveModel {
            user_id: Set(user_id),
            room_id: Set(room.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = model.insert(&txn).await.map_err(write_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn upsert_by_user_id(&self, user_id: i32, room: &Room) -> DomainResult<Booking> {
        debug!("Upserting booking: user={} room={}", user_id, room.id);

        let txn = self.db.begin().await.map_err(db_err)?;

        lock_room(&txn, room.id).await?;
        ensure_room_has_space(&txn, room, Some(user_id)).await?;

        let now = Utc::now();
        let model = booking::ActiveModel {
            user_id: Set(user_id),
            room_id: Set(room.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        booking::Entity::insert(model)
            .on_conflict(
                OnConflict::column(booking::Column::UserId)
                    .update_columns([booking::Column::RoomId, booking::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .map_err(write_err)?;

        let saved = booking_of(&txn, user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "user_id", user_id))?;

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }
}
