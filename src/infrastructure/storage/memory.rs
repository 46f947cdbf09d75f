//! In-memory repository provider
//!
//! DashMap-backed implementation of every repository, for development and
//! testing. Booking writes are serialised behind one async mutex so the
//! capacity recount and the write happen as a unit. Ticket creation and
//! payment writes share a second mutex for the same reason.

use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::booking::count_occupants;
use crate::domain::{
    BlockReason, BlockedAction, Booking, BookingRepository, BookingWithRoom, DomainError,
    DomainResult, Enrollment, EnrollmentRepository, Hotel, HotelRepository, HotelWithRooms,
    NewPayment, Payment, PaymentRepository, RepositoryProvider, Room, RoomRepository, Ticket,
    TicketRepository, TicketStatus, TicketType, TicketWithType,
};

/// In-memory storage for development and testing
pub struct InMemoryRepositoryProvider {
    enrollments: DashMap<i32, Enrollment>,
    ticket_types: DashMap<i32, TicketType>,
    tickets: DashMap<i32, Ticket>,
    hotels: DashMap<i32, Hotel>,
    rooms: DashMap<i32, Room>,
    bookings: DashMap<i32, Booking>,
    payments: DashMap<i32, Payment>,
    ticket_counter: AtomicI32,
    booking_counter: AtomicI32,
    payment_counter: AtomicI32,
    booking_writes: Mutex<()>,
    ticket_writes: Mutex<()>,
    lookups: AtomicUsize,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            enrollments: DashMap::new(),
            ticket_types: DashMap::new(),
            tickets: DashMap::new(),
            hotels: DashMap::new(),
            rooms: DashMap::new(),
            bookings: DashMap::new(),
            payments: DashMap::new(),
            ticket_counter: AtomicI32::new(1),
            booking_counter: AtomicI32::new(1),
            payment_counter: AtomicI32::new(1),
            booking_writes: Mutex::new(()),
            ticket_writes: Mutex::new(()),
            lookups: AtomicUsize::new(0),
        }
    }

    // ── Fixture helpers ─────────────────────────────────────────

    pub fn insert_enrollment(&self, enrollment: Enrollment) {
        self.enrollments.insert(enrollment.id, enrollment);
    }

    pub fn insert_ticket_type(&self, ticket_type: TicketType) {
        self.ticket_types.insert(ticket_type.id, ticket_type);
    }

    pub fn insert_ticket(&self, ticket: Ticket) {
        self.bump(&self.ticket_counter, ticket.id);
        self.tickets.insert(ticket.id, ticket);
    }

    pub fn insert_hotel(&self, hotel: Hotel) {
        self.hotels.insert(hotel.id, hotel);
    }

    pub fn insert_room(&self, room: Room) {
        self.rooms.insert(room.id, room);
    }

    /// Insert a booking as-is, bypassing the capacity guard
    pub fn insert_booking(&self, booking: Booking) {
        self.bump(&self.booking_counter, booking.id);
        self.bookings.insert(booking.id, booking);
    }

    /// Insert a payment as-is, leaving its ticket untouched
    pub fn insert_payment(&self, payment: Payment) {
        self.bump(&self.payment_counter, payment.id);
        self.payments.insert(payment.id, payment);
    }

    /// Number of read calls served so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn ticket(&self, id: i32) -> Option<Ticket> {
        self.tickets.get(&id).map(|t| t.clone())
    }

    pub fn payment_count(&self) -> usize {
        self.payments.len()
    }

    /// Bookings currently referencing a room
    pub fn occupancy(&self, room_id: i32) -> usize {
        self.bookings.iter().filter(|b| b.room_id == room_id).count()
    }

    fn bump(&self, counter: &AtomicI32, used_id: i32) {
        counter.fetch_max(used_id + 1, Ordering::SeqCst);
    }

    fn lookup(&self) {
        self.lookups.fetch_add(1, Ordering::SeqCst);
    }

    fn ticket_with_type(&self, ticket: Ticket) -> DomainResult<TicketWithType> {
        let ticket_type = self
            .ticket_types
            .get(&ticket.ticket_type_id)
            .map(|t| t.clone())
            .ok_or_else(|| DomainError::not_found("TicketType", "id", ticket.ticket_type_id))?;
        Ok(TicketWithType {
            ticket,
            ticket_type,
        })
    }

    fn room_bookings(&self, room_id: i32) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| b.room_id == room_id)
            .map(|b| b.clone())
            .collect()
    }

    fn booking_of(&self, user_id: i32) -> Option<Booking> {
        self.bookings
            .iter()
            .find(|b| b.user_id == user_id)
            .map(|b| b.clone())
    }

    fn ensure_room_has_space(&self, room: &Room, excluding_user_id: Option<i32>) -> DomainResult<()> {
        let occupied = count_occupants(&self.room_bookings(room.id), excluding_user_id);
        if room.has_room_for_another(occupied) {
            Ok(())
        } else {
            Err(DomainError::blocked(BlockedAction::Book, BlockReason::RoomFull))
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn enrollments(&self) -> &dyn EnrollmentRepository {
        self
    }

    fn tickets(&self) -> &dyn TicketRepository {
        self
    }

    fn hotels(&self) -> &dyn HotelRepository {
        self
    }

    fn rooms(&self) -> &dyn RoomRepository {
        self
    }

    fn bookings(&self) -> &dyn BookingRepository {
        self
    }

    fn payments(&self) -> &dyn PaymentRepository {
        self
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryRepositoryProvider {
    async fn find_by_user_id(&self, user_id: i32) -> DomainResult<Option<Enrollment>> {
        self.lookup();
        Ok(self
            .enrollments
            .iter()
            .find(|e| e.user_id == user_id)
            .map(|e| e.clone()))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Enrollment>> {
        self.lookup();
        Ok(self.enrollments.get(&id).map(|e| e.clone()))
    }
}

#[async_trait]
impl TicketRepository for InMemoryRepositoryProvider {
    async fn find_ticket_types(&self) -> DomainResult<Vec<TicketType>> {
        self.lookup();
        let mut types: Vec<TicketType> = self.ticket_types.iter().map(|t| t.clone()).collect();
        types.sort_by_key(|t| t.id);
        Ok(types)
    }

    async fn find_by_enrollment_id(
        &self,
        enrollment_id: i32,
    ) -> DomainResult<Option<TicketWithType>> {
        self.lookup();
        let ticket = self
            .tickets
            .iter()
            .find(|t| t.enrollment_id == enrollment_id)
            .map(|t| t.clone());
        ticket.map(|t| self.ticket_with_type(t)).transpose()
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Ticket>> {
        self.lookup();
        Ok(self.tickets.get(&id).map(|t| t.clone()))
    }

    async fn find_with_type_by_id(&self, id: i32) -> DomainResult<Option<TicketWithType>> {
        self.lookup();
        let ticket = self.tickets.get(&id).map(|t| t.clone());
        ticket.map(|t| self.ticket_with_type(t)).transpose()
    }

    async fn create(
        &self,
        enrollment_id: i32,
        ticket_type_id: i32,
        status: TicketStatus,
    ) -> DomainResult<Ticket> {
        let _guard = self.ticket_writes.lock().await;

        if !self.ticket_types.contains_key(&ticket_type_id) {
            return Err(DomainError::not_found("TicketType", "id", ticket_type_id));
        }
        if self.tickets.iter().any(|t| t.enrollment_id == enrollment_id) {
            return Err(DomainError::blocked(BlockedAction::Proceed, BlockReason::TicketExists));
        }
        let id = self.ticket_counter.fetch_add(1, Ordering::SeqCst);
        let ticket = Ticket::new(id, enrollment_id, ticket_type_id, status);
        self.tickets.insert(id, ticket.clone());
        Ok(ticket)
    }

    async fn mark_paid(&self, id: i32) -> DomainResult<()> {
        let mut ticket = self
            .tickets
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Ticket", "id", id))?;
        ticket.mark_paid();
        Ok(())
    }
}

#[async_trait]
impl HotelRepository for InMemoryRepositoryProvider {
    async fn find_all(&self) -> DomainResult<Vec<Hotel>> {
        self.lookup();
        let mut hotels: Vec<Hotel> = self.hotels.iter().map(|h| h.clone()).collect();
        hotels.sort_by_key(|h| h.id);
        Ok(hotels)
    }

    async fn find_with_rooms_by_id(&self, hotel_id: i32) -> DomainResult<Option<HotelWithRooms>> {
        self.lookup();
        let Some(hotel) = self.hotels.get(&hotel_id).map(|h| h.clone()) else {
            return Ok(None);
        };
        let mut rooms: Vec<Room> = self
            .rooms
            .iter()
            .filter(|r| r.hotel_id == hotel_id)
            .map(|r| r.clone())
            .collect();
        rooms.sort_by_key(|r| r.id);
        Ok(Some(HotelWithRooms { hotel, rooms }))
    }
}

#[async_trait]
impl RoomRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        self.lookup();
        Ok(self.rooms.get(&id).map(|r| r.clone()))
    }
}

#[async_trait]
impl BookingRepository for InMemoryRepositoryProvider {
    async fn find_by_user_id(&self, user_id: i32) -> DomainResult<Option<BookingWithRoom>> {
        self.lookup();
        let Some(booking) = self.booking_of(user_id) else {
            return Ok(None);
        };
        let room = self
            .rooms
            .get(&booking.room_id)
            .map(|r| r.clone())
            .ok_or_else(|| DomainError::not_found("Room", "id", booking.room_id))?;
        Ok(Some(BookingWithRoom { booking, room }))
    }

    async fn find_by_room_id(&self, room_id: i32) -> DomainResult<Vec<Booking>> {
        self.lookup();
        Ok(self.room_bookings(room_id))
    }

    async fn create(&self, user_id: i32, room: &Room) -> DomainResult<Booking> {
        let _guard = self.booking_writes.lock().await;

        if self.booking_of(user_id).is_some() {
            return Err(DomainError::blocked(BlockedAction::Book, BlockReason::AlreadyBooked));
        }
        self.ensure_room_has_space(room, None)?;

        let id = self.booking_counter.fetch_add(1, Ordering::SeqCst);
        let booking = Booking::new(id, user_id, room.id);
        self.bookings.insert(id, booking.clone());
        Ok(booking)
    }

    async fn upsert_by_user_id(&self, user_id: i32, room: &Room) -> DomainResult<Booking> {
        let _guard = self.booking_writes.lock().await;

        self.ensure_room_has_space(room, Some(user_id))?;

        let booking = match self.booking_of(user_id) {
            Some(mut existing) => {
                existing.move_to(room.id);
                existing
            }
            None => {
                let id = self.booking_counter.fetch_add(1, Ordering::SeqCst);
                Booking::new(id, user_id, room.id)
            }
        };
        self.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }
}

#[async_trait]
impl PaymentRepository for InMemoryRepositoryProvider {
    async fn find_by_ticket_id(&self, ticket_id: i32) -> DomainResult<Option<Payment>> {
        self.lookup();
        Ok(self
            .payments
            .iter()
            .find(|p| p.ticket_id == ticket_id)
            .map(|p| p.clone()))
    }

    async fn create_and_mark_paid(&self, payment: NewPayment) -> DomainResult<Payment> {
        let _guard = self.ticket_writes.lock().await;

        if !self.tickets.contains_key(&payment.ticket_id) {
            return Err(DomainError::not_found("Ticket", "id", payment.ticket_id));
        }
        if self.payments.iter().any(|p| p.ticket_id == payment.ticket_id) {
            return Err(DomainError::Storage(format!(
                "payment for ticket {} already exists",
                payment.ticket_id
            )));
        }
        let id = self.payment_counter.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let payment = Payment {
            id,
            ticket_id: payment.ticket_id,
            value: payment.value,
            card_issuer: payment.card_issuer,
            card_last_digits: payment.card_last_digits,
            created_at: now,
            updated_at: now,
        };
        self.payments.insert(id, payment.clone());
        if let Some(mut ticket) = self.tickets.get_mut(&payment.ticket_id) {
            ticket.mark_paid();
        }
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_with_room(capacity: i32) -> (InMemoryRepositoryProvider, Room) {
        let repos = InMemoryRepositoryProvider::new();
        repos.insert_hotel(Hotel::new(1, "Driven Resort", "https://img.example/1.png"));
        let room = Room::new(1, "1020", capacity, 1);
        repos.insert_room(room.clone());
        (repos, room)
    }

    #[tokio::test]
    async fn create_rejects_full_room() {
        let (repos, room) = provider_with_room(1);
        repos.bookings().create(1, &room).await.unwrap();

        let err = repos.bookings().create(2, &room).await.unwrap_err();
        assert_eq!(err, DomainError::blocked(BlockedAction::Book, BlockReason::RoomFull));
        assert_eq!(repos.occupancy(1), 1);
    }

    #[tokio::test]
    async fn create_rejects_second_booking_for_user() {
        let (repos, room) = provider_with_room(3);
        repos.bookings().create(1, &room).await.unwrap();

        let err = repos.bookings().create(1, &room).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::blocked(BlockedAction::Book, BlockReason::AlreadyBooked)
        );
    }

    #[tokio::test]
    async fn upsert_moves_existing_booking() {
        let (repos, room) = provider_with_room(3);
        let other = Room::new(2, "1021", 1, 1);
        repos.insert_room(other.clone());

        let created = repos.bookings().create(7, &room).await.unwrap();
        let moved = repos.bookings().upsert_by_user_id(7, &other).await.unwrap();

        assert_eq!(moved.id, created.id);
        assert_eq!(moved.room_id, 2);
        assert_eq!(repos.occupancy(1), 0);
        assert_eq!(repos.occupancy(2), 1);
    }

    #[tokio::test]
    async fn upsert_same_room_ignores_own_booking() {
        let (repos, room) = provider_with_room(1);
        repos.bookings().create(7, &room).await.unwrap();

        let again = repos.bookings().upsert_by_user_id(7, &room).await.unwrap();
        assert_eq!(again.room_id, room.id);
        assert_eq!(repos.occupancy(1), 1);
    }

    #[tokio::test]
    async fn find_by_user_id_joins_room() {
        let (repos, room) = provider_with_room(2);
        repos.bookings().create(3, &room).await.unwrap();

        let found = repos.bookings().find_by_user_id(3).await.unwrap().unwrap();
        assert_eq!(found.room, room);
        assert!(repos.bookings().find_by_user_id(4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ticket_create_requires_known_type() {
        let repos = InMemoryRepositoryProvider::new();
        let err = repos
            .tickets()
            .create(1, 99, TicketStatus::Reserved)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "TicketType", .. }));
    }

    #[tokio::test]
    async fn second_ticket_for_enrollment_is_rejected() {
        let repos = InMemoryRepositoryProvider::new();
        repos.insert_ticket_type(TicketType::new(1, "Online", 10000, true, false));
        repos.insert_ticket_type(TicketType::new(2, "Presencial", 60000, false, true));
        let first = repos
            .tickets()
            .create(4, 1, TicketStatus::Reserved)
            .await
            .unwrap();

        let err = repos
            .tickets()
            .create(4, 2, TicketStatus::Reserved)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::blocked(BlockedAction::Proceed, BlockReason::TicketExists)
        );
        let held = repos.tickets().find_by_enrollment_id(4).await.unwrap().unwrap();
        assert_eq!(held.ticket.id, first.id);
    }

    #[tokio::test]
    async fn payment_write_marks_ticket_paid() {
        let repos = InMemoryRepositoryProvider::new();
        repos.insert_ticket_type(TicketType::new(1, "Online", 10000, true, false));
        repos.insert_ticket(Ticket::new(3, 1, 1, TicketStatus::Reserved));

        let payment = repos
            .payments()
            .create_and_mark_paid(NewPayment {
                ticket_id: 3,
                value: 10000,
                card_issuer: "VISA".into(),
                card_last_digits: "1234".into(),
            })
            .await
            .unwrap();
        assert_eq!(payment.ticket_id, 3);
        assert!(repos.ticket(3).unwrap().is_paid());
    }

    #[tokio::test]
    async fn payment_write_for_missing_ticket_stores_nothing() {
        let repos = InMemoryRepositoryProvider::new();
        let err = repos
            .payments()
            .create_and_mark_paid(NewPayment {
                ticket_id: 8,
                value: 10000,
                card_issuer: "VISA".into(),
                card_last_digits: "1234".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Ticket", .. }));
        assert_eq!(repos.payment_count(), 0);
    }

    #[tokio::test]
    async fn inserted_ids_advance_counters() {
        let repos = InMemoryRepositoryProvider::new();
        repos.insert_ticket_type(TicketType::new(1, "Online", 10000, true, false));
        repos.insert_ticket(Ticket::new(5, 1, 1, TicketStatus::Reserved));

        let created = repos
            .tickets()
            .create(2, 1, TicketStatus::Reserved)
            .await
            .unwrap();
        assert_eq!(created.id, 6);
    }
}
